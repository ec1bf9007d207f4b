//! Application-level messages

use super::TabMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMessage {
    Quit,
    NextTab,
    PreviousTab,
    /// Jump to a tab by index (digit keys).
    SelectTab(usize),
    /// Switch between the list and the form.
    ToggleFocus,
    /// Start typing into the search box.
    FocusSearch,
    /// Enter in the search box: search now and leave the box.
    SubmitSearch,
    /// Esc in the search box: clear the term and leave the box.
    CancelSearch,
    ToggleHelp,
    /// Forward to the active tab.
    Tab(TabMessage),
    /// No-op, in place of `Option::None`
    Noop,
}
