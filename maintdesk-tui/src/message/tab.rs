//! Intents for the active entity tab

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabMessage {
    // List
    CursorUp,
    CursorDown,
    /// Show the row under the cursor.
    Select,
    /// Edit the row under the cursor.
    Edit,
    /// Ask to delete the row under the cursor.
    Delete,
    New,
    Refresh,

    // Pagination
    NextPage,
    PreviousPage,
    MoreRows,
    FewerRows,

    // Search
    SearchInput(char),
    SearchBackspace,
    SearchSubmit,
    SearchClear,

    // Form
    FieldNext,
    FieldPrevious,
    /// Typed character; space also flips a checkbox, cycles a choice or
    /// picks the highlighted reference option.
    FieldInput(char),
    FieldBackspace,
    OptionNext,
    OptionPrevious,
    Submit,
    Discard,

    // Delete dialog
    ConfirmDelete,
    CancelDelete,

    DismissNotification,
}
