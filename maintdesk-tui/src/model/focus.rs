//! Keyboard focus

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusPanel {
    /// Record table
    #[default]
    List,
    /// Detail form
    Form,
    /// Search box above the table
    Search,
}

impl FocusPanel {
    /// List ↔ form; leaving the search box returns to the list.
    pub fn toggle(self) -> Self {
        match self {
            Self::List => Self::Form,
            Self::Form | Self::Search => Self::List,
        }
    }

    pub fn is_list(self) -> bool {
        self == Self::List
    }

    pub fn is_form(self) -> bool {
        self == Self::Form
    }

    pub fn is_search(self) -> bool {
        self == Self::Search
    }
}
