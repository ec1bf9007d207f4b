//! Master–detail record editor
//!
//! Building blocks, leaf first: field controls, list view, dirty-tracking
//! form, mode controller, pagination, debounced search, delete dialog,
//! notifications and the list cache. [`MasterDetailPage`] composes them.

mod cache;
mod controls;
mod delete;
mod form;
mod list;
mod mode;
mod notify;
mod page;
mod pagination;
mod search;

pub use cache::{ListCache, RequestId};
pub use controls::{FieldControl, cycle_choice, field_controls, parse_input, toggle, toggle_reference};
pub use delete::{DeleteDialog, DeleteTarget};
pub use form::{DetailForm, FieldPatch};
pub use list::{ListView, RowView};
pub use mode::{FormActions, FormMode, ModeController, RowState, SelectOutcome, Submission};
pub use notify::{DEFAULT_TTL, Notification, NotificationLevel, Notifier};
pub use page::{Effect, MasterDetailPage, PageMsg, PageSettings, failed};
pub use pagination::{PageLink, PaginationState};
pub use search::{DEFAULT_DEBOUNCE, SearchDebouncer};
