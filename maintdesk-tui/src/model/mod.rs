//! Model layer: application state
//!
//! - [`App`]: quit flag, focus, the entity tabs and which one is active
//! - [`Tab`]: object-safe face of one entity's page; [`EntityTab`] is the
//!   generic implementation over `MasterDetailPage<E>`
//! - [`TabView`]: render data detached from the entity type, so the view
//!   layer stays non-generic
//! - [`FormCursor`]: which form field has keyboard focus and any half-typed
//!   text for it

mod app;
mod entity_tab;
mod focus;
mod form_cursor;
mod tab;

pub use app::App;
pub use entity_tab::EntityTab;
pub use focus::FocusPanel;
pub use form_cursor::FormCursor;
pub use tab::{Tab, TabView};

#[cfg(test)]
pub(crate) use tab::fake;
