//! Message layer
//!
//! The bridge between Event and Update: the event handler turns a key press
//! into an [`AppMessage`]; update applies it. Intents aimed at the active
//! entity tab travel as [`TabMessage`].

mod app;
mod tab;

pub use app::AppMessage;
pub use tab::TabMessage;
