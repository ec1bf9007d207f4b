//! View layer
//!
//! Pure rendering: reads the [`App`](crate::model::App) and the active tab's
//! [`TabView`](crate::model::TabView) snapshot, never mutates state.

mod components;
mod layout;
mod theme;

pub use layout::render;
