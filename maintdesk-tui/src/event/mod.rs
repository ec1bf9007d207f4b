//! Event layer
//!
//! Turns terminal input into an [`AppMessage`](crate::message::AppMessage).
//! Key presses are routed by what currently owns the keyboard, in this order:
//! the help overlay, the delete dialog, then the focused panel (list, form or
//! search box).

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
