//! Util layer: terminal setup and file logging

mod logging;
mod terminal;

pub use logging::{LOG_FILE, init_logging, log_dir};
pub use terminal::{Term, init_terminal, restore_terminal};
