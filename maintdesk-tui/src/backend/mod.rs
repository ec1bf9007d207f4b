//! Backend layer
//!
//! - `session`: bearer token from `MAINTDESK_TOKEN` or the system keyring
//! - `runner`: runs page effects on the tokio runtime and queues their
//!   completions for the UI thread

mod runner;
mod session;

pub use runner::EffectRunner;
pub use session::KeyringSession;

#[cfg(test)]
pub(crate) use runner::tests::{client_service, runtime};
