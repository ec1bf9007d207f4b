//! maintdesk Core Library
//!
//! Platform-independent logic for the maintenance console:
//! - Entity model with static field schemas (clients, vendors, products,
//!   spares, engineers, machines, service requests, service entries, employees)
//! - The master–detail record editor: a pure state machine per entity page
//! - Services that execute the editor's effects against the REST backend
//! - Console configuration
//!
//! Front ends drive a [`MasterDetailPage`](editor::MasterDetailPage) with
//! messages and hand the returned effects to an
//! [`EntityService`](services::EntityService).

pub mod config;
pub mod editor;
pub mod error;
pub mod services;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::ConsoleConfig;
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
