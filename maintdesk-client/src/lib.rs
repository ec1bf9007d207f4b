//! # maintdesk-client
//!
//! REST transport for the maintdesk maintenance console: paginated
//! collections with create/update/delete, a bearer-credential interceptor
//! fed by an injected session, and uniform error mapping.
//!
//! ## Wire contract
//!
//! | Operation | Request | Response |
//! |-----------|---------|----------|
//! | List | `GET /<collection>?page={0-indexed}&limit={n}&search={term}` | `{ data, page, totalPages, totalRecords }` |
//! | Create | `POST /<collection>` (body without `id`) | created record, or `{ message }` |
//! | Update | `PUT /<collection>/{id}` (body without `id`) | updated record |
//! | Delete | `DELETE /<collection>/{id}` | 2xx |
//!
//! Pages are **1-indexed** in [`PageQuery`] and [`PaginatedResponse`]; the
//! conversion to the 0-indexed wire format happens inside this crate.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use maintdesk_client::{CollectionApi, PageQuery, RestClient, RestClientConfig, StaticSession};
//!
//! #[derive(serde::Deserialize)]
//! struct Client {
//!     id: u64,
//!     #[serde(rename = "clientName")]
//!     client_name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RestClientConfig::new("https://maint.example.com/api/")?;
//!     let session = Arc::new(StaticSession::new("bearer-token"));
//!     let client = RestClient::new(config, session)?;
//!
//!     let clients = client.collection::<Client>("clients");
//!     let page = clients.fetch_page(&PageQuery::new(1, 10, "acme")).await?;
//!     for c in &page.items {
//!         println!("{} {}", c.id, c.client_name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ApiError>`](ApiError):
//!
//! - [`ApiError::MissingCredential`]: no credential; raised before any network I/O
//! - [`ApiError::Unauthorized`]: the server rejected the credential
//! - [`ApiError::Rejected`]: validation/conflict, carrying the server's `message`
//! - [`ApiError::NetworkError`] / [`ApiError::Timeout`] / [`ApiError::RateLimited`]: transient
//!
//! Transient errors on list fetches are retried with exponential backoff.

mod error;
mod http_client;
mod rest;
mod session;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ApiError, Result};

// Re-export transport
pub use rest::{RestClient, RestClientConfig, RestCollection};
pub use session::{AuthInterceptor, SessionContext, StaticSession};

// Re-export core trait
pub use traits::CollectionApi;

// Re-export types
pub use types::{EntityId, PageQuery, PaginatedResponse};

// Re-export utils module
pub use utils::log_sanitizer;
