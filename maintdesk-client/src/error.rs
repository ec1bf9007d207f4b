use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Unified error type for every collection request.
///
/// Each variant carries the `collection` the request targeted (e.g. `"clients"`)
/// plus variant-specific context. All variants are serializable so front ends
/// can surface them as structured notifications.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): connection failures and 502/503/504
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): HTTP 429
///
/// Only list fetches are retried; mutations never are.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// No bearer credential is available. Raised before any network I/O.
    MissingCredential {
        /// Collection the request targeted.
        collection: String,
    },

    /// The server rejected the credential (HTTP 401).
    Unauthorized {
        /// Collection the request targeted.
        collection: String,
        /// Server message, if any.
        raw_message: Option<String>,
    },

    /// The credential is valid but lacks permission (HTTP 403).
    PermissionDenied {
        /// Collection the request targeted.
        collection: String,
        /// Server message, if any.
        raw_message: Option<String>,
    },

    /// The addressed record or collection does not exist (HTTP 404).
    NotFound {
        /// Collection the request targeted.
        collection: String,
        /// Record id, when the request addressed a single record.
        id: Option<EntityId>,
        /// Server message, if any.
        raw_message: Option<String>,
    },

    /// The server refused the request body or parameters (other 4xx, or a
    /// `{message}` body in place of a record).
    Rejected {
        /// Collection the request targeted.
        collection: String,
        /// HTTP status code.
        status: u16,
        /// Server-provided explanation.
        message: String,
    },

    /// The server failed while handling the request (5xx other than 502–504).
    ServerError {
        /// Collection the request targeted.
        collection: String,
        /// HTTP status code.
        status: u16,
        /// Server-provided explanation or truncated body.
        message: String,
    },

    /// A transport-level failure (connection refused, DNS, 502/503/504).
    NetworkError {
        /// Collection the request targeted.
        collection: String,
        /// Error details.
        detail: String,
    },

    /// The request timed out.
    Timeout {
        /// Collection the request targeted.
        collection: String,
        /// Error details.
        detail: String,
    },

    /// HTTP 429.
    RateLimited {
        /// Collection the request targeted.
        collection: String,
        /// `Retry-After` in seconds, if the server sent one.
        retry_after: Option<u64>,
        /// Server message, if any.
        raw_message: Option<String>,
    },

    /// The response body could not be decoded.
    ParseError {
        /// Collection the request targeted.
        collection: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// The client could not be constructed (bad base URL, TLS backend failure).
    InvalidConfig {
        /// What is wrong.
        detail: String,
    },
}

impl ApiError {
    /// Whether the failure is expected behaviour (user input, missing login,
    /// stale record), used for log levelling.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. }
                | Self::Unauthorized { .. }
                | Self::PermissionDenied { .. }
                | Self::NotFound { .. }
                | Self::Rejected { .. }
        )
    }

    /// Whether the user must sign in again before retrying.
    #[must_use]
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. } | Self::Unauthorized { .. }
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredential { collection } => {
                write!(f, "[{collection}] Not signed in: no credential available")
            }
            Self::Unauthorized {
                collection,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{collection}] Unauthorized: {msg}")
                } else {
                    write!(f, "[{collection}] Unauthorized")
                }
            }
            Self::PermissionDenied {
                collection,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{collection}] Permission denied: {msg}")
                } else {
                    write!(f, "[{collection}] Permission denied")
                }
            }
            Self::NotFound { collection, id, .. } => match id {
                Some(id) => write!(f, "[{collection}] Record {id} not found"),
                None => write!(f, "[{collection}] Not found"),
            },
            Self::Rejected {
                collection,
                message,
                ..
            } => write!(f, "[{collection}] {message}"),
            Self::ServerError {
                collection,
                status,
                message,
            } => write!(f, "[{collection}] Server error (HTTP {status}): {message}"),
            Self::NetworkError { collection, detail } => {
                write!(f, "[{collection}] Network error: {detail}")
            }
            Self::Timeout { collection, detail } => {
                write!(f, "[{collection}] Request timeout: {detail}")
            }
            Self::RateLimited {
                collection,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{collection}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{collection}] Rate limited")
                }
            }
            Self::ParseError { collection, detail } => {
                write!(f, "[{collection}] Parse error: {detail}")
            }
            Self::InvalidConfig { detail } => write!(f, "Invalid client configuration: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
