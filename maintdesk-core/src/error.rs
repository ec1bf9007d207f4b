//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export transport error type
pub use maintdesk_client::ApiError;

/// Core layer error type
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A field value failed validation, or a value of the wrong kind was
    /// assigned to a field
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The entity has no field with this key
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Field edits are not accepted while a record is only displayed
    #[error("Record is read-only; switch to edit mode first")]
    ReadOnly,

    /// The requested mode change is not allowed from the current state
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Record not found in the current list page
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Configuration file or value is invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Storage layer error (config file I/O)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Credential storage (system keyring) error
    #[error("Credential error: {0}")]
    CredentialError(String),

    /// A background task running an effect panicked or was cancelled
    #[error("Background task failed: {0}")]
    TaskFailed(String),

    /// Transport error (converted from the REST client)
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.); used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_)
            | Self::UnknownField(_)
            | Self::ReadOnly
            | Self::InvalidTransition(_)
            | Self::RecordNotFound(_) => true,
            Self::Api(e) => e.is_expected(),
            _ => false,
        }
    }

    /// Message suitable for a notification toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(ApiError::Rejected { message, .. }) => message.clone(),
            Self::Api(e) if e.requires_login() => {
                "Session expired or missing. Please sign in again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_errors_follow_the_transport() {
        assert!(CoreError::ReadOnly.is_expected());
        assert!(CoreError::ValidationError("x".into()).is_expected());
        assert!(!CoreError::ConfigError("x".into()).is_expected());

        let rejected = CoreError::from(ApiError::Rejected {
            collection: "clients".into(),
            status: 422,
            message: "clientName is required".into(),
        });
        assert!(rejected.is_expected());
        assert_eq!(rejected.user_message(), "clientName is required");

        let network = CoreError::from(ApiError::NetworkError {
            collection: "clients".into(),
            detail: "connection refused".into(),
        });
        assert!(!network.is_expected());
    }

    #[test]
    fn login_errors_have_a_friendly_message() {
        let err = CoreError::from(ApiError::MissingCredential {
            collection: "vendors".into(),
        });
        assert!(err.user_message().contains("sign in"));
    }
}
