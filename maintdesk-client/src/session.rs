//! Session context and request interception
//!
//! The bearer credential is never read inline at call sites: collections ask
//! the [`AuthInterceptor`], which consults an injected [`SessionContext`].

use std::sync::{Arc, RwLock};

use reqwest::RequestBuilder;

use crate::error::{ApiError, Result};
use crate::utils::log_sanitizer::mask_token;

/// Source of the signed-in user's credential.
///
/// Platform implementation:
/// - Tests / scripting: [`StaticSession`]
/// - TUI: keyring-backed session
pub trait SessionContext: Send + Sync {
    /// The current bearer credential, if signed in.
    fn get_credential(&self) -> Option<String>;

    /// Whether a usable credential is present.
    fn is_authenticated(&self) -> bool {
        self.get_credential()
            .is_some_and(|token| !token.trim().is_empty())
    }
}

/// In-memory session holding a replaceable token.
#[derive(Debug, Default)]
pub struct StaticSession {
    token: RwLock<Option<String>>,
}

impl StaticSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// A session with no credential; every request fails with
    /// [`ApiError::MissingCredential`].
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = Some(token.into()),
            Err(poisoned) => *poisoned.into_inner() = Some(token.into()),
        }
    }

    pub fn clear(&self) {
        match self.token.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}

impl SessionContext for StaticSession {
    fn get_credential(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// Attaches the bearer credential to outgoing requests.
#[derive(Clone)]
pub struct AuthInterceptor {
    session: Arc<dyn SessionContext>,
}

impl AuthInterceptor {
    pub fn new(session: Arc<dyn SessionContext>) -> Self {
        Self { session }
    }

    /// Add `Authorization: Bearer ...`, or short-circuit without any network
    /// I/O when the session has no credential.
    pub fn authorize(&self, builder: RequestBuilder, collection: &str) -> Result<RequestBuilder> {
        let Some(token) = self
            .session
            .get_credential()
            .filter(|token| !token.trim().is_empty())
        else {
            log::warn!("[{collection}] Request blocked: no credential in session");
            return Err(ApiError::MissingCredential {
                collection: collection.to_string(),
            });
        };
        log::debug!("[{collection}] Authorization: Bearer {}", mask_token(&token));
        Ok(builder.bearer_auth(token))
    }

    pub fn session(&self) -> &Arc<dyn SessionContext> {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_session_reports_authentication() {
        let session = StaticSession::new("token-123");
        assert!(session.is_authenticated());
        session.clear();
        assert!(!session.is_authenticated());
        session.set_token("   ");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn interceptor_blocks_anonymous_requests() {
        let interceptor = AuthInterceptor::new(Arc::new(StaticSession::anonymous()));
        let builder = reqwest::Client::new().get("http://127.0.0.1:9/clients");
        let result = interceptor.authorize(builder, "clients");
        assert!(matches!(
            result,
            Err(ApiError::MissingCredential { ref collection }) if collection == "clients"
        ));
    }

    #[test]
    fn interceptor_attaches_bearer_header() {
        let interceptor = AuthInterceptor::new(Arc::new(StaticSession::new("abc-def-ghi")));
        let builder = reqwest::Client::new().get("http://127.0.0.1:9/clients");
        let request = interceptor
            .authorize(builder, "clients")
            .ok()
            .and_then(|b| b.build().ok());
        let header = request
            .as_ref()
            .and_then(|r| r.headers().get("authorization"))
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        assert_eq!(header.as_deref(), Some("Bearer abc-def-ghi"));
    }
}
