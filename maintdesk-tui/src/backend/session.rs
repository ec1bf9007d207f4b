//! Keyring-backed session
//!
//! Stores the bearer token in the system keyring:
//! - Windows: Credential Manager
//! - macOS: Keychain
//! - Linux: Secret Service (GNOME Keyring / KWallet)

use keyring::Entry;

use maintdesk_client::SessionContext;
use maintdesk_core::{CoreError, CoreResult};

const SERVICE_NAME: &str = "maintdesk";
const TOKEN_ENTRY: &str = "session-token";

/// Takes precedence over the keyring when set and non-blank.
pub const TOKEN_ENV: &str = "MAINTDESK_TOKEN";

/// Session read once at startup and served from memory afterwards.
pub struct KeyringSession {
    token: Option<String>,
}

impl KeyringSession {
    pub fn load() -> Self {
        Self::resolve(std::env::var(TOKEN_ENV).ok(), read_keyring)
    }

    fn resolve(env: Option<String>, stored: impl FnOnce() -> CoreResult<Option<String>>) -> Self {
        let token = match env.filter(|t| !t.trim().is_empty()) {
            Some(token) => {
                log::info!("Using session token from {TOKEN_ENV}");
                Some(token)
            }
            None => stored().unwrap_or_else(|e| {
                log::warn!("Could not read session token: {e}");
                None
            }),
        };
        if token.is_none() {
            log::warn!("No session token; run `maintdesk login` to sign in");
        }
        Self { token }
    }

    pub fn store(token: &str) -> CoreResult<()> {
        entry()?
            .set_password(token)
            .map_err(|e| CoreError::CredentialError(format!("Failed to save: {e}")))?;
        log::info!("Session token stored");
        Ok(())
    }

    pub fn sign_out() -> CoreResult<()> {
        match entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                log::info!("Session token removed");
                Ok(())
            }
            Err(e) => Err(CoreError::CredentialError(format!("Failed to delete: {e}"))),
        }
    }
}

impl SessionContext for KeyringSession {
    fn get_credential(&self) -> Option<String> {
        self.token.clone()
    }
}

fn entry() -> CoreResult<Entry> {
    Entry::new(SERVICE_NAME, TOKEN_ENTRY)
        .map_err(|e| CoreError::CredentialError(format!("Failed to create entry: {e}")))
}

fn read_keyring() -> CoreResult<Option<String>> {
    match entry()?.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(CoreError::CredentialError(format!("Failed to load: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_token_wins() {
        let session = KeyringSession::resolve(Some("env-token".into()), || {
            Ok(Some("stored".into()))
        });
        assert_eq!(session.get_credential().as_deref(), Some("env-token"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn blank_environment_falls_back_to_keyring() {
        let session =
            KeyringSession::resolve(Some("  ".into()), || Ok(Some("stored".into())));
        assert_eq!(session.get_credential().as_deref(), Some("stored"));
    }

    #[test]
    fn keyring_failure_means_signed_out() {
        let session = KeyringSession::resolve(None, || {
            Err(CoreError::CredentialError("locked".into()))
        });
        assert!(!session.is_authenticated());
    }
}
