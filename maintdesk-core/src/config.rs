//! Console configuration (`<config_dir>/maintdesk/config.json`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use maintdesk_client::RestClientConfig;

use crate::error::{CoreError, CoreResult};

/// Environment variable overriding [`ConsoleConfig::base_url`].
pub const BASE_URL_ENV: &str = "MAINTDESK_BASE_URL";

/// Page sizes offered by the items-per-page selector.
pub const ITEMS_PER_PAGE_OPTIONS: [u32; 4] = [5, 10, 20, 50];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsoleConfig {
    /// API root, e.g. `https://maint.example.com/api/`.
    pub base_url: String,
    pub items_per_page: u32,
    pub search_debounce_ms: u64,
    pub notification_ttl_ms: u64,
    pub request_timeout_secs: u64,
    /// Retries for list fetches.
    pub max_retries: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/".to_string(),
            items_per_page: 10,
            search_debounce_ms: 350,
            notification_ttl_ms: 5000,
            request_timeout_secs: 30,
            max_retries: 2,
        }
    }
}

impl ConsoleConfig {
    /// `<config_dir>/maintdesk/config.json`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("maintdesk").join("config.json"))
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoreError::StorageError(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| CoreError::ConfigError(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    /// Replace the base URL when an override is given and non-blank.
    pub fn apply_env_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            log::debug!("Base URL overridden by {BASE_URL_ENV}");
            self.base_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.items_per_page == 0 {
            return Err(CoreError::ConfigError(
                "itemsPerPage must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::ConfigError(
                "requestTimeoutSecs must be at least 1".to_string(),
            ));
        }
        self.rest_config().map(|_| ())
    }

    /// Transport settings derived from this config.
    pub fn rest_config(&self) -> CoreResult<RestClientConfig> {
        let config = RestClientConfig::new(&self.base_url)
            .map_err(|e| CoreError::ConfigError(e.to_string()))?;
        Ok(config
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_max_retries(self.max_retries))
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: ConsoleConfig =
            serde_json::from_str(r#"{ "baseUrl": "https://maint.example.com/api/", "itemsPerPage": 20 }"#)
                .unwrap_or_default();
        assert_eq!(config.base_url, "https://maint.example.com/api/");
        assert_eq!(config.items_per_page, 20);
        assert_eq!(config.search_debounce_ms, 350);
        assert_eq!(config.notification_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let zero_page = ConsoleConfig {
            items_per_page: 0,
            ..ConsoleConfig::default()
        };
        assert!(matches!(zero_page.validate(), Err(CoreError::ConfigError(_))));

        let bad_url = ConsoleConfig {
            base_url: "not a url".into(),
            ..ConsoleConfig::default()
        };
        assert!(matches!(bad_url.validate(), Err(CoreError::ConfigError(_))));

        assert!(ConsoleConfig::default().validate().is_ok());
    }

    #[test]
    fn env_override_ignores_blank_values() {
        let mut config = ConsoleConfig::default();
        config.apply_env_override(Some("   ".into()));
        assert_eq!(config.base_url, ConsoleConfig::default().base_url);
        config.apply_env_override(Some(" https://ops.example.com/api/ ".into()));
        assert_eq!(config.base_url, "https://ops.example.com/api/");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("maintdesk-missing-config-for-test.json");
        let config = ConsoleConfig::load_from(&path);
        assert_eq!(config.ok(), Some(ConsoleConfig::default()));
    }

    #[test]
    fn rest_config_carries_timeout_and_retries() {
        let config = ConsoleConfig {
            request_timeout_secs: 5,
            max_retries: 0,
            ..ConsoleConfig::default()
        };
        let rest = config.rest_config();
        assert!(matches!(
            rest,
            Ok(RestClientConfig { timeout, max_retries: 0, .. }) if timeout == Duration::from_secs(5)
        ));
    }
}
