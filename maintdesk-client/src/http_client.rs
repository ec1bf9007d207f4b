//! Generic HTTP client tools
//!
//! Shared request processing for every collection: sending, logging,
//! status-code mapping and JSON decoding. Collections build their own
//! `RequestBuilder` (URL, auth, body) and hand it over here.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ApiError;
use crate::types::{EntityId, MessageBody};
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and response text.
    ///
    /// Transport failures, HTTP 429 and 502/503/504 are turned into errors here;
    /// every other status is returned to the caller for [`check_status`](Self::check_status).
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `collection` - collection name (for logging and error context)
    /// * `method_name` - request method name (for logging)
    /// * `url` - request URL (for logging)
    pub async fn execute_request(
        request_builder: RequestBuilder,
        collection: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), ApiError> {
        log::debug!("[{collection}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    collection: collection.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ApiError::NetworkError {
                    collection: collection.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{collection}] Response Status: {status_code}");

        // Read Retry-After before the body consumes the response
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{collection}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ApiError::RateLimited {
                collection: collection.to_string(),
                retry_after,
                raw_message: extract_message(&body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{collection}] Gateway error (HTTP {status_code})");
            return Err(ApiError::NetworkError {
                collection: collection.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError {
                collection: collection.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{collection}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Map a non-2xx status to the matching [`ApiError`] variant.
    ///
    /// Returns the body untouched for 2xx responses.
    pub fn check_status(
        status_code: u16,
        body: String,
        collection: &str,
        id: Option<EntityId>,
    ) -> Result<String, ApiError> {
        if (200..300).contains(&status_code) {
            return Ok(body);
        }

        let message = extract_message(&body);
        let collection = collection.to_string();
        let err = match status_code {
            401 => ApiError::Unauthorized {
                collection,
                raw_message: message,
            },
            403 => ApiError::PermissionDenied {
                collection,
                raw_message: message,
            },
            404 => ApiError::NotFound {
                collection,
                id,
                raw_message: message,
            },
            400..=499 => ApiError::Rejected {
                collection,
                status: status_code,
                message: message.unwrap_or_else(|| format!("Request rejected (HTTP {status_code})")),
            },
            _ => ApiError::ServerError {
                collection,
                status: status_code,
                message: message.unwrap_or_else(|| truncate_for_log(&body)),
            },
        };
        Err(err)
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ApiError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, collection: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{collection}] JSON parse failed: {e}");
            log::error!(
                "[{collection}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ApiError::ParseError {
                collection: collection.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Parse a record from a 2xx body that may instead carry `{message}`.
    ///
    /// Some endpoints answer a failed create with `200 {"message": "..."}`;
    /// that is reported as [`ApiError::Rejected`] rather than a parse error.
    pub fn parse_record<T>(
        status_code: u16,
        response_text: &str,
        collection: &str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        match serde_json::from_str::<T>(response_text) {
            Ok(record) => Ok(record),
            Err(_) => {
                if let Some(message) = extract_message(response_text) {
                    log::warn!("[{collection}] Server answered with message: {message}");
                    return Err(ApiError::Rejected {
                        collection: collection.to_string(),
                        status: status_code,
                        message,
                    });
                }
                Self::parse_json(response_text, collection)
            }
        }
    }

    /// Performs an HTTP request with retries.
    ///
    /// # Retry strategy
    /// - Only transient errors are retried (`NetworkError`, `Timeout`, `RateLimited`)
    /// - Exponential backoff: 100ms, 200ms, 400ms, ... (maximum 10 seconds)
    /// - `Retry-After` is honoured for 429, capped at 30 seconds
    /// - Pass `max_retries = 0` for mutations
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        collection: &str,
        method_name: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<(u16, String), ApiError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, collection, method_name, url).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder is single-use
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{collection}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, collection, method_name, url)
                    .await;
            };

            match Self::execute_request(req, collection, method_name, url).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        collection,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ApiError::NetworkError {
            collection: collection.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{message}` / `{error}` JSON or a short plain-text body.
fn extract_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<MessageBody>(body) {
        return parsed.into_message();
    }
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('{') || trimmed.starts_with('<') {
        None
    } else {
        Some(truncate_for_log(trimmed))
    }
}

/// Determine whether the error can be retried
fn is_retryable(error: &ApiError) -> bool {
    matches!(
        error,
        ApiError::NetworkError { .. } | ApiError::Timeout { .. } | ApiError::RateLimited { .. }
    )
}

/// `Retry-After` (capped at 30s) for rate limits, exponential backoff otherwise.
fn retry_delay(error: &ApiError, attempt: u32) -> Duration {
    if let ApiError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, 800ms, ... capped at 10 seconds
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- is_retryable ----

    #[test]
    fn retryable_transient_errors() {
        let network = ApiError::NetworkError {
            collection: "clients".into(),
            detail: "refused".into(),
        };
        let timeout = ApiError::Timeout {
            collection: "clients".into(),
            detail: "30s".into(),
        };
        let limited = ApiError::RateLimited {
            collection: "clients".into(),
            retry_after: None,
            raw_message: None,
        };
        assert!(is_retryable(&network));
        assert!(is_retryable(&timeout));
        assert!(is_retryable(&limited));
    }

    #[test]
    fn not_retryable_client_errors() {
        let missing = ApiError::MissingCredential {
            collection: "clients".into(),
        };
        let rejected = ApiError::Rejected {
            collection: "clients".into(),
            status: 422,
            message: "bad".into(),
        };
        let parse = ApiError::ParseError {
            collection: "clients".into(),
            detail: "eof".into(),
        };
        assert!(!is_retryable(&missing));
        assert!(!is_retryable(&rejected));
        assert!(!is_retryable(&parse));
    }

    // ---- backoff ----

    #[test]
    fn backoff_doubles_from_100ms() {
        assert_eq!(backoff_delay(0), Duration::from_millis(100));
        assert_eq!(backoff_delay(1), Duration::from_millis(200));
        assert_eq!(backoff_delay(3), Duration::from_millis(800));
    }

    #[test]
    fn backoff_capped_at_10s() {
        assert_eq!(backoff_delay(7), Duration::from_millis(10_000));
        assert_eq!(backoff_delay(63), Duration::from_millis(10_000));
    }

    #[test]
    fn retry_after_capped_at_30s() {
        let e = ApiError::RateLimited {
            collection: "clients".into(),
            retry_after: Some(120),
            raw_message: None,
        };
        assert_eq!(retry_delay(&e, 0), Duration::from_secs(30));
    }

    // ---- check_status ----

    #[test]
    fn check_status_passes_success_through() {
        let body = HttpUtils::check_status(201, "{}".into(), "clients", None);
        assert!(matches!(body.as_deref(), Ok("{}")));
    }

    #[test]
    fn check_status_maps_auth_failures() {
        let e = HttpUtils::check_status(401, String::new(), "clients", None);
        assert!(matches!(e, Err(ApiError::Unauthorized { .. })));
        let e = HttpUtils::check_status(403, String::new(), "clients", None);
        assert!(matches!(e, Err(ApiError::PermissionDenied { .. })));
    }

    #[test]
    fn check_status_keeps_id_on_not_found() {
        let e = HttpUtils::check_status(404, String::new(), "spares", Some(9));
        assert!(matches!(e, Err(ApiError::NotFound { id: Some(9), .. })));
    }

    #[test]
    fn check_status_uses_server_message_for_rejections() {
        let e = HttpUtils::check_status(
            409,
            r#"{"message":"Client already exists"}"#.into(),
            "clients",
            None,
        );
        match e {
            Err(ApiError::Rejected {
                status, message, ..
            }) => {
                assert_eq!(status, 409);
                assert_eq!(message, "Client already exists");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn check_status_maps_500_to_server_error() {
        let e = HttpUtils::check_status(500, "stack trace".into(), "clients", None);
        assert!(matches!(e, Err(ApiError::ServerError { status: 500, .. })));
    }

    // ---- parsing ----

    #[test]
    fn parse_json_invalid() {
        let result: Result<Vec<u32>, ApiError> = HttpUtils::parse_json("not json", "clients");
        assert!(matches!(result, Err(ApiError::ParseError { .. })));
    }

    #[test]
    fn parse_record_reports_message_bodies_as_rejections() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Row {
            id: u64,
        }
        let result: Result<Row, ApiError> =
            HttpUtils::parse_record(200, r#"{"message":"Duplicate GST number"}"#, "clients");
        assert!(
            matches!(&result, Err(ApiError::Rejected { message, .. }) if message == "Duplicate GST number"),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_record_accepts_records() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Row {
            id: u64,
        }
        let result: Result<Row, ApiError> = HttpUtils::parse_record(201, r#"{"id":4}"#, "clients");
        assert!(matches!(result, Ok(Row { id: 4 })));
    }

    #[test]
    fn extract_message_ignores_html_and_empty_bodies() {
        assert_eq!(extract_message(""), None);
        assert_eq!(extract_message("<html>502</html>"), None);
        assert_eq!(extract_message("quota exhausted").as_deref(), Some("quota exhausted"));
    }
}
