//! Log sanitization utilities
//!
//! Keeps customer data (addresses, phone numbers, GST numbers) and bearer
//! tokens from being fully exposed in debug/error logs.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading token characters kept by [`mask_token`].
const TOKEN_VISIBLE_PREFIX: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a response body for logging.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a bearer token, keeping only a short prefix for correlation.
pub fn mask_token(token: &str) -> String {
    let visible = floor_char_boundary(token, TOKEN_VISIBLE_PREFIX);
    if token.len() <= TOKEN_VISIBLE_PREFIX * 2 {
        "****".to_string()
    } else {
        format!("{}****", &token[..visible])
    }
}
