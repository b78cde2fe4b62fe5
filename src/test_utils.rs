//! Test utilities for Moviedesk
//!
//! This module provides common test utilities including token fabrication,
//! temporary directory management, and assertion helpers.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use std::path::PathBuf;
use tempfile::TempDir;

/// Build an unsigned JWT-shaped token around a raw JSON payload
///
/// The header and signature segments are fixed; only the payload matters
/// to the client, which never verifies signatures.
///
/// # Arguments
///
/// * `payload` - JSON text of the claims segment
pub fn jwt_with_payload(payload: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload);
    format!("{}.{}.signature", header, body)
}

/// Build a token whose `exp` claim is `exp` seconds since the epoch
pub fn jwt_with_exp(exp: i64) -> String {
    jwt_with_payload(&format!(r#"{{"sub":"alice","exp":{}}}"#, exp))
}

/// A token that expires an hour from now
pub fn valid_jwt() -> String {
    jwt_with_exp((Utc::now() + Duration::hours(1)).timestamp())
}

/// A token that expired an hour ago
pub fn expired_jwt() -> String {
    jwt_with_exp((Utc::now() - Duration::hours(1)).timestamp())
}

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: anyhow::Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = format!("{:#}", e);
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoviedeskError;

    #[test]
    fn test_jwt_has_three_segments() {
        let token = valid_jwt();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_jwt_payload_decodes() {
        let token = jwt_with_exp(42);
        let payload = token.split('.').nth(1).unwrap();
        let decoded = URL_SAFE_NO_PAD.decode(payload).unwrap();
        let claims: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(claims["exp"], 42);
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "session.json", "{}");
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: anyhow::Result<()> = Err(MoviedeskError::Config("bad url".to_string()).into());
        assert_error_contains(result, "bad url");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "error");
    }
}
