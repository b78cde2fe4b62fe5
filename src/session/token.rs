//! Bearer token inspection
//!
//! The client never verifies token signatures; it only reads the `exp`
//! claim from the payload segment to decide whether a stored token is still
//! worth sending. Anything that does not look like a JWT with a numeric
//! `exp` is treated as expired.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Utc};

/// Returns the expiry embedded in a JWT-style bearer token.
///
/// The payload segment may be base64url or standard base64, with or
/// without padding. Returns `None` when the token has no payload segment,
/// the segment is not valid base64, the payload is not a JSON object, or
/// `exp` is missing or not numeric. A claim beyond the representable range
/// is clamped to [`DateTime::MAX_UTC`] or [`DateTime::MIN_UTC`].
///
/// # Examples
///
/// ```
/// use moviedesk::session::token::expiry;
///
/// assert!(expiry("not-a-jwt").is_none());
/// // {"exp":4102444800}
/// let token = "x.eyJleHAiOjQxMDI0NDQ4MDB9.sig";
/// assert_eq!(expiry(token).unwrap().timestamp(), 4_102_444_800);
/// ```
pub fn expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = decode_segment(payload)?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?.as_f64()?;
    if !exp.is_finite() {
        return None;
    }
    // out-of-range claims clamp to the representable extremes
    let millis = (exp * 1000.0) as i64;
    DateTime::from_timestamp_millis(millis).or(Some(if exp > 0.0 {
        DateTime::<Utc>::MAX_UTC
    } else {
        DateTime::<Utc>::MIN_UTC
    }))
}

/// Returns `true` iff the token's expiry is strictly after `now`.
pub fn is_unexpired(token: &str, now: DateTime<Utc>) -> bool {
    match expiry(token) {
        Some(expires_at) => expires_at > now,
        None => false,
    }
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let trimmed = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{jwt_with_exp, jwt_with_payload};
    use chrono::Duration;

    #[test]
    fn test_expiry_reads_exp_claim() {
        let token = jwt_with_exp(1_900_000_000);
        assert_eq!(expiry(&token).unwrap().timestamp(), 1_900_000_000);
    }

    #[test]
    fn test_fractional_exp_is_honoured() {
        let token = jwt_with_payload(r#"{"exp":1900000000.5}"#);
        assert_eq!(
            expiry(&token).unwrap().timestamp_millis(),
            1_900_000_000_500
        );
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let now = Utc::now();
        let token = jwt_with_exp((now - Duration::seconds(5)).timestamp());
        assert!(!is_unexpired(&token, now));
    }

    #[test]
    fn test_expiry_equal_to_now_is_expired() {
        let now = DateTime::from_timestamp(1_800_000_000, 0).unwrap();
        let token = jwt_with_exp(1_800_000_000);
        assert!(!is_unexpired(&token, now));
    }

    #[test]
    fn test_future_expiry_is_valid() {
        let now = Utc::now();
        let token = jwt_with_exp((now + Duration::hours(1)).timestamp());
        assert!(is_unexpired(&token, now));
    }

    #[test]
    fn test_padded_standard_base64_payload() {
        // standard alphabet with explicit padding, as some issuers emit
        let payload = STANDARD_NO_PAD.encode(r#"{"sub":"a?>","exp":4102444800}"#);
        let token = format!("h.{}==.s", payload);
        assert_eq!(expiry(&token).unwrap().timestamp(), 4_102_444_800);
    }

    #[test]
    fn test_far_future_expiry_is_valid() {
        let now = Utc::now();
        let token = jwt_with_payload(r#"{"exp":1e300}"#);
        assert_eq!(expiry(&token), Some(DateTime::<Utc>::MAX_UTC));
        assert!(is_unexpired(&token, now));

        let token = jwt_with_payload(r#"{"exp":1e15}"#);
        assert!(is_unexpired(&token, now));
    }

    #[test]
    fn test_far_past_expiry_is_expired() {
        let token = jwt_with_payload(r#"{"exp":-1e300}"#);
        assert_eq!(expiry(&token), Some(DateTime::<Utc>::MIN_UTC));
        assert!(!is_unexpired(&token, Utc::now()));
    }

    #[test]
    fn test_malformed_tokens_never_validate() {
        let now = Utc::now();
        let cases = [
            "".to_string(),
            "no-dots-at-all".to_string(),
            "header.%%%not-base64%%%.sig".to_string(),
            format!("h.{}.s", URL_SAFE_NO_PAD.encode("not json")),
            format!("h.{}.s", URL_SAFE_NO_PAD.encode("[1,2,3]")),
            jwt_with_payload(r#"{"sub":"alice"}"#),
            jwt_with_payload(r#"{"exp":"tomorrow"}"#),
            jwt_with_payload(r#"{"exp":null}"#),
        ];
        for token in cases {
            assert!(expiry(&token).is_none(), "expected no expiry for {token:?}");
            assert!(!is_unexpired(&token, now));
        }
    }
}
