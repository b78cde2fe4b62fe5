//! Field validators and failure wording shared by the forms

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{server_message_of, status_of, MoviedeskError};

/// Shown when the backend cannot be reached (status 0).
pub const CONNECTIVITY_MESSAGE: &str =
    "Unable to connect to the server. Please check if the server is running.";

/// Returns `true` if the field has non-whitespace content.
pub fn required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Returns `true` if `value` looks like an email address.
///
/// Accepts the same shape HTML email inputs accept: a local part of
/// printable characters, `@`, and dot-separated DNS labels.
pub fn email(value: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .ok()
    });
    match pattern {
        Some(re) => re.is_match(value.trim()),
        None => value.contains('@'),
    }
}

/// How a failed call is classified for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Status 0: the backend was unreachable
    Connectivity,
    /// 401: credentials rejected
    Unauthorized,
    /// 400: request rejected, with the server's explanation if it gave one
    BadRequest(Option<String>),
    /// Anything else, with the best available explanation
    Other(String),
}

/// Classifies a failure by its HTTP status.
pub fn classify(err: &anyhow::Error) -> FailureKind {
    match status_of(err) {
        Some(0) => FailureKind::Connectivity,
        Some(401) => FailureKind::Unauthorized,
        Some(400) => FailureKind::BadRequest(server_message_of(err)),
        _ => FailureKind::Other(describe(err)),
    }
}

/// Best human-readable explanation of a failure: the server's message when
/// it sent one, otherwise the error itself.
pub fn describe(err: &anyhow::Error) -> String {
    if let Some(message) = server_message_of(err) {
        return message;
    }
    match err.downcast_ref::<MoviedeskError>() {
        Some(MoviedeskError::Validation(message)) => message.clone(),
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, message: Option<&str>) -> anyhow::Error {
        MoviedeskError::Api {
            status,
            message: message.map(str::to_string),
        }
        .into()
    }

    #[test]
    fn test_required() {
        assert!(required("alice"));
        assert!(!required(""));
        assert!(!required("   "));
    }

    #[test]
    fn test_email_pattern() {
        assert!(email("alice@example.com"));
        assert!(email("a.b+c@mail.example.co.uk"));
        assert!(email("root@localhost"));
        assert!(!email("alice"));
        assert!(!email("alice@"));
        assert!(!email("@example.com"));
        assert!(!email("alice@-example.com"));
        assert!(!email("a b@example.com"));
    }

    #[test]
    fn test_classify_by_status() {
        let offline: anyhow::Error = MoviedeskError::Connectivity("refused".to_string()).into();
        assert_eq!(classify(&offline), FailureKind::Connectivity);
        assert_eq!(classify(&api(401, None)), FailureKind::Unauthorized);
        assert_eq!(
            classify(&api(400, Some("username taken"))),
            FailureKind::BadRequest(Some("username taken".to_string()))
        );
        assert_eq!(classify(&api(400, None)), FailureKind::BadRequest(None));
        assert_eq!(
            classify(&api(500, Some("boom"))),
            FailureKind::Other("boom".to_string())
        );
    }

    #[test]
    fn test_describe_falls_back_to_error_text() {
        assert_eq!(describe(&api(503, None)), "API error (503): no message");
        let local: anyhow::Error = MoviedeskError::NotAuthenticated.into();
        assert_eq!(describe(&local), "No authentication token found");
    }
}
