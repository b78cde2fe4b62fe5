//! Registration form

use crate::auth::{AuthService, Registration};
use crate::guard::Route;

use super::form::{self, FailureKind, CONNECTIVITY_MESSAGE};

/// Registration form state.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    /// Username field
    pub username: String,
    /// Password field
    pub password: String,
    /// Email field
    pub email: String,
    /// Error shown under the form; empty when there is none
    pub error: String,
    /// Confirmation text returned by the backend
    pub success_message: String,
}

impl RegisterForm {
    /// Creates a form pre-filled with the given fields.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// All fields are required and the email must look like one.
    pub fn is_valid(&self) -> bool {
        form::required(&self.username)
            && form::required(&self.password)
            && form::required(&self.email)
            && form::email(&self.email)
    }

    /// Submits the form.
    ///
    /// On success `success_message` holds the backend's confirmation and
    /// the login route is returned. On failure `error` is set and `None` is
    /// returned.
    pub async fn submit(&mut self, auth: &AuthService) -> Option<Route> {
        if !self.is_valid() {
            self.error = "Please fill in all required fields correctly.".to_string();
            return None;
        }

        let registration = Registration {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            email: self.email.trim().to_string(),
        };

        match auth.register(&registration).await {
            Ok(message) => {
                self.error.clear();
                self.success_message = message;
                Some(Route::Login)
            }
            Err(e) => {
                tracing::error!("Registration failed: {:#}", e);
                self.error = register_failure_message(&e);
                None
            }
        }
    }
}

fn register_failure_message(err: &anyhow::Error) -> String {
    match form::classify(err) {
        FailureKind::Connectivity => CONNECTIVITY_MESSAGE.to_string(),
        FailureKind::BadRequest(message) => {
            message.unwrap_or_else(|| "Invalid registration data.".to_string())
        }
        FailureKind::Unauthorized => format!("Registration failed: {}", form::describe(err)),
        FailureKind::Other(message) if message.is_empty() => {
            "Registration failed: Unknown error".to_string()
        }
        FailureKind::Other(message) => format!("Registration failed: {}", message),
    }
}
