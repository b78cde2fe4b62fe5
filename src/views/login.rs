//! Login form

use crate::auth::{AuthService, Credentials};
use crate::error::MoviedeskError;
use crate::guard::Route;

use super::form::{self, FailureKind, CONNECTIVITY_MESSAGE};

/// Login form state.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Username field
    pub username: String,
    /// Password field
    pub password: String,
    /// Error shown under the form; empty when there is none
    pub error: String,
}

impl LoginForm {
    /// Creates a form pre-filled with the given fields.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            error: String::new(),
        }
    }

    /// Both fields are required.
    pub fn is_valid(&self) -> bool {
        form::required(&self.username) && form::required(&self.password)
    }

    /// Submits the form.
    ///
    /// Returns the route to navigate to on success. On failure the form's
    /// `error` describes what went wrong and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # tokio_test::block_on(async {
    /// use std::sync::Arc;
    /// use moviedesk::views::LoginForm;
    /// use moviedesk::{ApiClient, AuthService, Config, MemorySessionStore, SessionContext};
    ///
    /// let session = SessionContext::new(Arc::new(MemorySessionStore::new()));
    /// let auth = AuthService::new(ApiClient::new(&Config::default().api, session).unwrap());
    ///
    /// // Blank fields never reach the network
    /// let mut form = LoginForm::new("alice", "");
    /// assert_eq!(form.submit(&auth).await, None);
    /// assert_eq!(form.error, "Please fill in all required fields.");
    /// # });
    /// ```
    pub async fn submit(&mut self, auth: &AuthService) -> Option<Route> {
        if !self.is_valid() {
            self.error = "Please fill in all required fields.".to_string();
            return None;
        }

        let credentials = Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        };

        match auth.login(&credentials).await {
            Ok(_) => {
                self.error.clear();
                Some(Route::Movies)
            }
            Err(e) => {
                tracing::error!("Login failed: {:#}", e);
                self.error = login_failure_message(&e);
                None
            }
        }
    }
}

fn login_failure_message(err: &anyhow::Error) -> String {
    match form::classify(err) {
        FailureKind::Connectivity => CONNECTIVITY_MESSAGE.to_string(),
        FailureKind::Unauthorized => "Invalid username or password".to_string(),
        FailureKind::BadRequest(message) => {
            message.unwrap_or_else(|| "Invalid login data".to_string())
        }
        FailureKind::Other(_) => {
            // a 2xx without a token surfaces its own wording
            match err.downcast_ref::<MoviedeskError>() {
                Some(MoviedeskError::Validation(message)) => message.clone(),
                _ => "Login failed. Please try again.".to_string(),
            }
        }
    }
}
