//! Authentication calls against `/auth/*`

use reqwest::Method;
use serde::Serialize;

use crate::api::ApiClient;
use crate::error::Result;
use crate::session::{LoginResponse, Session};

/// Username/password pair submitted by the login form.
///
/// Never persisted; it lives for the duration of one submit.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Plain-text password, sent once over the wire
    pub password: String,
}

/// Payload of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// Desired account name
    pub username: String,
    /// Desired password
    pub password: String,
    /// Contact address
    pub email: String,
}

/// Login, registration, and user listing.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    /// Creates a service issuing requests through `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Authenticates and starts a session.
    ///
    /// On success the returned token and role replace whatever session was
    /// stored before; a missing role is stored as `USER`.
    ///
    /// # Errors
    ///
    /// Returns the API error for non-success statuses, or
    /// [`MoviedeskError::Validation`](crate::error::MoviedeskError::Validation)
    /// when the backend answers 2xx without a token.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        tracing::info!(username = %credentials.username, "Attempting login");
        let builder = self
            .client
            .request(Method::POST, "auth/login")
            .json(credentials);
        let response: LoginResponse = self.client.send_json(builder).await?;
        let session = self.client.session().begin(&response)?;
        tracing::info!(username = %credentials.username, "Login successful");
        Ok(session)
    }

    /// Creates an account. Returns the backend's plain-text confirmation.
    ///
    /// # Errors
    ///
    /// Returns the API error for non-success statuses.
    pub async fn register(&self, registration: &Registration) -> Result<String> {
        tracing::info!(
            username = %registration.username,
            email = %registration.email,
            "Attempting registration"
        );
        let builder = self
            .client
            .request(Method::POST, "auth/register")
            .json(registration);
        let message = self.client.send_text(builder).await?;
        tracing::info!(username = %registration.username, "Registration successful");
        Ok(message.trim().to_string())
    }

    /// Lists registered users. The shape is backend-defined and returned as
    /// loose JSON.
    ///
    /// # Errors
    ///
    /// Fails fast with
    /// [`MoviedeskError::NotAuthenticated`](crate::error::MoviedeskError::NotAuthenticated)
    /// when no token is stored; otherwise returns the API error.
    pub async fn get_users(&self) -> Result<serde_json::Value> {
        let builder = self.client.protected(Method::GET, "auth/get-users")?;
        self.client.send_value(builder).await
    }

    /// Ends the session locally. The backend is not told.
    ///
    /// # Errors
    ///
    /// Returns the session store's error if it cannot be cleared.
    pub fn logout(&self) -> Result<()> {
        self.client.session().logout()
    }

    /// Client this service issues requests through.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}
