//! HTTP client for the catalog backend
//!
//! Every request the crate sends is built by [`ApiClient::request`], which
//! attaches the stored bearer token when one exists. Protected calls go
//! through [`ApiClient::protected`] instead, which refuses to build a
//! request at all when no token is stored.
//!
//! Responses are mapped onto [`MoviedeskError`]:
//!
//! - transport failures (refused connection, DNS, timeout) become
//!   [`MoviedeskError::Connectivity`], which the views report as status 0
//! - non-success statuses become [`MoviedeskError::Api`] with the server's
//!   `message` passed through when the body has one
//!
//! There is no retry, no token refresh, and no automatic logout on 401.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{MoviedeskError, Result};
use crate::session::SessionContext;

/// Attaches `Authorization: Bearer <token>` when a token is given.
///
/// This is the request interceptor: it is applied to every request the
/// client builds, regardless of which service issued it.
pub fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
        None => builder,
    }
}

/// Shared client for auth and movie calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Creates a client for the backend described by `api`.
    ///
    /// # Errors
    ///
    /// Returns [`MoviedeskError::Http`] if the underlying HTTP client cannot
    /// be constructed (e.g. TLS backend initialization failure).
    pub fn new(api: &ApiConfig, session: SessionContext) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_seconds))
            .default_headers(headers)
            .user_agent(concat!("moviedesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MoviedeskError::Http)?;

        Ok(Self {
            http,
            base_url: api.base().to_string(),
            session,
        })
    }

    /// Session this client authorizes requests with.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Builds a request, attaching the bearer token if one is stored.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        authorize(builder, self.session.bearer().as_deref())
    }

    /// Builds a request for an endpoint that requires a session.
    ///
    /// # Errors
    ///
    /// Returns [`MoviedeskError::NotAuthenticated`] before any network I/O
    /// when no token is stored.
    pub fn protected(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.session.require_bearer()?;
        let builder = self.http.request(method, self.url(path));
        Ok(authorize(builder, Some(&token)))
    }

    /// Sends a request and returns the response body as text.
    ///
    /// # Errors
    ///
    /// See the module documentation for the error mapping.
    pub async fn send_text(&self, builder: RequestBuilder) -> Result<String> {
        let response = self.execute(builder).await?;
        let body = response.text().await.map_err(|e| {
            MoviedeskError::Connectivity(format!("failed to read response body: {}", e))
        })?;
        Ok(body)
    }

    /// Sends a request and decodes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// See the module documentation; a body that does not decode into `T`
    /// yields [`MoviedeskError::Serialization`].
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let body = self.send_text(builder).await?;
        let value = serde_json::from_str(&body).map_err(MoviedeskError::Serialization)?;
        Ok(value)
    }

    /// Sends a request and returns the body as loose JSON.
    ///
    /// An empty body is `Value::Null`; a body that is not JSON at all is
    /// returned as a JSON string.
    ///
    /// # Errors
    ///
    /// See the module documentation for the error mapping.
    pub async fn send_value(&self, builder: RequestBuilder) -> Result<serde_json::Value> {
        let body = self.send_text(builder).await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(MoviedeskError::Http)?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "Sending request");

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::warn!(%method, %url, "Request failed: {}", e);
            MoviedeskError::Connectivity(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "Received response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        tracing::error!(
            %method,
            %url,
            status = status.as_u16(),
            "Backend returned error: {}",
            message.as_deref().unwrap_or("<empty body>")
        );
        Err(MoviedeskError::Api {
            status: status.as_u16(),
            message,
        }
        .into())
    }
}

/// Pulls a human-readable message out of an error body.
///
/// JSON bodies contribute their `message` (or `error`) field; other
/// non-empty bodies are used verbatim.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        Ok(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}
