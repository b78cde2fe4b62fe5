//! Moviedesk - terminal client for the movie catalog
//!
//! This library provides the client side of a movie catalog service: account
//! login and registration, a persisted bearer-token session, a route guard
//! for the protected catalog screen, and catalog browsing and management.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: token/role persistence, expiry checks, and the shared session context
//! - `api`: HTTP client that attaches the bearer token to outgoing requests
//! - `auth`: login, registration, and user listing calls
//! - `movies`: catalog calls plus reshaping of backend movie records
//! - `guard`: routes and the navigation guard
//! - `views`: form and screen state driving the user-facing flows
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use moviedesk::{AuthService, Config, MemorySessionStore, SessionContext};
//! use moviedesk::api::ApiClient;
//! use moviedesk::auth::Credentials;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let session = SessionContext::new(Arc::new(MemorySessionStore::new()));
//!     let auth = AuthService::new(ApiClient::new(&config.api, session.clone())?);
//!     auth.login(&Credentials {
//!         username: "alice".to_string(),
//!         password: "secret".to_string(),
//!     })
//!     .await?;
//!     assert!(session.is_logged_in());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod guard;
pub mod movies;
pub mod session;
pub mod views;

// Re-export commonly used types
pub use api::ApiClient;
pub use auth::AuthService;
pub use config::Config;
pub use error::{MoviedeskError, Result};
pub use guard::{Navigation, Route, RouteGuard};
pub use movies::{Movie, MovieService};
pub use session::{MemorySessionStore, SessionContext, SessionStore};

#[cfg(test)]
pub mod test_utils;
