//! Injectable session context
//!
//! [`SessionContext`] is the one object components consult for login state.
//! It holds no state of its own: every query re-reads the backing
//! [`SessionStore`], so two contexts over the same store always agree.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::store::{Session, SessionStore};
use super::token;
use crate::error::{MoviedeskError, Result};

/// Role string granted to sessions whose login response omits one.
pub const DEFAULT_ROLE: &str = "USER";

/// Role string that unlocks catalog mutations.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Body returned by a successful `POST /auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token; absent when the backend refused to issue one
    #[serde(default)]
    pub token: Option<String>,
    /// Role granted to the user
    #[serde(default)]
    pub role: Option<String>,
}

/// Display form of a stored role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// `USER`
    User,
    /// `ADMIN`
    Admin,
    /// Anything else the backend sent, kept verbatim
    Other(String),
}

impl Role {
    /// Classifies a raw role string. Matching is exact; `admin` is `Other`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            ADMIN_ROLE => Self::Admin,
            DEFAULT_ROLE => Self::User,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str(DEFAULT_ROLE),
            Self::Admin => f.write_str(ADMIN_ROLE),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// Login state shared by the API client, route guard, and views.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Creates a context over `store`.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Records a successful login, replacing any previous session.
    ///
    /// The role defaults to [`DEFAULT_ROLE`] when the response has none.
    ///
    /// # Errors
    ///
    /// Returns [`MoviedeskError::Validation`] if the response carries no
    /// token (nothing is written in that case), or the store's error if the
    /// write fails.
    pub fn begin(&self, response: &LoginResponse) -> Result<Session> {
        let token = response
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                MoviedeskError::Validation(
                    "Login failed: No authentication token received".to_string(),
                )
            })?;

        let role = response
            .role
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());

        let session = Session {
            token: Some(token.to_string()),
            role: Some(role),
        };
        self.store.save(&session)?;
        tracing::info!(role = ?session.role, "Session started");
        Ok(session)
    }

    /// Clears token and role. No server call is made.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the session cannot be removed.
    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("Session cleared");
        Ok(())
    }

    /// Current persisted session; read failures yield an empty session.
    pub fn snapshot(&self) -> Session {
        match self.store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Unable to read session: {:#}", e);
                Session::default()
            }
        }
    }

    /// Stored bearer token, if any.
    pub fn bearer(&self) -> Option<String> {
        match self.store.token() {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Unable to read session token: {:#}", e);
                None
            }
        }
    }

    fn stored_role(&self) -> Option<String> {
        match self.store.role() {
            Ok(role) => role,
            Err(e) => {
                tracing::warn!("Unable to read session role: {:#}", e);
                None
            }
        }
    }

    /// Stored bearer token, failing fast when absent.
    ///
    /// # Errors
    ///
    /// Returns [`MoviedeskError::NotAuthenticated`] when no token is stored.
    pub fn require_bearer(&self) -> Result<String> {
        self.bearer()
            .ok_or_else(|| MoviedeskError::NotAuthenticated.into())
    }

    /// Stored role, classified for display.
    pub fn role(&self) -> Option<Role> {
        self.stored_role().as_deref().map(Role::from_raw)
    }

    /// `true` iff a token is stored and its expiry is in the future.
    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in_at(Utc::now())
    }

    /// [`is_logged_in`](Self::is_logged_in) against an explicit clock.
    pub fn is_logged_in_at(&self, now: DateTime<Utc>) -> bool {
        match self.bearer() {
            Some(token) => token::is_unexpired(&token, now),
            None => false,
        }
    }

    /// `true` iff the stored role is exactly `ADMIN`.
    pub fn is_admin(&self) -> bool {
        self.stored_role().as_deref() == Some(ADMIN_ROLE)
    }

    /// Expiry of the stored token, if it carries a readable one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.bearer().as_deref().and_then(token::expiry)
    }
}
