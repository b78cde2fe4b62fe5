//! Authentication wrapper
//!
//! Thin layer over `/auth/login`, `/auth/register`, and `/auth/get-users`.
//! Successful logins are recorded in the [`SessionContext`](crate::session::SessionContext)
//! held by the [`ApiClient`](crate::api::ApiClient).

pub mod service;

pub use service::{AuthService, Credentials, Registration};
