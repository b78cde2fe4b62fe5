//! HTTP plumbing shared by the auth and movie services

pub mod client;

pub use client::{authorize, ApiClient};
