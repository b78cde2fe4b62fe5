//! Session handling
//!
//! - `token`: reads the expiry claim out of bearer tokens
//! - `store`: persistence backends behind the [`SessionStore`] trait
//! - `context`: the injectable [`SessionContext`] every component consults

pub mod context;
pub mod store;
pub mod token;

use std::sync::Arc;

pub use context::{LoginResponse, Role, SessionContext, ADMIN_ROLE, DEFAULT_ROLE};
pub use store::{FileSessionStore, KeyringSessionStore, MemorySessionStore, Session, SessionStore};

use crate::config::{Config, SessionBackend};
use crate::error::Result;

/// Builds the session store selected by `config.session`.
///
/// # Errors
///
/// Returns an error if the file backend has no explicit path and no
/// platform data directory can be determined.
pub fn open_store(config: &Config) -> Result<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match config.session.backend {
        SessionBackend::File => {
            let path = match &config.session.path {
                Some(path) => path.clone(),
                None => FileSessionStore::default_path()?,
            };
            tracing::debug!(path = %path.display(), "Using file session store");
            Arc::new(FileSessionStore::new(path))
        }
        SessionBackend::Keyring => {
            let account = url::Url::parse(&config.api.base_url)
                .ok()
                .and_then(|u| {
                    u.host_str()
                        .map(|h| format!("{}:{}", h, u.port_or_known_default().unwrap_or(80)))
                })
                .unwrap_or_else(|| "default".to_string());
            tracing::debug!(account = %account, "Using keyring session store");
            Arc::new(KeyringSessionStore::new(account))
        }
        SessionBackend::Memory => {
            tracing::debug!("Using in-memory session store");
            Arc::new(MemorySessionStore::new())
        }
    };
    Ok(store)
}
