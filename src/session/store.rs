//! Session persistence backends
//!
//! A session is two strings, a bearer token and a role, that must survive
//! between CLI invocations. [`SessionStore`] is the only way the rest of
//! the crate reads or writes them; the backends below decide where they
//! live.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{MoviedeskError, Result};

/// Key under which the bearer token is persisted
pub const TOKEN_KEY: &str = "auth_token";

/// Key under which the role string is persisted
pub const ROLE_KEY: &str = "user_role";

/// A persisted login: the bearer token and the role the backend granted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token
    #[serde(rename = "auth_token", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Role string as granted by the backend (`USER`, `ADMIN`, ...)
    #[serde(rename = "user_role", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Session {
    /// Returns `true` when neither field is set.
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.role.is_none()
    }
}

/// Accessor for the persisted session.
///
/// Implementations must be cheap to call repeatedly: the session context
/// re-reads the store on every check instead of caching.
pub trait SessionStore: Send + Sync {
    /// Reads the whole persisted session. An absent session is
    /// `Ok(Session::default())`, not an error.
    fn load(&self) -> Result<Session>;

    /// Replaces the persisted session.
    fn save(&self, session: &Session) -> Result<()>;

    /// Removes both fields. Clearing an empty store is a no-op.
    fn clear(&self) -> Result<()>;

    /// Stored bearer token, if any.
    fn token(&self) -> Result<Option<String>> {
        Ok(self.load()?.token)
    }

    /// Stored role string, if any.
    fn role(&self) -> Result<Option<String>> {
        Ok(self.load()?.role)
    }
}

// ---------------------------------------------------------------------------
// MemorySessionStore
// ---------------------------------------------------------------------------

/// Session held in process memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Session>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Session> {
        let guard = self
            .inner
            .read()
            .map_err(|_| MoviedeskError::SessionStore("session lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| MoviedeskError::SessionStore("session lock poisoned".to_string()))?;
        *guard = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.save(&Session::default())
    }
}

// ---------------------------------------------------------------------------
// FileSessionStore
// ---------------------------------------------------------------------------

/// Session persisted as a small JSON document on disk.
///
/// The file holds the two keys [`TOKEN_KEY`] and [`ROLE_KEY`]. Clearing the
/// session deletes the file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default session file in the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns [`MoviedeskError::SessionStore`] if no home directory can be
    /// determined.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "moviedesk").ok_or_else(|| {
            MoviedeskError::SessionStore("unable to determine data directory".to_string())
        })?;
        Ok(dirs.data_dir().join("session.json"))
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Session::default()),
            Err(e) => return Err(MoviedeskError::Io(e).into()),
        };
        if contents.trim().is_empty() {
            return Ok(Session::default());
        }
        let session = serde_json::from_str(&contents).map_err(|e| {
            MoviedeskError::SessionStore(format!(
                "corrupt session file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(session)
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(session)?;
        write_private(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Session file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MoviedeskError::Io(e).into()),
        }
    }
}

/// Writes `contents` to `path`, readable by the owner only on unix.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // mode() only applies to newly created files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents.as_bytes())
}

// ---------------------------------------------------------------------------
// KeyringSessionStore
// ---------------------------------------------------------------------------

/// Session persisted in the OS native keyring as a JSON document.
#[derive(Debug, Clone)]
pub struct KeyringSessionStore {
    account: String,
}

impl KeyringSessionStore {
    /// Keyring service name shared by all Moviedesk sessions.
    const SERVICE: &'static str = "moviedesk-session";

    /// Creates a store for the given keyring account (usually the backend
    /// host, so that several backends can keep separate sessions).
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(Self::SERVICE, &self.account)
            .map_err(|e| MoviedeskError::Keyring(e).into())
    }
}

impl SessionStore for KeyringSessionStore {
    fn load(&self) -> Result<Session> {
        match self.entry()?.get_password() {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(keyring::Error::NoEntry) => Ok(Session::default()),
            Err(e) => Err(MoviedeskError::Keyring(e).into()),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.entry()?
            .set_password(&json)
            .map_err(MoviedeskError::Keyring)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(MoviedeskError::Keyring(e).into()),
        }
    }
}
