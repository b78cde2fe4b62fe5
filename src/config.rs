//! Configuration management for Moviedesk
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{MoviedeskError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Moviedesk
///
/// Holds where the catalog backend lives, which OMDb key is forwarded when
/// importing movies, and where the session is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// OMDb settings forwarded to the backend on import
    #[serde(default)]
    pub omdb: OmdbConfig,
    /// Session persistence settings
    #[serde(default)]
    pub session: SessionConfig,
}

/// How single movies are looked up by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MovieLookup {
    /// `GET /user/movie/get/{id}`
    #[default]
    Path,
    /// `GET /user/movie/getById?i={id}`
    Query,
}

impl MovieLookup {
    /// Parse a lookup style from a string
    ///
    /// # Errors
    ///
    /// Returns error if the value is neither `path` nor `query`
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "path" => Ok(Self::Path),
            "query" => Ok(Self::Query),
            other => Err(MoviedeskError::Config(format!(
                "Invalid movie lookup: {}. Must be one of: path, query",
                other
            ))
            .into()),
        }
    }
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog API; auth endpoints live under `{base_url}/auth`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Lookup style for single movies
    #[serde(default)]
    pub movie_lookup: MovieLookup,
}

fn default_base_url() -> String {
    "http://localhost:9012/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            movie_lookup: MovieLookup::default(),
        }
    }
}

impl ApiConfig {
    /// Base URL without a trailing slash
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// OMDb configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    /// API key the backend uses to fetch movie metadata
    #[serde(default = "default_api_key")]
    pub api_key: String,
}

fn default_api_key() -> String {
    "9c31d025".to_string()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
        }
    }
}

/// Where the session (token and role) is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// JSON file in the platform data directory
    #[default]
    File,
    /// OS native keyring
    Keyring,
    /// Process memory only; nothing survives the process
    Memory,
}

impl SessionBackend {
    /// Parse a backend name from a string
    ///
    /// # Errors
    ///
    /// Returns error for unknown backend names
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "keyring" => Ok(Self::Keyring),
            "memory" => Ok(Self::Memory),
            other => Err(MoviedeskError::Config(format!(
                "Invalid session backend: {}. Must be one of: file, keyring, memory",
                other
            ))
            .into()),
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: SessionBackend,

    /// Explicit session file location (file backend only)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed command line, used for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| MoviedeskError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| MoviedeskError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("MOVIEDESK_API_BASE_URL") {
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MOVIEDESK_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid MOVIEDESK_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(lookup) = std::env::var("MOVIEDESK_MOVIE_LOOKUP") {
            match MovieLookup::parse_str(&lookup) {
                Ok(value) => self.api.movie_lookup = value,
                Err(_) => tracing::warn!("Invalid MOVIEDESK_MOVIE_LOOKUP: {}", lookup),
            }
        }

        if let Ok(api_key) = std::env::var("MOVIEDESK_OMDB_API_KEY") {
            self.omdb.api_key = api_key;
        }

        if let Ok(backend) = std::env::var("MOVIEDESK_SESSION_BACKEND") {
            match SessionBackend::parse_str(&backend) {
                Ok(value) => self.session.backend = value,
                Err(_) => tracing::warn!("Invalid MOVIEDESK_SESSION_BACKEND: {}", backend),
            }
        }

        if let Ok(path) = std::env::var("MOVIEDESK_SESSION_PATH") {
            self.session.path = Some(PathBuf::from(path));
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_url) = &cli.api_url {
            self.api.base_url = api_url.clone();
        }

        if let Some(session_file) = &cli.session_file {
            self.session.backend = SessionBackend::File;
            self.session.path = Some(session_file.clone());
        }

        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an absolute http(s) URL, the
    /// timeout is zero, or the OMDb key is blank
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.api.base_url).map_err(|e| {
            MoviedeskError::Config(format!(
                "Invalid api.base_url '{}': {}",
                self.api.base_url, e
            ))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MoviedeskError::Config(format!(
                "api.base_url must use http or https, got {}",
                parsed.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(
                MoviedeskError::Config("timeout_seconds must be greater than 0".to_string()).into(),
            );
        }

        if self.omdb.api_key.trim().is_empty() {
            return Err(MoviedeskError::Config("omdb.api_key cannot be empty".to_string()).into());
        }

        Ok(())
    }
}
