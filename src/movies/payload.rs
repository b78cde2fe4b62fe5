//! Response envelopes of the movie endpoints
//!
//! Depending on the backend version, movie endpoints answer either with
//! bare records or with a `{ success, movie | movies, message }` wrapper.
//! Both are decoded here, at the boundary, into [`MovieOutcome`].

use serde::Deserialize;
use serde_json::Value;

use super::model::{Movie, RawMovie};
use super::reshape::reshape_values;
use crate::error::{MoviedeskError, Result};

/// Body of a list call.
#[derive(Debug, Clone)]
pub enum MovieListPayload {
    /// `{ success, movies, message }`
    Wrapped(Envelope),
    /// `[ record, ... ]`
    Bare(Vec<Value>),
}

/// Body of a single-record call (get, add, delete).
#[derive(Debug, Clone)]
pub enum MoviePayload {
    /// `{ success, movie, message }`
    Wrapped(Envelope),
    /// A record with no wrapper
    Bare(Value),
    /// Plain-text acknowledgement
    Text(String),
    /// Empty body
    Empty,
}

/// The `{ success, ... }` wrapper shared by all endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    /// Whether the backend considers the call successful
    #[serde(default)]
    pub success: bool,
    /// Single record
    #[serde(default)]
    pub movie: Option<Value>,
    /// Record list
    #[serde(default)]
    pub movies: Option<Vec<Value>>,
    /// Human-readable status
    #[serde(default)]
    pub message: Option<String>,
}

fn is_envelope(object: &serde_json::Map<String, Value>) -> bool {
    object.contains_key("success")
}

impl MovieListPayload {
    /// Classifies a list-call body.
    ///
    /// # Errors
    ///
    /// Returns [`MoviedeskError::UnexpectedResponse`] for bodies that are
    /// neither an array nor an envelope.
    pub fn from_value(value: Value) -> Result<Self> {
        if value.as_object().is_some_and(is_envelope) {
            return Ok(Self::Wrapped(serde_json::from_value(value)?));
        }
        match value {
            Value::Array(items) => Ok(Self::Bare(items)),
            other => Err(MoviedeskError::UnexpectedResponse(format!(
                "expected a movie list, got {}",
                kind(&other)
            ))
            .into()),
        }
    }
}

impl MoviePayload {
    /// Classifies a single-record body.
    ///
    /// # Errors
    ///
    /// Returns [`MoviedeskError::Serialization`] when a wrapper's fields
    /// have the wrong types.
    pub fn from_value(value: Value) -> Result<Self> {
        if value.as_object().is_some_and(is_envelope) {
            return Ok(Self::Wrapped(serde_json::from_value(value)?));
        }
        match value {
            Value::Null => Ok(Self::Empty),
            Value::String(s) if s.trim().is_empty() => Ok(Self::Empty),
            Value::String(s) => Ok(Self::Text(s)),
            other => Ok(Self::Bare(other)),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without `success`",
    }
}

/// What a movie call produced, independent of the backend's shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieOutcome {
    /// Whether the backend reported success
    pub success: bool,
    /// Single record, for get/add
    pub movie: Option<Movie>,
    /// Reshaped list, for list calls
    pub movies: Vec<Movie>,
    /// Backend status message
    pub message: Option<String>,
}

impl MovieOutcome {
    /// A failed outcome carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

impl From<MovieListPayload> for MovieOutcome {
    fn from(payload: MovieListPayload) -> Self {
        match payload {
            MovieListPayload::Bare(items) => Self {
                success: true,
                movies: reshape_values(items),
                ..Self::default()
            },
            MovieListPayload::Wrapped(envelope) => Self {
                success: envelope.success,
                movies: reshape_values(envelope.movies.unwrap_or_default()),
                movie: None,
                message: envelope.message,
            },
        }
    }
}

impl From<MoviePayload> for MovieOutcome {
    fn from(payload: MoviePayload) -> Self {
        match payload {
            MoviePayload::Empty => Self {
                success: true,
                ..Self::default()
            },
            MoviePayload::Text(text) => Self {
                success: true,
                message: Some(text.trim().to_string()),
                ..Self::default()
            },
            MoviePayload::Bare(record) => Self {
                success: true,
                movie: RawMovie::from_value(record).and_then(RawMovie::into_movie),
                ..Self::default()
            },
            MoviePayload::Wrapped(envelope) => Self {
                success: envelope.success,
                movie: envelope
                    .movie
                    .and_then(RawMovie::from_value)
                    .and_then(RawMovie::into_movie),
                movies: reshape_values(envelope.movies.unwrap_or_default()),
                message: envelope.message,
            },
        }
    }
}
