//! Movie catalog view
//!
//! Holds the displayed list, the currently selected movie, and the form
//! fields for importing and searching. Every action leaves the state it
//! could not change untouched and reports what happened through
//! [`Notice`].

use std::fmt;

use crate::movies::{Movie, MovieService};
use crate::session::SessionContext;

use super::form;

/// Message shown above the list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Notice {
    /// Nothing to show
    #[default]
    None,
    /// Confirmation of a completed action
    Info(String),
    /// Why an action did not happen
    Error(String),
}

impl Notice {
    /// Text of the notice, empty for [`Notice::None`].
    pub fn text(&self) -> &str {
        match self {
            Self::None => "",
            Self::Info(text) | Self::Error(text) => text,
        }
    }

    /// Whether the notice reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// State of the movie catalog screen.
#[derive(Debug, Clone)]
pub struct MovieListView {
    service: MovieService,
    /// Displayed movies, reshaped and de-duplicated
    pub movies: Vec<Movie>,
    /// Result of the last successful search
    pub selected: Option<Movie>,
    /// Message for the user
    pub notice: Notice,
    /// Whether mutations are offered; read once when the view is created
    pub is_admin: bool,
    /// OMDb key forwarded on import
    pub api_key: String,
    /// Import field
    pub imdb_id: String,
    /// Search field
    pub search_id: String,
}

impl MovieListView {
    /// Creates an empty view. Call [`load`](Self::load) to populate it.
    pub fn new(service: MovieService, session: &SessionContext, api_key: impl Into<String>) -> Self {
        Self {
            service,
            movies: Vec::new(),
            selected: None,
            notice: Notice::None,
            is_admin: session.is_admin(),
            api_key: api_key.into(),
            imdb_id: String::new(),
            search_id: String::new(),
        }
    }

    /// Replaces the list with the backend's catalog.
    pub async fn load(&mut self) {
        if self.refresh().await {
            self.notice = Notice::None;
        }
    }

    /// Reloads the list, leaving the notice alone unless the reload fails.
    async fn refresh(&mut self) -> bool {
        match self.service.get_all().await {
            Ok(outcome) if outcome.success => {
                self.movies = outcome.movies;
                true
            }
            Ok(outcome) => {
                self.notice = Notice::Error(
                    outcome
                        .message
                        .unwrap_or_else(|| "Failed to load movies".to_string()),
                );
                false
            }
            Err(e) => {
                tracing::error!("Failed to load movies: {:#}", e);
                self.notice =
                    Notice::Error(format!("Failed to load movies: {}", form::describe(&e)));
                false
            }
        }
    }

    /// Imports the movie named by `imdb_id`.
    pub async fn add_movie(&mut self) {
        if !form::required(&self.imdb_id) {
            self.notice = Notice::Error("Please enter an IMDB ID".to_string());
            return;
        }
        if !self.is_admin {
            self.notice = Notice::Error("Only administrators can add movies".to_string());
            return;
        }

        let imdb_id = self.imdb_id.trim().to_string();
        match self.service.add_movie(&imdb_id, &self.api_key).await {
            Ok(outcome) if outcome.success && outcome.movie.is_some() => {
                if let Some(movie) = outcome.movie {
                    self.movies.push(movie);
                }
                self.imdb_id.clear();
                self.notice = Notice::Info("Movie added successfully!".to_string());
                self.refresh().await;
            }
            Ok(outcome) => {
                self.notice = Notice::Error(format!(
                    "Failed to add movie: {}",
                    outcome.message.as_deref().unwrap_or("Unknown error")
                ));
            }
            Err(e) => {
                tracing::error!("Failed to add movie: {:#}", e);
                self.notice = Notice::Error(format!("Failed to add movie: {}", form::describe(&e)));
            }
        }
    }

    /// Looks up the movie whose backend id is in `search_id`.
    pub async fn search_movie(&mut self) {
        if !form::required(&self.search_id) {
            self.notice = Notice::Error("Please enter a movie ID".to_string());
            return;
        }
        let Ok(id) = self.search_id.trim().parse::<i64>() else {
            self.notice = Notice::Error("Please enter a valid movie ID".to_string());
            return;
        };

        match self.service.get_by_id(id).await {
            Ok(outcome) if outcome.success && outcome.movie.is_some() => {
                tracing::debug!(id, "Movie found");
                self.selected = outcome.movie;
                self.notice = Notice::None;
            }
            Ok(outcome) => {
                tracing::debug!(id, "Movie not found");
                self.selected = None;
                self.notice = Notice::Error(
                    outcome
                        .message
                        .unwrap_or_else(|| "Movie not found".to_string()),
                );
            }
            Err(e) => {
                tracing::error!("Error searching movie: {:#}", e);
                self.selected = None;
                self.notice =
                    Notice::Error(format!("Failed to find movie: {}", form::describe(&e)));
            }
        }
    }

    /// Deletes the movie with backend id `id`. Confirmation is the
    /// caller's job.
    pub async fn delete_movie(&mut self, id: i64) {
        if !self.is_admin {
            self.notice = Notice::Error("Only administrators can delete movies".to_string());
            return;
        }

        match self.service.delete_movie(id).await {
            Ok(outcome) if outcome.success => {
                self.movies.retain(|m| m.id != Some(id));
                if self.selected.as_ref().and_then(|m| m.id) == Some(id) {
                    self.selected = None;
                }
                self.notice = Notice::Info(
                    outcome
                        .message
                        .unwrap_or_else(|| "Movie deleted successfully".to_string()),
                );
                self.refresh().await;
            }
            Ok(outcome) => {
                self.notice = Notice::Error(
                    outcome
                        .message
                        .unwrap_or_else(|| "Failed to delete movie".to_string()),
                );
            }
            Err(e) => {
                tracing::error!("Failed to delete movie: {:#}", e);
                self.notice =
                    Notice::Error(format!("Failed to delete movie: {}", form::describe(&e)));
            }
        }
    }
}
