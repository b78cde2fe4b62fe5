//! Movie calls against `/admin/movie/*` and `/user/movie/*`

use reqwest::Method;
use serde::Serialize;

use super::payload::{MovieListPayload, MovieOutcome, MoviePayload};
use crate::api::ApiClient;
use crate::config::MovieLookup;
use crate::error::Result;

/// Payload of `POST /admin/movie/add`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddMovieRequest<'a> {
    imdb_id: &'a str,
    api_key: &'a str,
}

/// Create, read, and delete calls for the movie catalog.
///
/// Every call requires a stored session and fails before any network I/O
/// without one.
#[derive(Debug, Clone)]
pub struct MovieService {
    client: ApiClient,
    lookup: MovieLookup,
}

impl MovieService {
    /// Creates a service issuing requests through `client`.
    pub fn new(client: ApiClient, lookup: MovieLookup) -> Self {
        Self { client, lookup }
    }

    /// Imports a movie by IMDb id; the backend fetches metadata using
    /// `api_key`.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, or the API error.
    pub async fn add_movie(&self, imdb_id: &str, api_key: &str) -> Result<MovieOutcome> {
        tracing::info!(imdb_id, "Adding movie");
        let builder = self
            .client
            .protected(Method::POST, "admin/movie/add")?
            .json(&AddMovieRequest { imdb_id, api_key });
        let value = self.client.send_value(builder).await?;
        Ok(MoviePayload::from_value(value)?.into())
    }

    /// Deletes a movie by backend id.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, or the API error.
    pub async fn delete_movie(&self, id: i64) -> Result<MovieOutcome> {
        tracing::info!(id, "Deleting movie");
        let builder = self
            .client
            .protected(Method::DELETE, &format!("admin/movie/delete/{}", id))?;
        let value = self.client.send_value(builder).await?;
        Ok(MoviePayload::from_value(value)?.into())
    }

    /// Fetches and reshapes the full catalog.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, the API error, or
    /// `UnexpectedResponse` when the body is in no known list shape.
    pub async fn get_all(&self) -> Result<MovieOutcome> {
        let builder = self.client.protected(Method::GET, "user/movie/getAll")?;
        let value = self.client.send_value(builder).await?;
        let outcome: MovieOutcome = MovieListPayload::from_value(value)?.into();
        tracing::debug!(count = outcome.movies.len(), "Loaded movies");
        Ok(outcome)
    }

    /// Fetches a single movie by backend id.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a session, or the API error.
    pub async fn get_by_id(&self, id: i64) -> Result<MovieOutcome> {
        let builder = match self.lookup {
            MovieLookup::Path => self
                .client
                .protected(Method::GET, &format!("user/movie/get/{}", id))?,
            MovieLookup::Query => self
                .client
                .protected(Method::GET, "user/movie/getById")?
                .query(&[("i", id)]),
        };
        let value = self.client.send_value(builder).await?;
        Ok(MoviePayload::from_value(value)?.into())
    }
}
