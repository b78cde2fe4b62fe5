//! Movie catalog wrapper
//!
//! - `model`: the local [`Movie`] shape and the backend record shapes
//! - `payload`: response envelopes, decoded into [`MovieOutcome`]
//! - `reshape`: filtering and de-duplication of listed movies
//! - `service`: the REST calls

pub mod model;
pub mod payload;
pub mod reshape;
pub mod service;

pub use model::{CatalogRecord, Movie, OmdbRecord, RawMovie};
pub use payload::{Envelope, MovieListPayload, MovieOutcome, MoviePayload};
pub use reshape::{reshape, reshape_values};
pub use service::MovieService;
