//! Movie records: the local shape and the backend shapes it is mapped from
//!
//! The backend has answered in two field conventions over its lifetime:
//!
//! | local        | [`OmdbRecord`]  | [`CatalogRecord`]       |
//! |--------------|-----------------|-------------------------|
//! | `id`         | `Id`, else `id` | `id`                    |
//! | `title`      | `Title`         | `title`                 |
//! | `year`       | `Year`          | `year`                  |
//! | `rated`      | `Rated`         | `rated`                 |
//! | `released`   | `Released`      | `released`              |
//! | `runtime`    | `Runtime`       | `runtime`               |
//! | `genre`      | `Genre`         | `genre`                 |
//! | `director`   | `Director`      | `director`              |
//! | `writer`     | `Writer`        | `writer`                |
//! | `actors`     | `Actors`        | `actors`                |
//! | `plot`       | `Plot`          | `plot`                  |
//! | `language`   | `Language`      | `language`              |
//! | `country`    | `Country`       | `country`               |
//! | `poster`     | `Poster`        | `poster`                |
//! | `imdbRating` | `imdbRating`    | `imdbRating`            |
//! | `imdbID`     | `imdbID`        | `imdbID`, else `imdbId` |
//!
//! Both conversions below spell out every field; nothing is passed through.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A movie as the client displays it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Backend identifier, when the backend assigned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Title
    pub title: String,
    /// Release year as the backend formats it (`"1999"`, `"2010–2014"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Rating certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    /// Release date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    /// Running time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    /// Comma-separated genres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Director(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// Writer(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    /// Principal cast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    /// Synopsis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    /// Spoken language(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Production country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Poster image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    /// IMDb user rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    /// IMDb identifier (`tt...`)
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
}

/// Record in the OMDb convention (`Title`, `Year`, ..., `imdbID`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    /// Lower-case `id`, sent by some backends next to or instead of `Id`
    #[serde(rename = "id", default, deserialize_with = "lenient_id")]
    pub catalog_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rated: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub released: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub runtime: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub director: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub writer: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub actors: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub plot: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default, deserialize_with = "lenient_string")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbID", default, deserialize_with = "lenient_string")]
    pub imdb_id: Option<String>,
}

/// Record in the catalog's own camelCase convention.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rated: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub released: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub runtime: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub director: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub writer: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub actors: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub plot: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub poster: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbID", default, deserialize_with = "lenient_string")]
    pub imdb_id: Option<String>,
    /// `imdbId`, sent next to or instead of `imdbID`
    #[serde(rename = "imdbId", default, deserialize_with = "lenient_string")]
    pub imdb_id_camel: Option<String>,
}

/// A backend record, tagged with the convention it was decoded from.
#[derive(Debug, Clone)]
pub enum RawMovie {
    /// PascalCase fields
    Omdb(OmdbRecord),
    /// camelCase fields
    Catalog(CatalogRecord),
}

impl RawMovie {
    /// Detects the convention of a JSON record and decodes it.
    ///
    /// A `Title` key selects [`OmdbRecord`], a `title` key selects
    /// [`CatalogRecord`]; with neither, falls back to `Year` / `year`.
    /// Returns `None` for non-objects, objects in no known convention, and
    /// objects that fail to decode.
    pub fn from_value(value: Value) -> Option<Self> {
        let object = value.as_object()?;
        let omdb = object.contains_key("Title")
            || (!object.contains_key("title") && object.contains_key("Year"));
        let catalog = object.contains_key("title") || object.contains_key("year");

        let decoded = if omdb {
            serde_json::from_value(value).map(Self::Omdb)
        } else if catalog {
            serde_json::from_value(value).map(Self::Catalog)
        } else {
            tracing::debug!("Dropping movie record in unknown shape");
            return None;
        };

        match decoded {
            Ok(raw) => Some(raw),
            Err(e) => {
                tracing::debug!("Dropping undecodable movie record: {}", e);
                None
            }
        }
    }

    /// Title, if present and non-blank.
    pub fn title(&self) -> Option<&str> {
        let title = match self {
            Self::Omdb(r) => r.title.as_deref(),
            Self::Catalog(r) => r.title.as_deref(),
        };
        title.filter(|t| !t.trim().is_empty())
    }

    /// Year, if present and non-blank.
    pub fn year(&self) -> Option<&str> {
        let year = match self {
            Self::Omdb(r) => r.year.as_deref(),
            Self::Catalog(r) => r.year.as_deref(),
        };
        year.filter(|y| !y.trim().is_empty())
    }

    /// Maps the record onto the local shape. `None` without a title.
    pub fn into_movie(self) -> Option<Movie> {
        self.title()?;
        let movie = match self {
            Self::Omdb(r) => Movie {
                id: r.id.or(r.catalog_id),
                title: r.title.unwrap_or_default(),
                year: r.year,
                rated: r.rated,
                released: r.released,
                runtime: r.runtime,
                genre: r.genre,
                director: r.director,
                writer: r.writer,
                actors: r.actors,
                plot: r.plot,
                language: r.language,
                country: r.country,
                poster: r.poster,
                imdb_rating: r.imdb_rating,
                imdb_id: r.imdb_id.unwrap_or_default(),
            },
            Self::Catalog(r) => Movie {
                id: r.id,
                title: r.title.unwrap_or_default(),
                year: r.year,
                rated: r.rated,
                released: r.released,
                runtime: r.runtime,
                genre: r.genre,
                director: r.director,
                writer: r.writer,
                actors: r.actors,
                plot: r.plot,
                language: r.language,
                country: r.country,
                poster: r.poster,
                imdb_rating: r.imdb_rating,
                imdb_id: r.imdb_id.or(r.imdb_id_camel).unwrap_or_default(),
            },
        };
        Some(movie)
    }
}

/// Accepts strings, numbers, and booleans; `null` becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Accepts integers and integer strings; anything else becomes `None`.
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
