//! Turning backend movie lists into the displayed list
//!
//! Entries without a title or year are dropped. The rest are folded into
//! the output in order, skipping any entry whose (title, year) pair was
//! already seen. The first occurrence wins.

use serde_json::Value;

use super::model::{Movie, RawMovie};

/// Reshapes decoded backend records into the displayed list.
pub fn reshape<I>(records: I) -> Vec<Movie>
where
    I: IntoIterator<Item = RawMovie>,
{
    records
        .into_iter()
        .filter(|raw| raw.title().is_some() && raw.year().is_some())
        .filter_map(RawMovie::into_movie)
        .fold(Vec::new(), |mut acc, movie| {
            match acc
                .iter()
                .find(|seen: &&Movie| seen.title == movie.title && seen.year == movie.year)
            {
                Some(seen) => {
                    if seen.id != movie.id {
                        tracing::warn!(
                            title = %movie.title,
                            year = ?movie.year,
                            kept_id = ?seen.id,
                            dropped_id = ?movie.id,
                            "Collapsing distinct records sharing title and year"
                        );
                    }
                }
                None => acc.push(movie),
            }
            acc
        })
}

/// Decodes loose JSON entries and reshapes them.
///
/// Entries in no known record shape are dropped along with those failing
/// the title/year check.
pub fn reshape_values<I>(values: I) -> Vec<Movie>
where
    I: IntoIterator<Item = Value>,
{
    reshape(values.into_iter().filter_map(RawMovie::from_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entries_without_title_or_year_are_dropped() {
        let movies = reshape_values(vec![
            json!({"Title": "Heat", "Year": "1995", "imdbID": "tt0113277"}),
            json!({"Title": "No Year", "imdbID": "tt1"}),
            json!({"Year": "2001", "imdbID": "tt2"}),
            json!({"title": "", "year": "2001"}),
            json!({"title": "Blank Year", "year": ""}),
        ]);
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Heat");
    }

    #[test]
    fn test_duplicates_collapse_first_seen_wins() {
        let movies = reshape_values(vec![
            json!({"Id": 1, "Title": "Heat", "Year": "1995", "imdbID": "tt0113277"}),
            json!({"Id": 2, "Title": "Alien", "Year": "1979", "imdbID": "tt0078748"}),
            json!({"Id": 3, "Title": "Heat", "Year": "1995", "imdbID": "tt9999999"}),
        ]);
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, Some(1));
        assert_eq!(movies[0].imdb_id, "tt0113277");
        assert_eq!(movies[1].title, "Alien");
    }

    #[test]
    fn test_same_title_different_year_is_kept() {
        let movies = reshape_values(vec![
            json!({"title": "Dune", "year": "1984"}),
            json!({"title": "Dune", "year": "2021"}),
        ]);
        assert_eq!(movies.len(), 2);
    }

    #[test]
    fn test_mixed_shapes_deduplicate_together() {
        let movies = reshape_values(vec![
            json!({"Title": "Heat", "Year": "1995"}),
            json!({"title": "Heat", "year": 1995}),
        ]);
        assert_eq!(movies.len(), 1);
    }

    #[test]
    fn test_unknown_entries_are_dropped() {
        let movies = reshape_values(vec![json!(42), json!({"name": "Heat"}), json!(null)]);
        assert!(movies.is_empty());
    }

    #[test]
    fn test_order_of_first_occurrences_is_preserved() {
        let movies = reshape_values(vec![
            json!({"title": "C", "year": "3"}),
            json!({"title": "A", "year": "1"}),
            json!({"title": "C", "year": "3"}),
            json!({"title": "B", "year": "2"}),
        ]);
        let titles: Vec<_> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["C", "A", "B"]);
    }

    #[test]
    fn test_records_with_both_key_spellings_are_kept() {
        let movies = reshape_values(vec![
            json!({"id": 1, "title": "Heat", "year": "1995", "imdbID": "tt0113277", "imdbId": "tt0113277"}),
            json!({"id": 2, "Id": 2, "Title": "Alien", "Year": "1979"}),
        ]);
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].imdb_id, "tt0113277");
        assert_eq!(movies[1].id, Some(2));
    }
}
