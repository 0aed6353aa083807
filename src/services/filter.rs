use serde::Deserialize;

use crate::models::Movie;

/// Dropdown sentinel meaning "no constraint on this field"
pub const ALL: &str = "All";

/// Criteria for narrowing the watchlist, as supplied by the search box and
/// filter dropdowns. Every field is optional; `None`, an empty search string,
/// and the `"All"` sentinel all mean the field is unconstrained.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against title, genre, or language
    pub search: Option<String>,
    /// Exact match against the status wire label ("Will Watch", ...)
    pub status: Option<String>,
    /// Exact match against the genre field
    pub genre: Option<String>,
    /// Exact match against the language field
    pub language: Option<String>,
}

impl FilterCriteria {
    fn matches(&self, movie: &Movie) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                movie.title.to_lowercase().contains(&query)
                    || movie.genre.to_lowercase().contains(&query)
                    || movie.language.to_lowercase().contains(&query)
            }
        };

        matches_search
            && field_matches(self.status.as_deref(), movie.status.as_str())
            && field_matches(self.genre.as_deref(), &movie.genre)
            && field_matches(self.language.as_deref(), &movie.language)
    }
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        None | Some(ALL) => true,
        Some(wanted) => wanted == actual,
    }
}

/// Narrows `movies` to those matching every active criterion.
///
/// The result is always a subsequence of the input: relative order is kept
/// and no element is duplicated. With no active criteria the input comes
/// back unchanged.
pub fn filter_movies(movies: &[Movie], criteria: &FilterCriteria) -> Vec<Movie> {
    movies
        .iter()
        .filter(|movie| criteria.matches(movie))
        .cloned()
        .collect()
}
