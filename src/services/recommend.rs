use rand::Rng;
use serde::Serialize;

use crate::models::{Movie, WatchStatus};

/// Which keyword rule a query landed on.
///
/// Rules are tried in declaration order and the first hit wins; `Fallback`
/// fires when no keyword matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationRule {
    Action,
    Drama,
    Comedy,
    SciFi,
    Horror,
    Romance,
    TopRated,
    WillWatch,
    Watching,
    Fallback,
}

impl RecommendationRule {
    /// How many entries the presentation layer should show for this rule:
    /// 5 for top-rated requests, 3 for everything else. The classifier
    /// always returns the full match set; truncation happens in one place,
    /// through this limit.
    pub fn display_limit(&self) -> usize {
        match self {
            RecommendationRule::TopRated => 5,
            _ => 3,
        }
    }
}

/// Outcome of classifying a query: the rule that fired and every movie it
/// matched, in rule order (input order for genre/status rules, rating
/// descending for `TopRated` and `Fallback`).
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub rule: RecommendationRule,
    pub movies: Vec<Movie>,
}

impl Recommendation {
    /// The slice the presentation layer should display.
    pub fn top(&self) -> &[Movie] {
        let limit = self.rule.display_limit().min(self.movies.len());
        &self.movies[..limit]
    }
}

/// Keyword triggers per rule, checked against the lower-cased query
const ACTION_KEYWORDS: &[&str] = &["action", "thriller", "adventure"];
const DRAMA_KEYWORDS: &[&str] = &["drama", "emotional", "serious"];
const COMEDY_KEYWORDS: &[&str] = &["comedy", "funny", "humor"];
const SCIFI_KEYWORDS: &[&str] = &["sci-fi", "science", "futuristic"];
const HORROR_KEYWORDS: &[&str] = &["horror", "scary"];
const ROMANCE_KEYWORDS: &[&str] = &["romance", "love"];
const TOP_RATED_KEYWORDS: &[&str] = &["high rating", "best", "top"];
const WILL_WATCH_KEYWORDS: &[&str] = &["will watch", "plan to watch"];
const WATCHING_KEYWORDS: &[&str] = &["watching", "currently watching"];

fn contains_any(query: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| query.contains(k))
}

fn genre_matches(movie: &Movie, genres: &[&str]) -> bool {
    let genre = movie.genre.to_lowercase();
    genres.iter().any(|g| genre.contains(g))
}

fn unwatched_in_genres(movies: &[Movie], genres: &[&str]) -> Vec<Movie> {
    movies
        .iter()
        .filter(|m| genre_matches(m, genres) && m.status != WatchStatus::Watched)
        .cloned()
        .collect()
}

fn with_status(movies: &[Movie], status: WatchStatus) -> Vec<Movie> {
    movies
        .iter()
        .filter(|m| m.status == status)
        .cloned()
        .collect()
}

/// Unwatched movies sorted by raw rating, highest first.
///
/// The sort is stable so equally-rated movies keep their input order. It
/// deliberately ranks on the raw stored rating, not the normalized one; see
/// the note on `normalize_rating`.
fn unwatched_by_rating(movies: &[Movie]) -> Vec<Movie> {
    let mut pool: Vec<Movie> = movies
        .iter()
        .filter(|m| m.status != WatchStatus::Watched)
        .cloned()
        .collect();
    pool.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pool
}

/// Classifies a free-text query into a recommendation.
///
/// The rules mirror the chat bot's behavior: genre buckets first, then the
/// top-rated and status buckets, then a fallback of the highest-rated
/// unwatched movies. Never errors; an empty collection yields an empty match
/// set for every rule.
pub fn recommend(movies: &[Movie], query: &str) -> Recommendation {
    let query = query.to_lowercase();

    let (rule, matched) = if contains_any(&query, ACTION_KEYWORDS) {
        (
            RecommendationRule::Action,
            unwatched_in_genres(movies, &["action", "thriller", "adventure"]),
        )
    } else if contains_any(&query, DRAMA_KEYWORDS) {
        (
            RecommendationRule::Drama,
            unwatched_in_genres(movies, &["drama", "romance"]),
        )
    } else if contains_any(&query, COMEDY_KEYWORDS) {
        (
            RecommendationRule::Comedy,
            unwatched_in_genres(movies, &["comedy"]),
        )
    } else if contains_any(&query, SCIFI_KEYWORDS) {
        (
            RecommendationRule::SciFi,
            unwatched_in_genres(movies, &["sci-fi", "science fiction"]),
        )
    } else if contains_any(&query, HORROR_KEYWORDS) {
        (
            RecommendationRule::Horror,
            unwatched_in_genres(movies, &["horror"]),
        )
    } else if contains_any(&query, ROMANCE_KEYWORDS) {
        (
            RecommendationRule::Romance,
            unwatched_in_genres(movies, &["romance"]),
        )
    } else if contains_any(&query, TOP_RATED_KEYWORDS) {
        (RecommendationRule::TopRated, unwatched_by_rating(movies))
    } else if contains_any(&query, WILL_WATCH_KEYWORDS) {
        (
            RecommendationRule::WillWatch,
            with_status(movies, WatchStatus::WillWatch),
        )
    } else if contains_any(&query, WATCHING_KEYWORDS) {
        (
            RecommendationRule::Watching,
            with_status(movies, WatchStatus::Watching),
        )
    } else {
        (RecommendationRule::Fallback, unwatched_by_rating(movies))
    };

    Recommendation {
        rule,
        movies: matched,
    }
}

/// Picks one movie uniformly at random from the eligible pool (status
/// `WillWatch` or `Watching`). Returns `None` when the pool is empty.
///
/// The generator is injected so callers can seed it; the distribution is
/// uniform over the pool, not the whole collection.
pub fn pick_one<R: Rng + ?Sized>(movies: &[Movie], rng: &mut R) -> Option<Movie> {
    let pool: Vec<&Movie> = movies
        .iter()
        .filter(|m| matches!(m.status, WatchStatus::WillWatch | WatchStatus::Watching))
        .collect();
    if pool.is_empty() {
        return None;
    }
    let index = rng.random_range(0..pool.len());
    Some(pool[index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn movie(title: &str, genre: &str, status: WatchStatus, rating: f64) -> Movie {
        Movie::new(
            title.to_string(),
            String::new(),
            String::new(),
            genre.to_string(),
            "English".to_string(),
            status,
            rating,
        )
    }

    fn sample() -> Vec<Movie> {
        vec![
            movie("The Dark Knight", "Action", WatchStatus::WillWatch, 4.8),
            movie("Inception", "Sci-Fi", WatchStatus::Watching, 4.7),
            movie("Pulp Fiction", "Crime", WatchStatus::Watched, 4.6),
            movie("The Shawshank Redemption", "Drama", WatchStatus::WillWatch, 4.9),
            movie("Parasite", "Thriller", WatchStatus::Watching, 4.6),
            movie("Your Name", "Romance", WatchStatus::WillWatch, 4.5),
            movie("Whiplash", "Drama", WatchStatus::Watched, 4.6),
        ]
    }

    #[test]
    fn test_action_rule_matches_genre_bucket_in_input_order() {
        let result = recommend(&sample(), "recommend me an action movie");
        assert_eq!(result.rule, RecommendationRule::Action);
        let titles: Vec<_> = result.movies.iter().map(|m| m.title.as_str()).collect();
        // Thriller counts as the action bucket; Watched movies excluded;
        // input order preserved (this rule does not sort)
        assert_eq!(titles, vec!["The Dark Knight", "Parasite"]);
    }

    #[test]
    fn test_drama_rule_includes_romance() {
        let result = recommend(&sample(), "something emotional please");
        assert_eq!(result.rule, RecommendationRule::Drama);
        let titles: Vec<_> = result.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["The Shawshank Redemption", "Your Name"]);
    }

    #[test]
    fn test_rule_order_action_wins_over_drama() {
        // Query mentions both buckets; the action rule is tried first
        let result = recommend(&sample(), "action drama");
        assert_eq!(result.rule, RecommendationRule::Action);
    }

    #[test]
    fn test_genre_match_is_case_insensitive() {
        let movies = vec![movie("Alien", "HORROR", WatchStatus::WillWatch, 4.4)];
        let result = recommend(&movies, "something scary");
        assert_eq!(result.rule, RecommendationRule::Horror);
        assert_eq!(result.movies.len(), 1);
    }

    #[test]
    fn test_top_rated_rule_sorts_and_limits_display_to_five() {
        let mut movies = sample();
        movies.push(movie("The Matrix", "Sci-Fi", WatchStatus::Watching, 4.7));
        let result = recommend(&movies, "what are the best movies");
        assert_eq!(result.rule, RecommendationRule::TopRated);

        // Full match set comes back; display truncation is separate
        assert_eq!(result.movies.len(), 6);
        assert_eq!(result.top().len(), 5);

        let ratings: Vec<f64> = result.movies.iter().map(|m| m.rating).collect();
        let mut sorted = ratings.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(ratings, sorted);
        assert!(result
            .movies
            .iter()
            .all(|m| m.status != WatchStatus::Watched));
    }

    #[test]
    fn test_rating_sort_is_stable_on_ties() {
        let movies = vec![
            movie("First", "Drama", WatchStatus::WillWatch, 4.6),
            movie("Second", "Action", WatchStatus::Watching, 4.6),
            movie("Better", "Crime", WatchStatus::WillWatch, 4.9),
            movie("Third", "Comedy", WatchStatus::WillWatch, 4.6),
        ];
        let result = recommend(&movies, "top picks");
        let titles: Vec<_> = result.movies.iter().map(|m| m.title.as_str()).collect();
        // Tied entries keep their input order behind the higher-rated one
        assert_eq!(titles, vec!["Better", "First", "Second", "Third"]);
    }

    #[test]
    fn test_will_watch_rule_returns_status_bucket_unranked() {
        let result = recommend(&sample(), "what do I plan to watch?");
        assert_eq!(result.rule, RecommendationRule::WillWatch);
        assert!(result
            .movies
            .iter()
            .all(|m| m.status == WatchStatus::WillWatch));
        assert_eq!(result.movies.len(), 3);
    }

    #[test]
    fn test_watching_rule_matches_in_progress() {
        let result = recommend(&sample(), "currently watching");
        assert_eq!(result.rule, RecommendationRule::Watching);
        assert_eq!(result.movies.len(), 2);
    }

    #[test]
    fn test_fallback_rule_for_unmatched_query() {
        let result = recommend(&sample(), "hello there");
        assert_eq!(result.rule, RecommendationRule::Fallback);
        assert_eq!(result.top().len(), 3);
        assert_eq!(result.top()[0].title, "The Shawshank Redemption");
        assert!(result
            .movies
            .iter()
            .all(|m| m.status != WatchStatus::Watched));
    }

    #[test]
    fn test_empty_collection_yields_empty_result_for_every_rule() {
        for query in ["action", "best", "will watch", "hello there"] {
            let result = recommend(&[], query);
            assert!(result.movies.is_empty(), "query {query:?} not empty");
            assert!(result.top().is_empty());
        }
    }

    #[test]
    fn test_pick_one_only_returns_eligible_movies() {
        let movies = sample();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let pick = pick_one(&movies, &mut rng).unwrap();
            assert_ne!(pick.status, WatchStatus::Watched);
        }
    }

    #[test]
    fn test_pick_one_reaches_every_eligible_movie() {
        let movies = sample();
        let eligible: Vec<_> = movies
            .iter()
            .filter(|m| m.status != WatchStatus::Watched)
            .map(|m| m.title.clone())
            .collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(pick_one(&movies, &mut rng).unwrap().title);
        }
        for title in &eligible {
            assert!(seen.contains(title), "{title} never picked");
        }
    }

    #[test]
    fn test_pick_one_empty_pool_returns_none() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(pick_one(&[], &mut rng).is_none());

        let all_watched = vec![movie("Seen It", "Drama", WatchStatus::Watched, 4.0)];
        assert!(pick_one(&all_watched, &mut rng).is_none());
    }
}
