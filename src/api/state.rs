use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Movie, WatchStatus};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
}

/// In-memory movie store. Movies are kept in insertion order so list and
/// filter output is deterministic.
pub struct AppStateInner {
    pub movies: Vec<Movie>,
}

impl AppStateInner {
    /// Finds the position of a movie by id
    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.movies.iter().position(|m| m.id == id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new empty application state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner { movies: Vec::new() })),
        }
    }

    /// Inserts the sample watchlist if the store is empty. Returns how many
    /// movies were added (zero when already seeded).
    pub async fn seed(&self) -> usize {
        let mut inner = self.inner.write().await;
        if !inner.movies.is_empty() {
            return 0;
        }
        let samples = sample_movies();
        let count = samples.len();
        inner.movies.extend(samples);
        count
    }
}

/// Sample watchlist used by the seed endpoint and the SEED_ON_START option
pub fn sample_movies() -> Vec<Movie> {
    vec![
        Movie::new(
            "The Dark Knight".to_string(),
            "https://image.tmdb.org/t/p/w500/qJ2tW6WMUDux911r6m7haRef0WH.jpg".to_string(),
            "Batman faces the Joker, a criminal mastermind who plunges Gotham into anarchy."
                .to_string(),
            "Action".to_string(),
            "English".to_string(),
            WatchStatus::WillWatch,
            4.8,
        ),
        Movie::new(
            "Inception".to_string(),
            "https://image.tmdb.org/t/p/w500/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg".to_string(),
            "A thief who steals corporate secrets through dream-sharing technology is given a task of inception."
                .to_string(),
            "Sci-Fi".to_string(),
            "English".to_string(),
            WatchStatus::Watching,
            4.7,
        ),
        Movie::new(
            "Pulp Fiction".to_string(),
            "https://image.tmdb.org/t/p/w500/fIE3lAGcZDV1G6XM5KmuWnNsPp1.jpg".to_string(),
            "The lives of two hitmen, a boxer, and a gangster's wife intertwine in tales of violence and redemption."
                .to_string(),
            "Crime".to_string(),
            "English".to_string(),
            WatchStatus::Watched,
            4.6,
        ),
        Movie::new(
            "The Shawshank Redemption".to_string(),
            "https://image.tmdb.org/t/p/w500/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg".to_string(),
            "Two imprisoned men bond over years, finding solace and eventual redemption.".to_string(),
            "Drama".to_string(),
            "English".to_string(),
            WatchStatus::WillWatch,
            4.9,
        ),
        Movie::new(
            "Interstellar".to_string(),
            "https://image.tmdb.org/t/p/w500/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg".to_string(),
            "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival."
                .to_string(),
            "Sci-Fi".to_string(),
            "English".to_string(),
            WatchStatus::Watching,
            4.8,
        ),
    ]
}
