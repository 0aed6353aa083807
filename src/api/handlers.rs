use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Movie, WatchStatus};
use crate::services::{filter_movies, normalize_rating, pick_one, recommend, FilterCriteria};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: String,
    #[serde(rename = "posterURL", default)]
    pub poster_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub status: WatchStatus,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub review: Option<String>,
}

fn default_language() -> String {
    "English".to_string()
}

/// Partial update: only the provided fields change
#[derive(Debug, Deserialize, Default)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    #[serde(rename = "posterURL")]
    pub poster_url: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub status: Option<WatchStatus>,
    pub rating: Option<f64>,
    pub year: Option<i32>,
    pub review: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "posterURL")]
    pub poster_url: String,
    pub description: String,
    pub genre: String,
    pub language: String,
    pub status: WatchStatus,
    /// Raw stored rating, scale as supplied by the producer
    pub rating: f64,
    /// Canonical 0-5 rating for display
    pub normalized_rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Movie> for MovieResponse {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: movie.poster_url.clone(),
            description: movie.description.clone(),
            genre: movie.genre.clone(),
            language: movie.language.clone(),
            status: movie.status,
            rating: movie.rating,
            normalized_rating: normalize_rating(Some(movie.rating)),
            year: movie.year,
            review: movie.review.clone(),
            created_at: movie.created_at,
            updated_at: movie.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    /// The keyword rule that fired
    pub rule: crate::services::RecommendationRule,
    /// Display-truncated recommendations (3 entries, 5 for top-rated)
    pub movies: Vec<MovieResponse>,
    /// Size of the full match set before truncation
    pub total_matches: usize,
}

#[derive(Debug, Serialize)]
pub struct RandomRecommendationResponse {
    pub movie: Option<MovieResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()));
    }
    Ok(())
}

// Handlers

/// Get all movies, optionally narrowed by search/status/genre/language
pub async fn list_movies(
    State(state): State<AppState>,
    Query(criteria): Query<FilterCriteria>,
) -> Json<Vec<MovieResponse>> {
    let inner = state.inner.read().await;
    let movies = filter_movies(&inner.movies, &criteria);
    Json(movies.iter().map(MovieResponse::from).collect())
}

/// Get a movie by id
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MovieResponse>> {
    let inner = state.inner.read().await;
    inner
        .movies
        .iter()
        .find(|m| m.id == id)
        .map(|m| Json(MovieResponse::from(m)))
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))
}

/// Create a new movie
pub async fn create_movie(
    State(state): State<AppState>,
    Json(request): Json<CreateMovieRequest>,
) -> AppResult<(StatusCode, Json<MovieResponse>)> {
    validate_title(&request.title)?;

    let mut movie = Movie::new(
        request.title,
        request.poster_url,
        request.description,
        request.genre,
        request.language,
        request.status,
        request.rating,
    );
    movie.year = request.year;
    movie.review = request.review;

    let response = MovieResponse::from(&movie);

    let mut inner = state.inner.write().await;
    inner.movies.push(movie);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Partially update a movie: absent fields keep their current value
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMovieRequest>,
) -> AppResult<Json<MovieResponse>> {
    if let Some(title) = &request.title {
        validate_title(title)?;
    }

    let mut inner = state.inner.write().await;
    let position = inner
        .position(id)
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    let movie = &mut inner.movies[position];
    if let Some(title) = request.title {
        movie.title = title;
    }
    if let Some(poster_url) = request.poster_url {
        movie.poster_url = poster_url;
    }
    if let Some(description) = request.description {
        movie.description = description;
    }
    if let Some(genre) = request.genre {
        movie.genre = genre;
    }
    if let Some(language) = request.language {
        movie.language = language;
    }
    if let Some(status) = request.status {
        movie.status = status;
    }
    if let Some(rating) = request.rating {
        movie.rating = rating;
    }
    if let Some(year) = request.year {
        movie.year = Some(year);
    }
    if let Some(review) = request.review {
        movie.review = Some(review);
    }
    movie.updated_at = Utc::now();

    Ok(Json(MovieResponse::from(&*movie)))
}

/// Replace a movie wholesale; id and created_at are preserved
pub async fn replace_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateMovieRequest>,
) -> AppResult<Json<MovieResponse>> {
    validate_title(&request.title)?;

    let mut inner = state.inner.write().await;
    let position = inner
        .position(id)
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    let movie = &mut inner.movies[position];
    movie.title = request.title;
    movie.poster_url = request.poster_url;
    movie.description = request.description;
    movie.genre = request.genre;
    movie.language = request.language;
    movie.status = request.status;
    movie.rating = request.rating;
    movie.year = request.year;
    movie.review = request.review;
    movie.updated_at = Utc::now();

    Ok(Json(MovieResponse::from(&*movie)))
}

/// Delete a movie by id
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let mut inner = state.inner.write().await;
    let position = inner
        .position(id)
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;
    inner.movies.remove(position);

    Ok(Json(serde_json::json!({ "message": "Movie deleted" })))
}

/// Seed the store with sample movies (no-op when already populated)
pub async fn seed_movies(
    State(state): State<AppState>,
) -> (StatusCode, Json<serde_json::Value>) {
    let added = state.seed().await;
    let total = state.inner.read().await.movies.len();

    if added == 0 {
        (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Movies already seeded", "count": total })),
        )
    } else {
        (
            StatusCode::CREATED,
            Json(serde_json::json!({ "message": "Seeded successfully", "count": added })),
        )
    }
}

/// Classify a free-text query into a ranked recommendation list
pub async fn recommend_movies(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Json<RecommendResponse> {
    let inner = state.inner.read().await;
    let recommendation = recommend(&inner.movies, &request.query);

    Json(RecommendResponse {
        rule: recommendation.rule,
        movies: recommendation.top().iter().map(MovieResponse::from).collect(),
        total_matches: recommendation.movies.len(),
    })
}

/// Pick one movie at random from the not-yet-watched pool
pub async fn random_recommendation(
    State(state): State<AppState>,
) -> Json<RandomRecommendationResponse> {
    let inner = state.inner.read().await;
    let pick = pick_one(&inner.movies, &mut rand::rng());

    match pick {
        Some(movie) => Json(RandomRecommendationResponse {
            movie: Some(MovieResponse::from(&movie)),
            message: None,
        }),
        None => Json(RandomRecommendationResponse {
            movie: None,
            message: Some("No recommendations available. Add more movies!".to_string()),
        }),
    }
}
