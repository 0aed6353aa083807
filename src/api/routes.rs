use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/movies", movie_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Movie CRUD and recommendation routes under /api/movies
fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_movies).post(handlers::create_movie))
        .route("/seed", post(handlers::seed_movies))
        .route("/recommendations", post(handlers::recommend_movies))
        .route(
            "/recommendations/random",
            get(handlers::random_recommendation),
        )
        .route(
            "/:id",
            get(handlers::get_movie)
                .patch(handlers::update_movie)
                .put(handlers::replace_movie)
                .delete(handlers::delete_movie),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
