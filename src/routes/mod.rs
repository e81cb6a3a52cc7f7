use axum::{extract::State, http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{Catalog, PosterCache},
};

pub mod posters;
pub mod recommendations;
pub mod titles;

/// Shared application state
///
/// The catalog is immutable after startup. `posters` is `None` when no TMDb
/// API key is configured.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub posters: Option<PosterCache>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, posters: Option<PosterCache>) -> Self {
        Self { catalog, posters }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/titles", get(titles::search))
        .route("/recommendations", get(recommendations::recommend))
        .route("/posters/:movie_id", get(posters::poster))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "movies": state.catalog.len(),
            "posters_enabled": state.posters.is_some(),
        })),
    )
}
