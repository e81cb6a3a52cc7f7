use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::MovieId,
    routes::AppState,
};

/// Handler serving a cached poster, fetching it on first request
pub async fn poster(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let movie_id = MovieId(movie_id);

    if !state.catalog.contains_id(movie_id) {
        return Err(AppError::NotFound(format!(
            "Movie {} not found in catalog",
            movie_id
        )));
    }

    let cache = state
        .posters
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Poster lookups are disabled".to_string()))?;

    let bytes = cache
        .get_poster(movie_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No poster available for movie {}", movie_id)))?;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}
