use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::Recommendation,
    routes::AppState,
    services::recommendations,
};

pub const DEFAULT_TOP_N: usize = 5;
pub const MAX_TOP_N: usize = 50;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub n: Option<usize>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let n = params.n.unwrap_or(DEFAULT_TOP_N);
    if !(1..=MAX_TOP_N).contains(&n) {
        return Err(AppError::InvalidInput(format!(
            "n must be between 1 and {}",
            MAX_TOP_N
        )));
    }

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        n,
        "Processing recommendation request"
    );

    let results = recommendations::get_recommendations(
        &state.catalog,
        state.posters.as_ref(),
        &params.title,
        n,
    )
    .await?;

    Ok(Json(results))
}
