//! Analytics endpoint.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use obf_common::{AppError, AppResult};
use obf_core::TrackEventInput;
use serde::Serialize;

use crate::{extractors::Client, middleware::AppState};

/// Create analytics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/track", post(track))
}

/// Track response.
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub success: bool,
}

/// Record an analytics event.
async fn track(
    State(state): State<AppState>,
    Client(client): Client,
    input: Result<Json<TrackEventInput>, JsonRejection>,
) -> AppResult<Json<TrackResponse>> {
    let Json(input) = input.map_err(|e| AppError::BadRequest(e.body_text()))?;
    state.analytics_service.track(input, client).await?;
    Ok(Json(TrackResponse { success: true }))
}
