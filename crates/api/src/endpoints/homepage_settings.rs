//! Homepage settings editing endpoints.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use obf_common::{AppError, AppResult};
use obf_core::{HomepageSettings, HomepageSettingsInput};
use serde::Serialize;

use crate::{
    extractors::MaybeActor,
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Create homepage settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_settings)
                .post(create_settings)
                .patch(update_settings)
                .put(save_settings)
                .delete(delete_settings),
        )
        .route("/access", get(get_access))
}

/// Access response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResponse {
    pub can_create: bool,
}

/// Get the stored document.
async fn get_settings(State(state): State<AppState>) -> AppResult<ApiResponse<HomepageSettings>> {
    let settings = state
        .homepage_settings_service
        .get()
        .await?
        .ok_or_else(|| AppError::NotFound("Homepage settings".to_string()))?;
    Ok(ApiResponse::ok(settings))
}

/// Whether the caller may create the document.
async fn get_access(
    MaybeActor(actor): MaybeActor,
    State(state): State<AppState>,
) -> ApiResponse<AccessResponse> {
    let can_create = state
        .homepage_settings_service
        .can_create(actor.as_ref())
        .await;
    ApiResponse::ok(AccessResponse { can_create })
}

/// Create the document.
async fn create_settings(
    MaybeActor(actor): MaybeActor,
    State(state): State<AppState>,
    Json(input): Json<HomepageSettingsInput>,
) -> AppResult<ApiResponse<HomepageSettings>> {
    let settings = state
        .homepage_settings_service
        .create(actor.as_ref(), input)
        .await?;
    Ok(ApiResponse::created(settings))
}

/// Update the document.
async fn update_settings(
    MaybeActor(actor): MaybeActor,
    State(state): State<AppState>,
    Json(input): Json<HomepageSettingsInput>,
) -> AppResult<ApiResponse<HomepageSettings>> {
    let settings = state
        .homepage_settings_service
        .update(actor.as_ref(), input)
        .await?;
    Ok(ApiResponse::ok(settings))
}

/// Update the document, creating it when none exists.
async fn save_settings(
    MaybeActor(actor): MaybeActor,
    State(state): State<AppState>,
    Json(input): Json<HomepageSettingsInput>,
) -> AppResult<ApiResponse<HomepageSettings>> {
    let (settings, created) = state
        .homepage_settings_service
        .save(actor.as_ref(), input)
        .await?;
    Ok(if created {
        ApiResponse::created(settings)
    } else {
        ApiResponse::ok(settings)
    })
}

/// Delete the document.
async fn delete_settings(
    MaybeActor(actor): MaybeActor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    state
        .homepage_settings_service
        .delete(actor.as_ref())
        .await?;
    Ok(response::ok())
}
