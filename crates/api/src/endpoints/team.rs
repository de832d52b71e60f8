//! Team management endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{patch, post},
};
use obf_common::AppResult;
use obf_core::{CreateTeamMemberInput, TeamMemberView, UpdateTeamMemberInput};

use crate::{
    extractors::AuthActor,
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Create team router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_member))
        .route("/{id}", patch(update_member).delete(delete_member))
}

/// Add a team member.
async fn create_member(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<CreateTeamMemberInput>,
) -> AppResult<ApiResponse<TeamMemberView>> {
    let member = state.team_service.create(&actor, input).await?;
    Ok(ApiResponse::created(member))
}

/// Update a team member.
async fn update_member(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTeamMemberInput>,
) -> AppResult<ApiResponse<TeamMemberView>> {
    let member = state.team_service.update(&actor, &id, input).await?;
    Ok(ApiResponse::ok(member))
}

/// Remove a team member.
async fn delete_member(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.team_service.delete(&actor, &id).await?;
    Ok(response::ok())
}
