//! Partner management endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{delete, post},
};
use chrono::{DateTime, Utc};
use obf_common::AppResult;
use obf_core::CreatePartnerInput;
use obf_db::entities::partner;
use serde::Serialize;

use crate::{
    extractors::AuthActor,
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Create partner router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_partner))
        .route("/{id}", delete(delete_partner))
}

/// Partner response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerResponse {
    pub id: String,
    pub name: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub image_id: Option<String>,
    pub image_static_path: Option<String>,
    pub website: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<partner::Model> for PartnerResponse {
    fn from(partner: partner::Model) -> Self {
        Self {
            id: partner.id,
            name: partner.name,
            full_name: partner.full_name,
            bio: partner.bio,
            image_id: partner.image_id,
            image_static_path: partner.image_static_path,
            website: partner.website,
            order: partner.display_order,
            created_at: partner.created_at,
        }
    }
}

/// Create a partner.
async fn create_partner(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<CreatePartnerInput>,
) -> AppResult<ApiResponse<PartnerResponse>> {
    let partner = state.partner_service.create(&actor, input).await?;
    Ok(ApiResponse::created(partner.into()))
}

/// Delete a partner.
async fn delete_partner(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.partner_service.delete(&actor, &id).await?;
    Ok(response::ok())
}
