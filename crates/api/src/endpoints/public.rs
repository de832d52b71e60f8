//! Public read endpoints consumed by the static site.
//!
//! Responses are bare JSON documents without the `data` wrapper.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use obf_common::AppResult;
use obf_core::{JobView, Page, PageQuery, PublicHomepage, PublicPartner, TeamMemberView};

use crate::middleware::AppState;

/// Create public router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/homepage-settings", get(get_homepage))
        .route("/jobs", get(list_jobs))
        .route("/jobs/{id}", get(get_job))
        .route("/partners", get(list_partners))
        .route("/advisors", get(list_advisors))
}

/// Homepage content, with defaults for anything not configured.
async fn get_homepage(State(state): State<AppState>) -> Json<PublicHomepage> {
    Json(state.homepage_settings_service.public_view().await)
}

/// Published jobs, one page at a time.
async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<JobView>>> {
    Ok(Json(state.job_service.list_published(query).await?))
}

/// A single published job.
async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<JobView>> {
    Ok(Json(state.job_service.get_published(&id).await?))
}

/// Partners in display order.
async fn list_partners(State(state): State<AppState>) -> AppResult<Json<Vec<PublicPartner>>> {
    Ok(Json(state.partner_service.list_public().await?))
}

/// Active advisors in display order.
async fn list_advisors(State(state): State<AppState>) -> AppResult<Json<Vec<TeamMemberView>>> {
    Ok(Json(state.team_service.list_advisors().await?))
}
