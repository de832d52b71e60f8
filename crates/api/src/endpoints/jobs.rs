//! Job posting endpoints.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    response::IntoResponse,
    routing::{get, patch, post},
};
use obf_common::AppResult;
use obf_core::{
    ApplicationReceipt, ApplicationSubmission, ApplicationView, CreateJobInput, JobView,
    UpdateJobInput,
};

use crate::{
    extractors::AuthActor,
    form::FormData,
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Create job router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_job))
        .route("/apply", post(apply))
        .route("/{id}", patch(update_job).delete(delete_job))
        .route("/{id}/applications", get(list_applications))
}

/// Create a job.
async fn create_job(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Json(input): Json<CreateJobInput>,
) -> AppResult<ApiResponse<JobView>> {
    let job = state.job_service.create(&actor, input).await?;
    Ok(ApiResponse::created(job))
}

/// Update a job.
async fn update_job(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateJobInput>,
) -> AppResult<ApiResponse<JobView>> {
    let job = state.job_service.update(&actor, &id, input).await?;
    Ok(ApiResponse::ok(job))
}

/// Delete a job.
async fn delete_job(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.job_service.delete(&actor, &id).await?;
    Ok(response::ok())
}

/// Submit an application from the careers page.
async fn apply(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ApplicationReceipt>> {
    let mut form = FormData::read(multipart).await?;

    let submission = ApplicationSubmission {
        job_id: form.text("jobId"),
        full_name: form.text("fullName"),
        email: form.text("email"),
        contact_number: form.optional("contactNumber"),
        notice_period: form.optional("noticePeriod"),
        current_location: form.optional("currentLocation"),
        current_company: form.optional("currentCompany"),
        portfolio_url: form.optional("portfolioUrl"),
        resume: form.file("resume"),
    };

    let receipt = state.job_application_service.apply(submission).await?;
    Ok(Json(receipt))
}

/// Applications received for a job, newest first.
async fn list_applications(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<ApplicationView>>> {
    let applications = state
        .job_application_service
        .list_for_job(&actor, &id)
        .await?;
    Ok(ApiResponse::ok(applications))
}
