//! Contact form endpoint.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::post,
};
use obf_common::AppResult;
use obf_core::ContactSubmission;
use serde::Serialize;

use crate::{form::FormData, middleware::AppState};

/// Create contact router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit))
}

/// Contact response.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Forward a contact form submission.
async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ContactResponse>> {
    let mut form = FormData::read(multipart).await?;

    let submission = ContactSubmission {
        first_name: form.text("firstName"),
        last_name: form.text("lastName"),
        email: form.text("email"),
        phone_number: form.text("phoneNumber"),
        organization: form.text("organization"),
        role: form.text("role"),
        message: form.text("message"),
    };

    state.contact_service.submit(submission).await?;

    Ok(Json(ContactResponse {
        status: "success",
        message: "Email notification sent successfully",
    }))
}
