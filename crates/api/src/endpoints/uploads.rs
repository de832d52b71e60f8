//! Upload endpoints.

use axum::{
    Router,
    body::Body,
    extract::{Multipart, Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use obf_common::{AppError, AppResult};
use obf_db::entities::upload;
use serde::Serialize;
use tracing::debug;

use crate::{extractors::AuthActor, form::FormData, middleware::AppState, response::ApiResponse};

/// Storage scope of files uploaded from the editor.
const MEDIA_SCOPE: &str = "media";

/// Create upload router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload_file))
        .route("/file/{filename}", get(serve_file))
}

/// Upload response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub id: String,
    pub filename: String,
    pub mime_type: String,
    pub size: i64,
    pub url: String,
    pub alt: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<upload::Model> for UploadResponse {
    fn from(upload: upload::Model) -> Self {
        Self {
            id: upload.id,
            filename: upload.filename,
            mime_type: upload.mime_type,
            size: upload.size,
            url: upload.url,
            alt: upload.alt,
            created_at: upload.created_at,
        }
    }
}

/// Upload a file via multipart form.
async fn upload_file(
    AuthActor(actor): AuthActor,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<ApiResponse<UploadResponse>> {
    let mut form = FormData::read(multipart).await?;

    let mut file = form
        .file("file")
        .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    file.alt = form.optional("alt");

    let upload = state.upload_service.store(file, MEDIA_SCOPE).await?;
    debug!(upload_id = %upload.id, actor = %actor.name, "Upload stored");
    Ok(ApiResponse::created(upload.into()))
}

/// Serve the bytes of a stored file.
async fn serve_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let (upload, data) = state.upload_service.fetch(&filename).await?;

    let content_type = HeaderValue::from_str(&upload.mime_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=31536000, immutable"),
            ),
        ],
        Body::from(data),
    )
        .into_response())
}
