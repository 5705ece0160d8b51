use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::{routing::post, Json, Router};
use bytes::Bytes;
use tracing::{info, warn};

use crate::extract::{self, Extracted, SupportedFormat};
use crate::models::{AppState, DatasetInfo, UploadResponse};
use crate::types::{AppError, AppResult};
use crate::upload_registry::UploadRecord;

pub fn router(state: AppState) -> Router {
    let limit = state.config.dashboard.max_upload_bytes;
    Router::new()
        .route("/api/files", post(upload_file))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

/// Accept exactly one uploaded file and route it by its declared MIME
/// type. Tabular uploads are registered for the analysis view; text
/// uploads are extracted once and returned whole; anything else is a
/// deliberate no-op.
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut uploaded: Option<(String, String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Malformed multipart payload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("Failed to read upload: {e}")))?;
        uploaded = Some((filename, content_type, data));
        break;
    }

    let (filename, content_type, data) =
        uploaded.ok_or_else(|| AppError::InvalidRequest("No file field in upload".to_string()))?;
    info!(%filename, %content_type, size = data.len(), "File upload received");

    let Some(format) = SupportedFormat::from_mime(&content_type) else {
        warn!(%content_type, "Unrecognized content type, ignoring upload");
        return Ok(Json(UploadResponse {
            kind: "unsupported".to_string(),
            dataset: None,
            columns: None,
            text: None,
        }));
    };

    let extracted = extract::extract(&data, format)?;

    let record = UploadRecord {
        id: uuid::Uuid::new_v4().to_string(),
        filename: filename.clone(),
        content_type: content_type.clone(),
        bytes: data,
    };
    let dataset = DatasetInfo {
        id: record.id.clone(),
        filename,
        content_type,
        size: record.bytes.len(),
    };

    match extracted {
        Extracted::Table(table) => {
            // The raw bytes are kept so every later pass re-extracts from
            // the original upload.
            state.uploads.insert(record).await;
            Ok(Json(UploadResponse {
                kind: "table".to_string(),
                dataset: Some(dataset),
                columns: Some(table.columns),
                text: None,
            }))
        }
        Extracted::Text(text) => Ok(Json(UploadResponse {
            kind: "text".to_string(),
            dataset: Some(dataset),
            columns: None,
            text: Some(text),
        })),
    }
}
