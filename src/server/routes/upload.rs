//! Document upload endpoint

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::error::{Error, Result};
use crate::ingestion::ingest_upload;
use crate::server::auth::AuthUser;
use crate::server::state::AppState;
use crate::types::{DocumentSummary, UploadResponse};

/// POST /api/upload - Upload a file and generate flash cards from it
pub async fn upload_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let mut title: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "title" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| Error::validation(format!("Failed to read title: {}", e)))?;
                title = Some(text);
            }
            "file" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::validation(format!("Failed to read file: {}", e)))?;
                file = Some((content_type, data.to_vec()));
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown multipart field");
            }
        }
    }

    let (content_type, data) = file.ok_or_else(|| Error::validation("No file uploaded"))?;
    if data.is_empty() {
        return Err(Error::validation("Uploaded file is empty"));
    }

    tracing::info!(%user_id, content_type, bytes = data.len(), "processing upload");

    let outcome = ingest_upload(&state, user_id, title, &content_type, &data).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Document processed and flash cards generated successfully".into(),
            document: DocumentSummary::from(&outcome.document),
            flash_card_count: outcome.card_count,
        }),
    ))
}
