//! Document management endpoints
//!
//! All routes are owner-scoped: a document belonging to another user is
//! indistinguishable from one that does not exist.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::auth::AuthUser;
use crate::server::state::AppState;
use crate::types::{Document, DocumentDetail, DocumentListResponse, DocumentSummary};

/// Fields accepted by PATCH /api/documents/:id
#[derive(Debug, Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub summary: Option<String>,
}

/// Body for POST /api/documents
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    pub title: String,
    pub summary: String,
}

/// POST /api/documents - Create a document directly, without an upload
pub async fn create_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentSummary>)> {
    let title = req.title.trim().to_string();
    if title.is_empty() {
        return Err(Error::validation("Title must not be empty"));
    }
    if req.summary.trim().is_empty() {
        return Err(Error::validation("Summary must not be empty"));
    }

    let document = Document::new(title, req.summary, user_id);
    let doc_id = document.id;
    let summary = DocumentSummary::from(&document);
    state.documents().insert(doc_id, document);

    let linked = state.users().update(&user_id, |u| u.docs.push(doc_id));
    if linked.is_none() {
        tracing::warn!(%user_id, %doc_id, "owner record missing, document left unlinked");
    }

    tracing::info!(%user_id, %doc_id, "created document");
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /api/documents - List the caller's documents
pub async fn list_documents(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DocumentListResponse>> {
    let mut docs = state.documents().filter(|d| d.user_id == user_id);
    docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let documents: Vec<DocumentSummary> = docs.iter().map(DocumentSummary::from).collect();
    let total_count = documents.len();

    Ok(Json(DocumentListResponse {
        documents,
        total_count,
    }))
}

/// GET /api/documents/:id - Get a document with its flash cards
pub async fn get_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentDetail>> {
    let doc = owned_document(&state, user_id, &id)?;

    // Resolve cards in reference order; a dangling reference is skipped
    let flash_cards = doc
        .flash_cards
        .iter()
        .filter_map(|card_id| state.cards().get(card_id))
        .collect();

    Ok(Json(DocumentDetail {
        summary: DocumentSummary::from(&doc),
        flash_cards,
    }))
}

/// PATCH /api/documents/:id - Update title and/or summary
pub async fn update_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<Json<DocumentSummary>> {
    owned_document(&state, user_id, &id)?;

    if let Some(title) = &req.title {
        if title.trim().is_empty() {
            return Err(Error::validation("Title must not be empty"));
        }
    }

    let updated = state
        .documents()
        .update(&id, |d| {
            if let Some(title) = req.title {
                d.title = title;
            }
            if let Some(summary) = req.summary {
                d.summary = summary;
            }
            d.updated_at = Utc::now();
        })
        .ok_or_else(|| Error::NotFound("document".into()))?;

    Ok(Json(DocumentSummary::from(&updated)))
}

/// DELETE /api/documents/:id - Delete a document and all its flash cards
pub async fn delete_document(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    owned_document(&state, user_id, &id)?;

    let deleted_cards = state
        .delete_document_cascade(&id)
        .ok_or_else(|| Error::NotFound("document".into()))?;

    Ok(Json(serde_json::json!({
        "message": "Document and associated flash cards deleted",
        "deleted_flash_cards": deleted_cards,
    })))
}

/// Fetch a document and verify ownership.
pub(super) fn owned_document(state: &AppState, user_id: Uuid, id: &Uuid) -> Result<Document> {
    state
        .documents()
        .get(id)
        .filter(|d| d.user_id == user_id)
        .ok_or_else(|| Error::NotFound("document".into()))
}
