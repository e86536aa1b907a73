//! Flash card management endpoints

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
use crate::server::routes::documents::owned_document;
use crate::server::state::AppState;
use crate::types::card::{CardContent, Difficulty, FlashCard};
use crate::types::CardListResponse;

/// Body for POST /api/documents/:id/cards
#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    #[serde(flatten)]
    pub content: CardContent,
    pub difficulty: Difficulty,
}

/// Body for PATCH /api/cards/:id
#[derive(Debug, Deserialize)]
pub struct UpdateCardRequest {
    #[serde(flatten)]
    pub content: Option<CardContent>,
    pub difficulty: Option<Difficulty>,
}

/// POST /api/documents/:id/cards - Add a flash card to a document
pub async fn create_card(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(doc_id): Path<Uuid>,
    Json(req): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<FlashCard>)> {
    owned_document(&state, user_id, &doc_id)?;

    // Deserialization alone does not enforce the per-type rules
    req.content
        .validate()
        .map_err(|e| Error::validation(e.to_string()))?;

    let card = FlashCard::new(doc_id, req.content, req.difficulty);
    let card_id = card.id;
    state.cards().insert(card_id, card.clone());
    attach_to_document(&state, doc_id, card_id)?;

    Ok((StatusCode::CREATED, Json(card)))
}

/// GET /api/documents/:id/cards - List a document's flash cards
pub async fn list_cards(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(doc_id): Path<Uuid>,
) -> Result<Json<CardListResponse>> {
    let doc = owned_document(&state, user_id, &doc_id)?;

    let flash_cards: Vec<FlashCard> = doc
        .flash_cards
        .iter()
        .filter_map(|card_id| state.cards().get(card_id))
        .collect();
    let total_count = flash_cards.len();

    Ok(Json(CardListResponse {
        flash_cards,
        total_count,
    }))
}

/// GET /api/cards/:id - Get a single flash card
pub async fn get_card(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<FlashCard>> {
    let card = owned_card(&state, user_id, &id)?;
    Ok(Json(card))
}

/// PATCH /api/cards/:id - Update a flash card's content or difficulty
pub async fn update_card(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCardRequest>,
) -> Result<Json<FlashCard>> {
    owned_card(&state, user_id, &id)?;

    if let Some(content) = &req.content {
        content
            .validate()
            .map_err(|e| Error::validation(e.to_string()))?;
    }

    let updated = state
        .cards()
        .update(&id, |c| {
            if let Some(content) = req.content {
                c.content = content;
            }
            if let Some(difficulty) = req.difficulty {
                c.difficulty = difficulty;
            }
            c.updated_at = Utc::now();
        })
        .ok_or_else(|| Error::NotFound("flash card".into()))?;

    Ok(Json(updated))
}

/// DELETE /api/cards/:id - Delete a flash card
pub async fn delete_card(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let card = owned_card(&state, user_id, &id)?;

    state.cards().remove(&id);
    state.documents().update(&card.doc_id, |d| {
        d.flash_cards.retain(|card_id| card_id != &id);
        d.updated_at = Utc::now();
    });

    Ok(Json(serde_json::json!({
        "message": "Flash card deleted",
    })))
}

/// Push a freshly inserted card onto its document's reference list.
///
/// The document can be deleted between the ownership check and this update;
/// the inserted card must not survive as an orphan, so a miss removes it
/// again and surfaces `NotFound`.
fn attach_to_document(state: &AppState, doc_id: Uuid, card_id: Uuid) -> Result<()> {
    let attached = state.documents().update(&doc_id, |d| {
        d.flash_cards.push(card_id);
        d.updated_at = Utc::now();
    });

    if attached.is_none() {
        state.cards().remove(&card_id);
        return Err(Error::NotFound("document".into()));
    }
    Ok(())
}

/// Fetch a card and verify its document belongs to the caller.
fn owned_card(state: &AppState, user_id: Uuid, id: &Uuid) -> Result<FlashCard> {
    let card = state
        .cards()
        .get(id)
        .ok_or_else(|| Error::NotFound("flash card".into()))?;
    owned_document(state, user_id, &card.doc_id)?;
    Ok(card)
}
