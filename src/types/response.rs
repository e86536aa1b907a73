//! Response DTOs for the HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::card::FlashCard;
use super::document::Document;

/// Summary of a document with a denormalized card count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document ID
    pub id: Uuid,
    /// Title
    pub title: String,
    /// Summary text
    pub summary: String,
    /// Number of flash cards in this document
    pub flash_card_count: usize,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            title: doc.title.clone(),
            summary: doc.summary.clone(),
            flash_card_count: doc.flash_card_count(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Response from the upload-and-generate pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Human-readable status message
    pub message: String,
    /// The created document
    pub document: DocumentSummary,
    /// Number of generated flash cards
    pub flash_card_count: usize,
}

/// A document with its cards embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDetail {
    #[serde(flatten)]
    pub summary: DocumentSummary,
    /// The document's flash cards in reference order
    pub flash_cards: Vec<FlashCard>,
}

/// Response for listing documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    /// List of the caller's documents
    pub documents: Vec<DocumentSummary>,
    /// Total count
    pub total_count: usize,
}

/// Response for listing the cards of a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardListResponse {
    pub flash_cards: Vec<FlashCard>,
    pub total_count: usize,
}

/// Response after registering a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// User ID
    pub user_id: Uuid,
    /// Display name
    pub username: String,
    /// Bearer token to present on subsequent requests
    pub token: String,
}
