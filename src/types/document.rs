//! Document and user records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title used when an upload does not supply one
pub const DEFAULT_TITLE: &str = "Untitled Document";

/// A user-owned container aggregating a source document and its derived cards.
///
/// Every ID in `flash_cards` must reference a card whose `doc_id` equals this
/// document's `id`. The ingest pipeline and the cascade delete are the only
/// code paths that mutate the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document ID
    pub id: Uuid,
    /// Title (non-empty)
    pub title: String,
    /// Summary of the source content (non-empty)
    pub summary: String,
    /// Owning user
    pub user_id: Uuid,
    /// Ordered flash card references
    pub flash_cards: Vec<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a new document record with no cards yet.
    pub fn new(title: String, summary: String, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            summary,
            user_id,
            flash_cards: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of cards referenced by this document
    pub fn flash_card_count(&self) -> usize {
        self.flash_cards.len()
    }
}

/// A user owning zero or more documents.
///
/// Identity management itself lives outside this service; this record only
/// carries what the backend needs (the document back-references).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: Uuid,
    /// Display name
    pub username: String,
    /// Documents owned by this user
    pub docs: Vec<Uuid>,
}

impl User {
    pub fn new(username: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            docs: Vec::new(),
        }
    }
}
