//! Application state for the flash-card server

use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::generation::CardGenerator;
use crate::storage::MemoryStore;
use crate::types::{Document, FlashCard, User};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Flash card generator (Gemini in production, mocked in tests)
    generator: Arc<dyn CardGenerator>,
    /// Document records
    documents: MemoryStore<Document>,
    /// Flash card records
    cards: MemoryStore<FlashCard>,
    /// User records
    users: MemoryStore<User>,
    /// Bearer token -> user ID
    tokens: DashMap<String, Uuid>,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state around an injected generator.
    pub fn new(config: AppConfig, generator: Arc<dyn CardGenerator>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                generator,
                documents: MemoryStore::new(),
                cards: MemoryStore::new(),
                users: MemoryStore::new(),
                tokens: DashMap::new(),
                ready: RwLock::new(true),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the flash card generator
    pub fn generator(&self) -> &Arc<dyn CardGenerator> {
        &self.inner.generator
    }

    /// Get the document store
    pub fn documents(&self) -> &MemoryStore<Document> {
        &self.inner.documents
    }

    /// Get the flash card store
    pub fn cards(&self) -> &MemoryStore<FlashCard> {
        &self.inner.cards
    }

    /// Get the user store
    pub fn users(&self) -> &MemoryStore<User> {
        &self.inner.users
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }

    /// Issue a bearer token for a user.
    pub fn issue_token(&self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.inner.tokens.insert(token.clone(), user_id);
        token
    }

    /// Resolve a bearer token to a user ID.
    pub fn resolve_token(&self, token: &str) -> Option<Uuid> {
        self.inner.tokens.get(token).map(|entry| *entry.value())
    }

    /// Delete a document, all its flash cards, and the owner's back-reference
    /// as one logical unit. Returns the number of cards deleted, or `None`
    /// when the document does not exist.
    pub fn delete_document_cascade(&self, doc_id: &Uuid) -> Option<usize> {
        let doc = self.documents().get(doc_id)?;

        // Sweep by foreign key rather than the reference list so a card with
        // a dangling back-reference cannot survive the cascade.
        let orphans = self.cards().filter(|c| c.doc_id == *doc_id);
        let deleted = orphans.len();
        for card in orphans {
            self.cards().remove(&card.id);
        }

        self.documents().remove(doc_id);

        let unlinked = self
            .users()
            .update(&doc.user_id, |u| u.docs.retain(|id| id != doc_id));
        if unlinked.is_none() {
            tracing::warn!(user_id = %doc.user_id, %doc_id, "owner record missing during cascade delete");
        }

        tracing::info!(%doc_id, deleted_cards = deleted, "deleted document and its flash cards");
        Some(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::generation::GeneratedDeck;
    use crate::types::card::{CardContent, Difficulty};
    use async_trait::async_trait;

    struct NoGenerator;

    #[async_trait]
    impl CardGenerator for NoGenerator {
        async fn generate(&self, _content: &str) -> crate::error::Result<GeneratedDeck> {
            Err(Error::generation("not available in this test"))
        }
    }

    fn state() -> AppState {
        AppState::new(AppConfig::default(), Arc::new(NoGenerator))
    }

    fn seeded_doc(state: &AppState, cards: usize) -> (Uuid, Uuid) {
        let user = User::new("sam".into());
        let user_id = user.id;
        state.users().insert(user_id, user);

        let mut doc = Document::new("Notes".into(), "summary".into(), user_id);
        let doc_id = doc.id;
        for i in 0..cards {
            let content = CardContent::fill_in_blank(format!("q{} ___", i), "a".into()).unwrap();
            let card = FlashCard::new(doc_id, content, Difficulty::Easy);
            doc.flash_cards.push(card.id);
            state.cards().insert(card.id, card);
        }
        state.documents().insert(doc_id, doc);
        state.users().update(&user_id, |u| u.docs.push(doc_id));

        (user_id, doc_id)
    }

    #[test]
    fn cascade_delete_removes_cards_and_backreference() {
        let state = state();
        let (user_id, doc_id) = seeded_doc(&state, 3);

        let deleted = state.delete_document_cascade(&doc_id).unwrap();
        assert_eq!(deleted, 3);

        assert!(state.documents().get(&doc_id).is_none());
        assert!(state.cards().filter(|c| c.doc_id == doc_id).is_empty());
        assert!(!state.users().get(&user_id).unwrap().docs.contains(&doc_id));
    }

    #[test]
    fn cascade_delete_missing_document_is_none() {
        let state = state();
        assert!(state.delete_document_cascade(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn cascade_delete_leaves_other_documents_alone() {
        let state = state();
        let (_, doc_a) = seeded_doc(&state, 2);
        let (_, doc_b) = seeded_doc(&state, 2);

        state.delete_document_cascade(&doc_a).unwrap();

        assert!(state.documents().get(&doc_b).is_some());
        assert_eq!(state.cards().filter(|c| c.doc_id == doc_b).len(), 2);
    }

    #[test]
    fn tokens_resolve_to_their_user() {
        let state = state();
        let user = User::new("riley".into());
        let user_id = user.id;
        state.users().insert(user_id, user);

        let token = state.issue_token(user_id);
        assert_eq!(state.resolve_token(&token), Some(user_id));
        assert_eq!(state.resolve_token("bogus"), None);
    }
}
