//! Ingestion orchestration

use chrono::Utc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::extraction::{MediaType, TextExtractor};
use crate::generation::GeneratedCard;
use crate::server::state::AppState;
use crate::types::{Document, FlashCard, DEFAULT_TITLE};

/// Result of a successful ingest
#[derive(Debug)]
pub struct IngestOutcome {
    /// The finalized document, card references included
    pub document: Document,
    /// Number of flash cards created
    pub card_count: usize,
}

/// Run one upload through extraction, generation and persistence.
///
/// Failure before the document record exists surfaces the component error
/// unchanged. Failure once child records have been created rolls the created
/// cards and the document back before returning. A failing owner-list update
/// is logged and tolerated: the document and cards are valid standalone.
pub async fn ingest_upload(
    state: &AppState,
    user_id: Uuid,
    title: Option<String>,
    declared_media_type: &str,
    data: &[u8],
) -> Result<IngestOutcome> {
    // 1. Media type gate, before any extraction work
    let media_type = MediaType::from_mime(declared_media_type)?;

    // 2. Extraction
    let text = TextExtractor::extract(media_type, data)?;

    // 3. Generation (single awaited call, validated deck or typed error)
    let deck = state.generator().generate(&text).await?;

    // 4. Document record first, so cards can carry its ID
    let title = title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let document = Document::new(title, deck.summary.clone(), user_id);
    let doc_id = document.id;
    state.documents().insert(doc_id, document);

    // 5. Card batch: independent per card, joined as a whole. One failed
    //    card fails the ingest, never a silently thinner deck.
    let creations = deck
        .cards
        .into_iter()
        .map(|card| create_card(state, doc_id, card));
    let results = futures::future::join_all(creations).await;

    let mut card_ids = Vec::with_capacity(results.len());
    let mut failure = None;
    for result in results {
        match result {
            Ok(id) => card_ids.push(id),
            Err(e) => failure = Some(e),
        }
    }

    if let Some(err) = failure {
        rollback(state, doc_id);
        return Err(err);
    }

    // 6. Attach the ordered card list to the document
    let card_count = card_ids.len();
    let document = attach_cards(state, doc_id, card_ids)?;

    // 7. Owner back-reference; absence is logged, not rolled back
    let linked = state.users().update(&user_id, |u| u.docs.push(doc_id));
    if linked.is_none() {
        tracing::warn!(%user_id, %doc_id, "owner record missing, document left unlinked");
    }

    tracing::info!(%doc_id, card_count, "ingested document");
    Ok(IngestOutcome {
        document,
        card_count,
    })
}

/// Create one card record after a record-level re-validation.
async fn create_card(state: &AppState, doc_id: Uuid, generated: GeneratedCard) -> Result<Uuid> {
    generated
        .content
        .validate()
        .map_err(|e| Error::InvalidGeneratedCard(e.to_string()))?;

    let card = FlashCard::new(doc_id, generated.content, generated.difficulty);
    let id = card.id;
    state.cards().insert(id, card);
    Ok(id)
}

/// Attach the ordered card list to the document record.
///
/// The document can be deleted in the window between its creation and this
/// update; a concurrent cascade delete sweeps only the cards present at
/// that instant. Cards inserted after the sweep must not outlive it, so a
/// miss here rolls the whole batch back.
fn attach_cards(state: &AppState, doc_id: Uuid, card_ids: Vec<Uuid>) -> Result<Document> {
    let updated = state.documents().update(&doc_id, |d| {
        d.flash_cards = card_ids;
        d.updated_at = Utc::now();
    });

    match updated {
        Some(document) => Ok(document),
        None => {
            rollback(state, doc_id);
            Err(Error::internal("document deleted during ingest"))
        }
    }
}

/// Compensating cleanup: delete every card created for the document, then
/// the document itself.
fn rollback(state: &AppState, doc_id: Uuid) {
    let created = state.cards().filter(|c| c.doc_id == doc_id);
    for card in &created {
        state.cards().remove(&card.id);
    }
    state.documents().remove(&doc_id);
    tracing::warn!(%doc_id, removed_cards = created.len(), "rolled back partial ingest");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::generation::{CardGenerator, GeneratedDeck};
    use crate::types::card::{CardContent, ChoiceOption, Difficulty, MatchPair};
    use crate::types::User;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Generator returning a canned deck (or error) and counting calls
    struct MockGenerator {
        deck: std::result::Result<GeneratedDeck, String>,
        calls: AtomicUsize,
    }

    impl MockGenerator {
        fn ok(deck: GeneratedDeck) -> Arc<Self> {
            Arc::new(Self {
                deck: Ok(deck),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                deck: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CardGenerator for MockGenerator {
        async fn generate(&self, _content: &str) -> Result<GeneratedDeck> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.deck {
                Ok(deck) => Ok(deck.clone()),
                Err(msg) => Err(Error::generation(msg.clone())),
            }
        }
    }

    fn valid_card(i: usize) -> GeneratedCard {
        GeneratedCard {
            content: CardContent::fill_in_blank(format!("question {} ___", i), "answer".into())
                .unwrap(),
            difficulty: Difficulty::Easy,
        }
    }

    fn five_card_deck() -> GeneratedDeck {
        GeneratedDeck {
            summary: "A study summary".into(),
            cards: (0..5).map(valid_card).collect(),
        }
    }

    fn state_with(generator: Arc<MockGenerator>) -> (AppState, Uuid) {
        let state = AppState::new(AppConfig::default(), generator);
        let user = User::new("casey".into());
        let user_id = user.id;
        state.users().insert(user_id, user);
        (state, user_id)
    }

    #[tokio::test]
    async fn uploads_text_file_end_to_end() {
        let generator = MockGenerator::ok(five_card_deck());
        let (state, user_id) = state_with(generator.clone());

        let outcome = ingest_upload(
            &state,
            user_id,
            Some("Biology notes".into()),
            "text/plain",
            b"The cell is the basic unit of life.",
        )
        .await
        .unwrap();

        assert_eq!(outcome.card_count, 5);
        assert_eq!(outcome.document.title, "Biology notes");
        assert_eq!(outcome.document.summary, "A study summary");
        assert_eq!(outcome.document.flash_cards.len(), 5);

        // All cards persisted and pointing back at the document
        let cards = state.cards().filter(|c| c.doc_id == outcome.document.id);
        assert_eq!(cards.len(), 5);
        for id in &outcome.document.flash_cards {
            assert!(state.cards().get(id).is_some());
        }

        // Owner back-reference
        let user = state.users().get(&user_id).unwrap();
        assert!(user.docs.contains(&outcome.document.id));

        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn missing_title_defaults() {
        let (state, user_id) = state_with(MockGenerator::ok(five_card_deck()));

        let outcome = ingest_upload(&state, user_id, None, "text/plain", b"notes")
            .await
            .unwrap();
        assert_eq!(outcome.document.title, DEFAULT_TITLE);

        let blank = ingest_upload(&state, user_id, Some("   ".into()), "text/plain", b"notes")
            .await
            .unwrap();
        assert_eq!(blank.document.title, DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn unsupported_media_type_fails_before_generation() {
        let generator = MockGenerator::ok(five_card_deck());
        let (state, user_id) = state_with(generator.clone());

        let err = ingest_upload(&state, user_id, None, "image/png", b"...")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedMediaType(_)));
        assert_eq!(generator.call_count(), 0);
        assert!(state.documents().is_empty());
    }

    #[tokio::test]
    async fn generation_failure_persists_nothing() {
        let (state, user_id) = state_with(MockGenerator::failing("quota exceeded"));

        let err = ingest_upload(&state, user_id, None, "text/plain", b"notes")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::GenerationFailed(_)));
        assert!(state.documents().is_empty());
        assert!(state.cards().is_empty());
    }

    #[tokio::test]
    async fn invalid_card_in_batch_rolls_everything_back() {
        // Bypass the constructors to simulate an invariant violation that
        // only surfaces at record creation: two correct options.
        let bad_card = GeneratedCard {
            content: CardContent::MultipleChoice {
                question: "Q?".into(),
                options: vec![
                    ChoiceOption {
                        text: "a".into(),
                        is_correct: true,
                    },
                    ChoiceOption {
                        text: "b".into(),
                        is_correct: true,
                    },
                ],
            },
            difficulty: Difficulty::Medium,
        };
        let deck = GeneratedDeck {
            summary: "s".into(),
            cards: vec![valid_card(0), bad_card, valid_card(1)],
        };
        let (state, user_id) = state_with(MockGenerator::ok(deck));

        let err = ingest_upload(&state, user_id, None, "text/plain", b"notes")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidGeneratedCard(_)));
        assert!(state.documents().is_empty());
        assert!(state.cards().is_empty());
        assert!(state.users().get(&user_id).unwrap().docs.is_empty());
    }

    #[tokio::test]
    async fn matching_card_with_one_pair_rolls_back() {
        let bad_card = GeneratedCard {
            content: CardContent::Matching {
                pairs: vec![MatchPair {
                    question: "a".into(),
                    answer: "1".into(),
                }],
            },
            difficulty: Difficulty::Hard,
        };
        let deck = GeneratedDeck {
            summary: "s".into(),
            cards: vec![bad_card],
        };
        let (state, user_id) = state_with(MockGenerator::ok(deck));

        let err = ingest_upload(&state, user_id, None, "text/plain", b"notes")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidGeneratedCard(_)));
        assert!(state.documents().is_empty());
        assert!(state.cards().is_empty());
    }

    #[tokio::test]
    async fn document_deleted_during_ingest_sweeps_late_cards() {
        // A cascade delete racing the card batch removes the document and the
        // cards present at that moment; cards inserted afterwards must be
        // swept when the final attach finds the document gone.
        let (state, _user_id) = state_with(MockGenerator::ok(five_card_deck()));
        let doc_id = Uuid::new_v4();

        let mut card_ids = Vec::new();
        for i in 0..3 {
            let card = FlashCard::new(doc_id, valid_card(i).content, Difficulty::Easy);
            card_ids.push(card.id);
            state.cards().insert(card.id, card);
        }

        let err = attach_cards(&state, doc_id, card_ids).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        assert!(state.cards().is_empty());
    }

    #[tokio::test]
    async fn missing_owner_is_tolerated() {
        let generator = MockGenerator::ok(five_card_deck());
        let state = AppState::new(AppConfig::default(), generator);
        let ghost = Uuid::new_v4();

        let outcome = ingest_upload(&state, ghost, None, "text/plain", b"notes")
            .await
            .unwrap();

        // Document and cards exist and are valid standalone
        assert!(state.documents().get(&outcome.document.id).is_some());
        assert_eq!(state.cards().len(), 5);
    }
}
