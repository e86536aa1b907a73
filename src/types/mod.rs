//! Core types for the flash-card backend

pub mod card;
pub mod document;
pub mod response;

pub use card::{CardContent, CardRuleError, ChoiceOption, Difficulty, FlashCard, MatchPair};
pub use document::{Document, User, DEFAULT_TITLE};
pub use response::{
    CardListResponse, DocumentDetail, DocumentListResponse, DocumentSummary, TokenResponse,
    UploadResponse,
};
