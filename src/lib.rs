//! studydeck: Turns uploaded study documents into AI-generated flash cards
//!
//! Upload a PDF, DOCX or plain-text file and the service extracts its text,
//! asks a generative AI model for a flash-card deck, validates the result and
//! persists the document together with its cards. Three card types are
//! supported: multiple choice, fill in the blank and matching.

pub mod config;
pub mod error;
pub mod extraction;
pub mod generation;
pub mod ingestion;
pub mod server;
pub mod storage;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{
    card::{CardContent, Difficulty, FlashCard},
    document::{Document, User},
};
