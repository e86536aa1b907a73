//! Flash card generation via an external generative model
//!
//! Owns the prompt template, the Gemini HTTP client, and the parsing and
//! validation of the model's free-text response. The model output is treated
//! as untrusted input: nothing crosses into the persistence layer before the
//! full card schema has been validated.

mod gemini;
mod parser;
mod prompt;

pub use gemini::{CardGenerator, GeminiClient};
pub use parser::{parse_deck, GeneratedCard, GeneratedDeck};
pub use prompt::PromptBuilder;
