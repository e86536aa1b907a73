//! Parsing and validation of the model's free-text response
//!
//! The raw output may carry prose around the JSON object. The substring
//! between the first `{` and the last `}` is extracted before parsing; the
//! parsed wire shape is then converted into constructor-validated card
//! payloads so invariant violations never reach the stores.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::card::{CardContent, ChoiceOption, Difficulty, MatchPair};

/// A fully validated generation result
#[derive(Debug, Clone)]
pub struct GeneratedDeck {
    /// Summary of the source content
    pub summary: String,
    /// Validated cards, in model output order
    pub cards: Vec<GeneratedCard>,
}

/// A single validated card from the model
#[derive(Debug, Clone)]
pub struct GeneratedCard {
    pub content: CardContent,
    pub difficulty: Difficulty,
}

/// Wire shape of the model response (camelCase keys pinned by the prompt)
#[derive(Debug, Deserialize)]
struct RawDeck {
    summary: String,
    #[serde(rename = "flashCards", default)]
    flash_cards: Vec<RawCard>,
}

#[derive(Debug, Deserialize)]
struct RawCard {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(rename = "multipleChoice", default)]
    multiple_choice: Option<RawMultipleChoice>,
    #[serde(default)]
    matching: Option<RawMatching>,
    #[serde(default)]
    difficulty: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct RawMultipleChoice {
    options: Vec<ChoiceOption>,
}

#[derive(Debug, Deserialize)]
struct RawMatching {
    pairs: Vec<MatchPair>,
}

/// Parse a raw model response into a validated deck.
pub fn parse_deck(raw: &str) -> Result<GeneratedDeck> {
    let json = extract_json_object(raw)?;

    let deck: RawDeck = serde_json::from_str(json).map_err(|e| {
        tracing::error!(error = %e, "AI response JSON failed to parse");
        Error::MalformedAiResponse
    })?;

    if deck.summary.trim().is_empty() {
        return Err(Error::InvalidGeneratedCard("deck summary is empty".into()));
    }
    if deck.flash_cards.is_empty() {
        return Err(Error::InvalidGeneratedCard("deck contains no cards".into()));
    }

    let mut cards = Vec::with_capacity(deck.flash_cards.len());
    for (i, raw_card) in deck.flash_cards.into_iter().enumerate() {
        let card = convert_card(raw_card)
            .map_err(|e| match e {
                Error::InvalidGeneratedCard(msg) => {
                    Error::InvalidGeneratedCard(format!("card {}: {}", i, msg))
                }
                other => other,
            })?;
        cards.push(card);
    }

    Ok(GeneratedDeck {
        summary: deck.summary,
        cards,
    })
}

/// Slice out the JSON object between the first `{` and the last `}`.
fn extract_json_object(raw: &str) -> Result<&str> {
    let start = raw.find('{');
    let end = raw.rfind('}');

    match (start, end) {
        (Some(start), Some(end)) if start <= end => Ok(&raw[start..=end]),
        _ => {
            tracing::error!("AI response contains no JSON object structure");
            Err(Error::MalformedAiResponse)
        }
    }
}

fn convert_card(raw: RawCard) -> Result<GeneratedCard> {
    let difficulty = raw
        .difficulty
        .ok_or_else(|| Error::InvalidGeneratedCard("missing difficulty".into()))?;
    let difficulty = Difficulty::try_from(difficulty).map_err(Error::InvalidGeneratedCard)?;

    let content = match raw.kind.as_str() {
        "multiple_choice" => {
            let question = require(raw.question, "question")?;
            let payload = raw
                .multiple_choice
                .ok_or_else(|| Error::InvalidGeneratedCard("missing multipleChoice payload".into()))?;
            CardContent::multiple_choice(question, payload.options)
        }
        "fill_in_blank" => {
            let question = require(raw.question, "question")?;
            let answer = require(raw.answer, "answer")?;
            CardContent::fill_in_blank(question, answer)
        }
        "matching" => {
            let payload = raw
                .matching
                .ok_or_else(|| Error::InvalidGeneratedCard("missing matching payload".into()))?;
            CardContent::matching(payload.pairs)
        }
        other => {
            return Err(Error::InvalidGeneratedCard(format!(
                "unrecognized card type '{}'",
                other
            )))
        }
    };

    let content = content.map_err(|e| Error::InvalidGeneratedCard(e.to_string()))?;

    Ok(GeneratedCard {
        content,
        difficulty,
    })
}

fn require(field: Option<String>, name: &str) -> Result<String> {
    field.ok_or_else(|| Error::InvalidGeneratedCard(format!("missing {}", name)))
}
