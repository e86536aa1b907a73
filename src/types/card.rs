//! Flash card types with per-variant invariants enforced at construction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Marker the prompt asks the model to place in fill-in-the-blank questions
pub const BLANK_MARKER: &str = "___";

/// Violation of a record-level card invariant
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardRuleError {
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error("fill-in-blank question must contain the blank marker '{BLANK_MARKER}'")]
    MissingBlankMarker,
    #[error("fill-in-blank answer must not be empty")]
    EmptyAnswer,
    #[error("multiple choice cards must have at least two options, got {0}")]
    TooFewOptions(usize),
    #[error("multiple choice cards must have exactly one correct answer, got {0}")]
    NotExactlyOneCorrect(usize),
    #[error("matching cards must have at least two pairs, got {0}")]
    TooFewPairs(usize),
}

/// Difficulty rank of a card (1 easiest, 3 hardest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Easy),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Hard),
            other => Err(format!("difficulty must be 1, 2 or 3, got {}", other)),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> u8 {
        match value {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// One answer option of a multiple choice card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

/// One question/answer pair of a matching card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub question: String,
    pub answer: String,
}

/// Variant-specific card payload.
///
/// The constructors are the only validated way to build a variant; records
/// deserialized from client input must be checked with [`CardContent::validate`]
/// before they are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardContent {
    MultipleChoice {
        question: String,
        options: Vec<ChoiceOption>,
    },
    FillInBlank {
        question: String,
        answer: String,
    },
    Matching {
        pairs: Vec<MatchPair>,
    },
}

impl CardContent {
    /// Build a multiple choice card; exactly one option must be correct.
    pub fn multiple_choice(
        question: String,
        options: Vec<ChoiceOption>,
    ) -> Result<Self, CardRuleError> {
        let content = Self::MultipleChoice { question, options };
        content.validate()?;
        Ok(content)
    }

    /// Build a fill-in-the-blank card; the question must contain the blank marker.
    pub fn fill_in_blank(question: String, answer: String) -> Result<Self, CardRuleError> {
        let content = Self::FillInBlank { question, answer };
        content.validate()?;
        Ok(content)
    }

    /// Build a matching card; at least two pairs are required.
    pub fn matching(pairs: Vec<MatchPair>) -> Result<Self, CardRuleError> {
        let content = Self::Matching { pairs };
        content.validate()?;
        Ok(content)
    }

    /// Check the variant invariants of this payload.
    pub fn validate(&self) -> Result<(), CardRuleError> {
        match self {
            Self::MultipleChoice { question, options } => {
                if question.trim().is_empty() {
                    return Err(CardRuleError::EmptyQuestion);
                }
                if options.len() < 2 {
                    return Err(CardRuleError::TooFewOptions(options.len()));
                }
                let correct = options.iter().filter(|o| o.is_correct).count();
                if correct != 1 {
                    return Err(CardRuleError::NotExactlyOneCorrect(correct));
                }
            }
            Self::FillInBlank { question, answer } => {
                if question.trim().is_empty() {
                    return Err(CardRuleError::EmptyQuestion);
                }
                if !question.contains(BLANK_MARKER) {
                    return Err(CardRuleError::MissingBlankMarker);
                }
                if answer.trim().is_empty() {
                    return Err(CardRuleError::EmptyAnswer);
                }
            }
            Self::Matching { pairs } => {
                if pairs.len() < 2 {
                    return Err(CardRuleError::TooFewPairs(pairs.len()));
                }
            }
        }
        Ok(())
    }

    /// Variant name as it appears on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MultipleChoice { .. } => "multiple_choice",
            Self::FillInBlank { .. } => "fill_in_blank",
            Self::Matching { .. } => "matching",
        }
    }
}

/// A persisted flash card belonging to exactly one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashCard {
    /// Card ID
    pub id: Uuid,
    /// Owning document ID
    pub doc_id: Uuid,
    /// Variant payload
    #[serde(flatten)]
    pub content: CardContent,
    /// Difficulty rank
    pub difficulty: Difficulty,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl FlashCard {
    /// Create a new card record for a document.
    ///
    /// The content is expected to be already validated (built via a
    /// `CardContent` constructor or checked with `validate`).
    pub fn new(doc_id: Uuid, content: CardContent, difficulty: Difficulty) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            doc_id,
            content,
            difficulty,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(correct: &[bool]) -> Vec<ChoiceOption> {
        correct
            .iter()
            .enumerate()
            .map(|(i, &is_correct)| ChoiceOption {
                text: format!("option {}", i),
                is_correct,
            })
            .collect()
    }

    #[test]
    fn multiple_choice_requires_exactly_one_correct() {
        assert!(CardContent::multiple_choice("Q?".into(), options(&[true, false, false])).is_ok());

        let none = CardContent::multiple_choice("Q?".into(), options(&[false, false]));
        assert_eq!(none.unwrap_err(), CardRuleError::NotExactlyOneCorrect(0));

        let two = CardContent::multiple_choice("Q?".into(), options(&[true, true, false]));
        assert_eq!(two.unwrap_err(), CardRuleError::NotExactlyOneCorrect(2));
    }

    #[test]
    fn multiple_choice_requires_question_and_options() {
        let empty_q = CardContent::multiple_choice("  ".into(), options(&[true, false]));
        assert_eq!(empty_q.unwrap_err(), CardRuleError::EmptyQuestion);

        let one_opt = CardContent::multiple_choice("Q?".into(), options(&[true]));
        assert_eq!(one_opt.unwrap_err(), CardRuleError::TooFewOptions(1));
    }

    #[test]
    fn fill_in_blank_requires_marker_and_answer() {
        assert!(CardContent::fill_in_blank("Water boils at ___ degrees".into(), "100".into()).is_ok());

        let no_marker = CardContent::fill_in_blank("Water boils at".into(), "100".into());
        assert_eq!(no_marker.unwrap_err(), CardRuleError::MissingBlankMarker);

        let no_answer = CardContent::fill_in_blank("Boils at ___".into(), "".into());
        assert_eq!(no_answer.unwrap_err(), CardRuleError::EmptyAnswer);
    }

    #[test]
    fn matching_requires_two_pairs() {
        let pair = |q: &str, a: &str| MatchPair {
            question: q.into(),
            answer: a.into(),
        };

        assert!(CardContent::matching(vec![pair("a", "1"), pair("b", "2")]).is_ok());

        let one = CardContent::matching(vec![pair("a", "1")]);
        assert_eq!(one.unwrap_err(), CardRuleError::TooFewPairs(1));
    }

    #[test]
    fn difficulty_rejects_out_of_range() {
        assert_eq!(Difficulty::try_from(1).unwrap(), Difficulty::Easy);
        assert_eq!(Difficulty::try_from(3).unwrap(), Difficulty::Hard);
        assert!(Difficulty::try_from(0).is_err());
        assert!(Difficulty::try_from(4).is_err());
    }

    #[test]
    fn card_serializes_with_variant_tag() {
        let content =
            CardContent::fill_in_blank("Rust was released in ___".into(), "2015".into()).unwrap();
        let card = FlashCard::new(Uuid::new_v4(), content, Difficulty::Medium);

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["type"], "fill_in_blank");
        assert_eq!(value["difficulty"], 2);
        assert_eq!(value["answer"], "2015");
    }
}
