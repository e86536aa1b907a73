//! Prompt template for flash card generation

/// Prompt builder for the generative model
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the full flash card generation prompt.
    ///
    /// Deterministic: the same content and minimum always produce the same
    /// prompt. The template pins the exact output JSON shape, the enumerated
    /// card types and the difficulty range so the response parser has a
    /// stable contract to validate against.
    pub fn flash_card_prompt(content: &str, min_cards: usize) -> String {
        format!(
            r#"You are a flash card generation assistant. Your task is to analyze the content and create flash cards.
IMPORTANT: Your response must be a valid JSON object. Do not include any text before or after the JSON.

Create the following types of flash cards where you best see fit. Cover all relevant topics and key points. Generate at minimum {min_cards} cards:
1. Multiple choice questions
2. Fill in the blank questions (use ___ for the blank)
3. Matching pairs

Each card must be ranked by difficulty from 1-3 where 1 is the easiest and 3 is the hardest.

Use exactly this JSON structure and these keys:
{{
  "summary": "Brief summary of the content",
  "flashCards": [
    {{
      "type": "multiple_choice",
      "question": "Question text",
      "multipleChoice": {{
        "options": [
          {{"text": "Correct answer", "isCorrect": true}},
          {{"text": "Wrong answer 1", "isCorrect": false}},
          {{"text": "Wrong answer 2", "isCorrect": false}},
          {{"text": "Wrong answer 3", "isCorrect": false}}
        ]
      }},
      "difficulty": 2
    }},
    {{
      "type": "fill_in_blank",
      "question": "Question with ___ blank",
      "answer": "correct answer",
      "difficulty": 1
    }},
    {{
      "type": "matching",
      "matching": {{
        "pairs": [
          {{"question": "Term 1", "answer": "Definition 1"}},
          {{"question": "Term 2", "answer": "Definition 2"}},
          {{"question": "Term 3", "answer": "Definition 3"}}
        ]
      }},
      "difficulty": 3
    }}
  ]
}}

Content to analyze:
{content}"#,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_deterministic_and_embeds_contract() {
        let a = PromptBuilder::flash_card_prompt("photosynthesis notes", 5);
        let b = PromptBuilder::flash_card_prompt("photosynthesis notes", 5);
        assert_eq!(a, b);

        assert!(a.contains("photosynthesis notes"));
        assert!(a.contains("at minimum 5 cards"));
        assert!(a.contains("\"flashCards\""));
        assert!(a.contains("multiple_choice"));
        assert!(a.contains("fill_in_blank"));
        assert!(a.contains("matching"));
        assert!(a.contains("difficulty from 1-3"));
    }
}
