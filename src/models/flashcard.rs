//! Flashcard is a pair <question, answer>. Only text is used on either face
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flashcard_creation() {
        let card = Flashcard::new("What is ownership?", "A set of rules for memory management");

        assert_eq!(card.question, "What is ownership?");
        assert_eq!(card.answer, "A set of rules for memory management");
    }

    #[test]
    fn test_flashcard_ignores_generator_id() {
        // The generation service numbers its cards; the number carries no meaning here
        let card: Flashcard =
            serde_json::from_str(r#"{"id": 3, "question": "Q", "answer": "A"}"#).unwrap();

        assert_eq!(card, Flashcard::new("Q", "A"));
    }

    #[test]
    fn test_flashcard_requires_both_faces() {
        let result = serde_json::from_str::<Flashcard>(r#"{"question": "Q"}"#);
        assert!(result.is_err());
    }
}
