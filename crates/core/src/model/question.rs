use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId};

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// A trivia question as served by the catalog. Immutable once fetched; the
/// server is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: u8,
}

/// User-entered question data before client-side validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: u8,
}

impl QuestionDraft {
    /// Validate the draft: text fields are trimmed and must be non-empty,
    /// difficulty must be in `1..=5`, and the category id must be assigned.
    ///
    /// # Errors
    ///
    /// Returns `QuestionValidationError` describing the first failing field.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionValidationError> {
        let question = self.question.trim().to_owned();
        if question.is_empty() {
            return Err(QuestionValidationError::EmptyQuestion);
        }

        let answer = self.answer.trim().to_owned();
        if answer.is_empty() {
            return Err(QuestionValidationError::EmptyAnswer);
        }

        if self.category.value() == 0 {
            return Err(QuestionValidationError::MissingCategory);
        }

        if !(1..=5).contains(&self.difficulty) {
            return Err(QuestionValidationError::DifficultyOutOfRange(
                self.difficulty,
            ));
        }

        Ok(ValidatedQuestion {
            question,
            answer,
            category: self.category,
            difficulty: self.difficulty,
        })
    }
}

/// A draft that passed validation and is ready to submit to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: u8,
}

impl ValidatedQuestion {
    /// Attach the server-assigned id, producing a full `Question`.
    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionValidationError {
    #[error("question text must not be empty")]
    EmptyQuestion,

    #[error("answer text must not be empty")]
    EmptyAnswer,

    #[error("a category must be selected")]
    MissingCategory,

    #[error("difficulty must be between 1 and 5, got {0}")]
    DifficultyOutOfRange(u8),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            question: "What is the capital of France?".into(),
            answer: "Paris".into(),
            category: CategoryId::new(3),
            difficulty: 2,
        }
    }

    #[test]
    fn draft_fails_if_question_blank() {
        let mut d = draft();
        d.question = "   ".into();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, QuestionValidationError::EmptyQuestion));
    }

    #[test]
    fn draft_fails_if_answer_blank() {
        let mut d = draft();
        d.answer = " ".into();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, QuestionValidationError::EmptyAnswer));
    }

    #[test]
    fn draft_fails_if_category_unassigned() {
        let mut d = draft();
        d.category = CategoryId::new(0);
        let err = d.validate().unwrap_err();
        assert!(matches!(err, QuestionValidationError::MissingCategory));
    }

    #[test]
    fn draft_rejects_out_of_range_difficulty() {
        for difficulty in [0, 6] {
            let mut d = draft();
            d.difficulty = difficulty;
            let err = d.validate().unwrap_err();
            assert_eq!(
                err,
                QuestionValidationError::DifficultyOutOfRange(difficulty)
            );
        }
    }

    #[test]
    fn valid_draft_trims_and_assigns_id() {
        let mut d = draft();
        d.question = "  Why is the sky blue?  ".into();
        d.answer = " Rayleigh scattering ".into();

        let validated = d.validate().unwrap();
        assert_eq!(validated.question, "Why is the sky blue?");
        assert_eq!(validated.answer, "Rayleigh scattering");

        let question = validated.assign_id(QuestionId::new(42));
        assert_eq!(question.id, QuestionId::new(42));
        assert_eq!(question.category, CategoryId::new(3));
        assert_eq!(question.difficulty, 2);
    }
}
