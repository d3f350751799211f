use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use catalog::CatalogApi;
use trivia_core::model::{CategoryId, Question, QuestionId};

use crate::error::QuizError;

//
// ─── QUIZ PHASE ────────────────────────────────────────────────────────────────
//

/// Where the quiz stands within the active category scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    /// No question requested yet.
    Idle,
    /// A question is on screen; the answer may or may not be revealed.
    Showing { question: Question, revealed: bool },
    /// Every eligible question has been seen. Terminal until the category
    /// changes.
    Exhausted,
}

//
// ─── QUIZ FLOW ─────────────────────────────────────────────────────────────────
//

/// Serves one not-yet-seen question at a time, scoped to a category.
///
/// Seen ids only grow within a category scope; changing the category resets
/// them. The currently showing question is never in the seen set until the
/// player advances past it.
pub struct QuizFlow {
    catalog: Arc<dyn CatalogApi>,
    category: Option<CategoryId>,
    seen: BTreeSet<QuestionId>,
    phase: QuizPhase,
}

impl QuizFlow {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogApi>, category: Option<CategoryId>) -> Self {
        Self {
            catalog,
            category,
            seen: BTreeSet::new(),
            phase: QuizPhase::Idle,
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    #[must_use]
    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    /// The question currently on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Question> {
        match &self.phase {
            QuizPhase::Showing { question, .. } => Some(question),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self.phase, QuizPhase::Exhausted)
    }

    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Fetch the next not-yet-seen question in scope. Lands in `Showing`
    /// with the answer hidden, or in `Exhausted` when the catalog reports no
    /// eligible question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Catalog` if the fetch fails; the phase is
    /// unchanged in that case.
    pub async fn next(&mut self) -> Result<&QuizPhase, QuizError> {
        let previous: Vec<QuestionId> = self.seen.iter().copied().collect();
        match self
            .catalog
            .next_quiz_question(self.category, &previous)
            .await?
        {
            Some(question) => {
                self.phase = QuizPhase::Showing {
                    question,
                    revealed: false,
                };
            }
            None => {
                debug!(seen = self.seen.len(), "quiz exhausted");
                self.phase = QuizPhase::Exhausted;
            }
        }
        Ok(&self.phase)
    }

    /// Reveal the answer of the current question. No network effect.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotShowing` when no question is on screen.
    pub fn reveal(&mut self) -> Result<&Question, QuizError> {
        match &mut self.phase {
            QuizPhase::Showing { question, revealed } => {
                *revealed = true;
                Ok(question)
            }
            _ => Err(QuizError::NotShowing),
        }
    }

    /// Record the current question as seen and fetch the next one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotShowing` when no question is on screen, or
    /// `QuizError::Catalog` if the fetch fails.
    pub async fn advance(&mut self) -> Result<&QuizPhase, QuizError> {
        let QuizPhase::Showing { question, .. } = &self.phase else {
            return Err(QuizError::NotShowing);
        };
        self.seen.insert(question.id);
        self.next().await
    }

    /// Change the active category: seen ids reset, the phase returns to
    /// `Idle`, and the first question of the new scope is fetched.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Catalog` if the fetch fails.
    pub async fn set_category(
        &mut self,
        category: Option<CategoryId>,
    ) -> Result<&QuizPhase, QuizError> {
        self.category = category;
        self.seen.clear();
        self.phase = QuizPhase::Idle;
        self.next().await
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
