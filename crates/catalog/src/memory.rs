use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use trivia_core::model::{CategoryId, CategoryMap, Question, QuestionId, ValidatedQuestion};
use trivia_core::paging::PAGE_SIZE;

use crate::api::{CatalogApi, CatalogError, QuestionPage};

/// In-memory catalog for tests and prototyping.
///
/// Mirrors the live server's observable behavior: id ordering, ten-per-page
/// slicing, 404 for unknown ids and past-the-end browse pages, 400 for a
/// blank search term, and sequential id assignment.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    inner: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    categories: BTreeMap<CategoryId, String>,
    questions: BTreeMap<QuestionId, Question>,
    next_id: u64,
}

impl State {
    fn ordered_in(&self, category: Option<CategoryId>) -> Vec<&Question> {
        self.questions
            .values()
            .filter(|q| category.is_none_or(|c| q.category == c))
            .collect()
    }
}

fn not_found() -> CatalogError {
    CatalogError::api(404, "resource not found")
}

fn paginate(selection: &[&Question], page: u32) -> Vec<Question> {
    let start = page.saturating_sub(1) as usize * PAGE_SIZE as usize;
    selection
        .iter()
        .skip(start)
        .take(PAGE_SIZE as usize)
        .map(|q| (*q).clone())
        .collect()
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, CatalogError> {
        self.inner
            .lock()
            .map_err(|e| CatalogError::Unavailable(e.to_string()))
    }

    /// Seed a category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unavailable` if the state lock is poisoned.
    pub fn seed_category(
        &self,
        id: CategoryId,
        name: impl Into<String>,
    ) -> Result<(), CatalogError> {
        self.lock()?.categories.insert(id, name.into());
        Ok(())
    }

    /// Seed a question with a caller-chosen id, keeping id assignment ahead
    /// of the seeded range.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unavailable` if the state lock is poisoned.
    pub fn seed_question(&self, question: Question) -> Result<(), CatalogError> {
        let mut state = self.lock()?;
        state.next_id = state.next_id.max(question.id.value() + 1);
        state.questions.insert(question.id, question);
        Ok(())
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    async fn categories(&self) -> Result<CategoryMap, CatalogError> {
        let state = self.lock()?;
        if state.categories.is_empty() {
            return Err(not_found());
        }
        Ok(state
            .categories
            .iter()
            .map(|(id, name)| (*id, name.clone()))
            .collect())
    }

    async fn questions(&self, page: u32) -> Result<QuestionPage, CatalogError> {
        let state = self.lock()?;
        let selection = state.ordered_in(None);
        let current = paginate(&selection, page);
        // The server 404s on a past-the-end page of the unfiltered listing.
        if current.is_empty() {
            return Err(not_found());
        }
        Ok(QuestionPage {
            questions: current,
            total: selection.len() as u32,
        })
    }

    async fn questions_by_category(
        &self,
        category: CategoryId,
        page: u32,
    ) -> Result<QuestionPage, CatalogError> {
        let state = self.lock()?;
        if !state.categories.contains_key(&category) {
            return Err(not_found());
        }
        let selection = state.ordered_in(Some(category));
        // Unlike the unfiltered listing, an empty page here is just empty.
        Ok(QuestionPage {
            questions: paginate(&selection, page),
            total: selection.len() as u32,
        })
    }

    async fn search_questions(&self, term: &str) -> Result<QuestionPage, CatalogError> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Err(CatalogError::api(400, "bad request"));
        }
        let state = self.lock()?;
        let matches: Vec<Question> = state
            .ordered_in(None)
            .into_iter()
            .filter(|q| q.question.to_lowercase().contains(&term))
            .cloned()
            .collect();
        let total = matches.len() as u32;
        Ok(QuestionPage {
            questions: matches,
            total,
        })
    }

    async fn create_question(
        &self,
        question: &ValidatedQuestion,
    ) -> Result<QuestionId, CatalogError> {
        let mut state = self.lock()?;
        let id = QuestionId::new(state.next_id.max(1));
        state.next_id = id.value() + 1;
        state.questions.insert(id, question.clone().assign_id(id));
        Ok(id)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), CatalogError> {
        let mut state = self.lock()?;
        state.questions.remove(&id).ok_or_else(not_found)?;
        Ok(())
    }

    async fn next_quiz_question(
        &self,
        category: Option<CategoryId>,
        previous: &[QuestionId],
    ) -> Result<Option<Question>, CatalogError> {
        let state = self.lock()?;
        // The live server picks at random; lowest id keeps the fake
        // deterministic for tests.
        Ok(state
            .ordered_in(category)
            .into_iter()
            .find(|q| !previous.contains(&q.id))
            .cloned())
    }
}
