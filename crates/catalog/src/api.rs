use async_trait::async_trait;
use thiserror::Error;

use trivia_core::model::{CategoryId, CategoryMap, Question, QuestionId, ValidatedQuestion};

/// Errors surfaced by catalog clients.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// Network, DNS, or timeout failure, or an unreadable response body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the server-provided message when the
    /// body carries one, otherwise the status' canonical reason.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose payload does not match the documented shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The catalog backend could not be reached at all (in-memory lock
    /// failure; never produced by the HTTP client).
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    pub(crate) fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// One page (or one search result set) of questions, plus the catalog-wide
/// count the server reported for the whole selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total: u32,
}

/// Client contract for the question/category backend.
///
/// Implementations: [`crate::HttpCatalogClient`] over the live HTTP API and
/// [`crate::InMemoryCatalog`] for tests and prototyping.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch the full category map.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Api` with status 404 when the catalog has no
    /// categories, or other catalog errors.
    async fn categories(&self) -> Result<CategoryMap, CatalogError>;

    /// Fetch one page of questions, unfiltered, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Api` with status 404 when the page is past the
    /// end of the catalog, or other catalog errors.
    async fn questions(&self, page: u32) -> Result<QuestionPage, CatalogError>;

    /// Fetch one page of questions scoped to a category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Api` with status 404 for an unknown category,
    /// or other catalog errors.
    async fn questions_by_category(
        &self,
        category: CategoryId,
        page: u32,
    ) -> Result<QuestionPage, CatalogError>;

    /// Full-text search over question text. Results are unpaginated.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Api` with status 400 for a blank term, or
    /// other catalog errors.
    async fn search_questions(&self, term: &str) -> Result<QuestionPage, CatalogError>;

    /// Create a question; the server assigns and returns the id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog rejects the question or the
    /// request fails.
    async fn create_question(
        &self,
        question: &ValidatedQuestion,
    ) -> Result<QuestionId, CatalogError>;

    /// Delete a question by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Api` with status 404 when the id is unknown,
    /// or other catalog errors.
    async fn delete_question(&self, id: QuestionId) -> Result<(), CatalogError>;

    /// Fetch the next quiz question, excluding `previous` ids and scoped to
    /// `category` (`None` means any category). `Ok(None)` means no eligible
    /// question remains.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails.
    async fn next_quiz_question(
        &self,
        category: Option<CategoryId>,
        previous: &[QuestionId],
    ) -> Result<Option<Question>, CatalogError>;
}
