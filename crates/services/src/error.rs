//! Shared error types for the services crate.

use thiserror::Error;

use catalog::CatalogError;
use trivia_core::model::QuestionValidationError;

/// Errors emitted by `ListViewController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ListViewError {
    #[error("page {page} is out of range 1..={page_count}")]
    PageOutOfRange { page: u32, page_count: u32 },
    #[error("pagination does not apply while search results are shown")]
    SearchUnpaginated,
    #[error(transparent)]
    Validation(#[from] QuestionValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors emitted by `QuizFlow`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no question is currently showing")]
    NotShowing,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
