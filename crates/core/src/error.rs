use thiserror::Error;

use crate::model::QuestionValidationError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    QuestionValidation(#[from] QuestionValidationError),
}
