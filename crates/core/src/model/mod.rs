mod category;
mod ids;
mod question;

pub use category::CategoryMap;
pub use ids::{CategoryId, QuestionId};
pub use question::{Question, QuestionDraft, QuestionValidationError, ValidatedQuestion};
