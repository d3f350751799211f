#![forbid(unsafe_code)]

pub mod error;
pub mod list_view;
pub mod quiz;

pub use error::{ListViewError, QuizError};
pub use list_view::{ListMode, ListState, ListViewController};
pub use quiz::{QuizFlow, QuizPhase};
