#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod paging;

pub use error::Error;
pub use paging::{PAGE_SIZE, page_count};
