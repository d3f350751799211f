#![forbid(unsafe_code)]

pub mod api;
pub mod http;
pub mod memory;

pub use api::{CatalogApi, CatalogError, QuestionPage};
pub use http::HttpCatalogClient;
pub use memory::InMemoryCatalog;
