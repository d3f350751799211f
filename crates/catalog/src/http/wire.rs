//! Wire shapes for the catalog HTTP API.
//!
//! These mirror the server JSON one-for-one; domain conversions happen here
//! so the rest of the crate only sees `trivia-core` types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use trivia_core::model::{CategoryId, CategoryMap, Question};

use crate::api::{CatalogError, QuestionPage};

/// Error payload the server attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

/// `GET /categories` response. Category ids arrive as JSON object keys,
/// i.e. strings, and are parsed into numeric ids here.
#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesResponse {
    pub categories: BTreeMap<String, String>,
}

impl CategoriesResponse {
    pub(crate) fn into_map(self) -> Result<CategoryMap, CatalogError> {
        self.categories
            .into_iter()
            .map(|(id, name)| {
                let id = id.parse::<u64>().map_err(|_| {
                    CatalogError::Decode(format!("non-numeric category id {id:?}"))
                })?;
                Ok((CategoryId::new(id), name))
            })
            .collect()
    }
}

/// Shared shape of `GET /questions`, `GET /categories/{id}/questions`, and
/// `POST /questions/search` responses.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsResponse {
    pub questions: Vec<Question>,
    pub total_questions: u32,
}

impl From<QuestionsResponse> for QuestionPage {
    fn from(response: QuestionsResponse) -> Self {
        Self {
            questions: response.questions,
            total: response.total_questions,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    #[serde(rename = "searchTerm")]
    pub search_term: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateQuestionRequest<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub category: u64,
    pub difficulty: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedResponse {
    pub created: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeletedResponse {
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuizRequest {
    pub quiz_category: QuizCategory,
    pub previous_questions: Vec<u64>,
}

/// The server reads only `id`; 0 means "any category".
#[derive(Debug, Serialize)]
pub(crate) struct QuizCategory {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuizResponse {
    pub question: Option<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keys_parse_to_numeric_ids() {
        let response: CategoriesResponse =
            serde_json::from_str(r#"{"categories": {"1": "Science", "2": "Art"}}"#).unwrap();
        let map = response.into_map().unwrap();
        assert_eq!(map.name(CategoryId::new(1)), Some("Science"));
        assert_eq!(map.name(CategoryId::new(2)), Some("Art"));
    }

    #[test]
    fn non_numeric_category_key_is_a_decode_error() {
        let response: CategoriesResponse =
            serde_json::from_str(r#"{"categories": {"sports": "Sports"}}"#).unwrap();
        let err = response.into_map().unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[test]
    fn search_request_uses_server_field_name() {
        let body = serde_json::to_string(&SearchRequest {
            search_term: "capital",
        })
        .unwrap();
        assert_eq!(body, r#"{"searchTerm":"capital"}"#);
    }

    #[test]
    fn quiz_request_matches_server_shape() {
        let body = serde_json::to_string(&QuizRequest {
            quiz_category: QuizCategory { id: 0 },
            previous_questions: vec![5, 7],
        })
        .unwrap();
        assert_eq!(
            body,
            r#"{"quiz_category":{"id":0},"previous_questions":[5,7]}"#
        );
    }
}
