use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use trivia_core::model::{CategoryId, CategoryMap, Question, QuestionId, ValidatedQuestion};

use crate::api::{CatalogApi, CatalogError, QuestionPage};

mod wire;

/// Catalog client over the live HTTP API.
///
/// The base address is an explicit constructor parameter rather than ambient
/// process state; callers decide where it comes from.
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Build the client around an existing `reqwest::Client`, e.g. one with
    /// custom timeouts.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Decode a response, surfacing the server's `message` field on non-2xx
/// statuses and falling back to the status' canonical reason when the body
/// carries none.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<wire::ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status_text(status));
        return Err(CatalogError::api(status.as_u16(), message));
    }
    Ok(response.json::<T>().await?)
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_owned()
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn categories(&self) -> Result<CategoryMap, CatalogError> {
        debug!("GET /categories");
        let response = self.client.get(self.url("/categories")).send().await?;
        decode::<wire::CategoriesResponse>(response).await?.into_map()
    }

    async fn questions(&self, page: u32) -> Result<QuestionPage, CatalogError> {
        debug!(page, "GET /questions");
        let response = self
            .client
            .get(self.url("/questions"))
            .query(&[("page", page)])
            .send()
            .await?;
        Ok(decode::<wire::QuestionsResponse>(response).await?.into())
    }

    async fn questions_by_category(
        &self,
        category: CategoryId,
        page: u32,
    ) -> Result<QuestionPage, CatalogError> {
        debug!(%category, page, "GET /categories/{{id}}/questions");
        let response = self
            .client
            .get(self.url(&format!("/categories/{category}/questions")))
            .query(&[("page", page)])
            .send()
            .await?;
        Ok(decode::<wire::QuestionsResponse>(response).await?.into())
    }

    async fn search_questions(&self, term: &str) -> Result<QuestionPage, CatalogError> {
        debug!(term, "POST /questions/search");
        let response = self
            .client
            .post(self.url("/questions/search"))
            .json(&wire::SearchRequest { search_term: term })
            .send()
            .await?;
        Ok(decode::<wire::QuestionsResponse>(response).await?.into())
    }

    async fn create_question(
        &self,
        question: &ValidatedQuestion,
    ) -> Result<QuestionId, CatalogError> {
        debug!("POST /questions");
        let response = self
            .client
            .post(self.url("/questions"))
            .json(&wire::CreateQuestionRequest {
                question: &question.question,
                answer: &question.answer,
                category: question.category.value(),
                difficulty: question.difficulty,
            })
            .send()
            .await?;
        let created = decode::<wire::CreatedResponse>(response).await?;
        Ok(QuestionId::new(created.created))
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), CatalogError> {
        debug!(%id, "DELETE /questions/{{id}}");
        let response = self
            .client
            .delete(self.url(&format!("/questions/{id}")))
            .send()
            .await?;
        let deleted = decode::<wire::DeletedResponse>(response).await?;
        if deleted.deleted != id.value() {
            return Err(CatalogError::Decode(format!(
                "server confirmed deletion of {} instead of {id}",
                deleted.deleted
            )));
        }
        Ok(())
    }

    async fn next_quiz_question(
        &self,
        category: Option<CategoryId>,
        previous: &[QuestionId],
    ) -> Result<Option<Question>, CatalogError> {
        debug!(
            category = category.map(|c| c.value()).unwrap_or(0),
            excluded = previous.len(),
            "POST /quizzes"
        );
        let response = self
            .client
            .post(self.url("/quizzes"))
            .json(&wire::QuizRequest {
                quiz_category: wire::QuizCategory {
                    id: category.map_or(0, |c| c.value()),
                },
                previous_questions: previous.iter().map(|id| id.value()).collect(),
            })
            .send()
            .await?;
        let quiz = decode::<wire::QuizResponse>(response).await?;
        Ok(quiz.question)
    }
}
