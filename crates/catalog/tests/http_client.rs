//! HTTP client tests against an in-process mock server.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use catalog::{CatalogApi, CatalogError, HttpCatalogClient};
use trivia_core::model::{CategoryId, QuestionId, ValidatedQuestion};

async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

fn capture_channel() -> (Arc<Mutex<Option<oneshot::Sender<Value>>>>, oneshot::Receiver<Value>) {
    let (tx, rx) = oneshot::channel();
    (Arc::new(Mutex::new(Some(tx))), rx)
}

fn capture(slot: &Arc<Mutex<Option<oneshot::Sender<Value>>>>, body: Value) {
    if let Some(tx) = slot.lock().expect("capture slot").take() {
        let _ = tx.send(body);
    }
}

#[tokio::test]
async fn categories_parses_string_object_keys() {
    let router = Router::new().route(
        "/categories",
        get(|| async {
            Json(json!({
                "success": true,
                "categories": {"1": "Science", "2": "Art"}
            }))
        }),
    );
    let client = HttpCatalogClient::new(spawn_server(router).await);

    let map = client.categories().await.expect("categories");
    assert_eq!(map.len(), 2);
    assert_eq!(map.name(CategoryId::new(1)), Some("Science"));
    assert_eq!(map.name(CategoryId::new(2)), Some("Art"));
}

#[derive(Deserialize)]
struct PageQuery {
    page: u32,
}

#[tokio::test]
async fn questions_sends_the_page_query_parameter() {
    let router = Router::new().route(
        "/questions",
        get(|Query(query): Query<PageQuery>| async move {
            Json(json!({
                "success": true,
                "questions": [{
                    "id": query.page,
                    "question": "Q",
                    "answer": "A",
                    "category": 1,
                    "difficulty": 1
                }],
                "total_questions": 11
            }))
        }),
    );
    let client = HttpCatalogClient::new(spawn_server(router).await);

    let page = client.questions(2).await.expect("page");
    assert_eq!(page.total, 11);
    assert_eq!(page.questions.len(), 1);
    assert_eq!(page.questions[0].id, QuestionId::new(2));
}

#[tokio::test]
async fn non_2xx_surfaces_the_server_message() {
    let router = Router::new().route(
        "/questions",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"success": false, "error": 404, "message": "resource not found"})),
            )
        }),
    );
    let client = HttpCatalogClient::new(spawn_server(router).await);

    let err = client.questions(99).await.unwrap_err();
    match err {
        CatalogError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "resource not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn bodyless_error_falls_back_to_the_status_reason() {
    let router = Router::new().route(
        "/questions",
        get(|| async { StatusCode::UNPROCESSABLE_ENTITY }),
    );
    let client = HttpCatalogClient::new(spawn_server(router).await);

    let err = client.questions(1).await.unwrap_err();
    match err {
        CatalogError::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Unprocessable Entity");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn search_posts_the_server_field_name() {
    let (slot, rx) = capture_channel();
    let router = Router::new().route(
        "/questions/search",
        post(move |Json(body): Json<Value>| async move {
            capture(&slot, body);
            Json(json!({"success": true, "questions": [], "total_questions": 0}))
        }),
    );
    let client = HttpCatalogClient::new(spawn_server(router).await);

    let page = client.search_questions("capital").await.expect("search");
    assert!(page.questions.is_empty());
    assert_eq!(page.total, 0);

    let sent = rx.await.expect("captured body");
    assert_eq!(sent, json!({"searchTerm": "capital"}));
}

#[tokio::test]
async fn create_returns_the_assigned_id_and_delete_confirms_it() {
    let (slot, rx) = capture_channel();
    let router = Router::new()
        .route(
            "/questions",
            post(move |Json(body): Json<Value>| async move {
                capture(&slot, body);
                (
                    StatusCode::CREATED,
                    Json(json!({"success": true, "created": 42})),
                )
            }),
        )
        .route(
            "/questions/:id",
            delete(|Path(id): Path<u64>| async move {
                Json(json!({"success": true, "deleted": id}))
            }),
        );
    let client = HttpCatalogClient::new(spawn_server(router).await);

    let draft = ValidatedQuestion {
        question: "Why is the sky blue?".into(),
        answer: "Rayleigh scattering".into(),
        category: CategoryId::new(1),
        difficulty: 3,
    };
    let id = client.create_question(&draft).await.expect("create");
    assert_eq!(id, QuestionId::new(42));

    let sent = rx.await.expect("captured body");
    assert_eq!(
        sent,
        json!({
            "question": "Why is the sky blue?",
            "answer": "Rayleigh scattering",
            "category": 1,
            "difficulty": 3
        })
    );

    client.delete_question(id).await.expect("delete");
}

#[tokio::test]
async fn quiz_request_encodes_no_category_as_id_zero() {
    let (slot, rx) = capture_channel();
    let router = Router::new().route(
        "/quizzes",
        post(move |Json(body): Json<Value>| async move {
            capture(&slot, body);
            Json(json!({"success": true, "question": null}))
        }),
    );
    let client = HttpCatalogClient::new(spawn_server(router).await);

    let next = client
        .next_quiz_question(None, &[QuestionId::new(5), QuestionId::new(7)])
        .await
        .expect("quiz");
    assert!(next.is_none());

    let sent = rx.await.expect("captured body");
    assert_eq!(
        sent,
        json!({"quiz_category": {"id": 0}, "previous_questions": [5, 7]})
    );
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Port 1 is never serving; the connection is refused immediately.
    let client = HttpCatalogClient::new("http://127.0.0.1:1");
    let err = client.questions(1).await.unwrap_err();
    assert!(matches!(err, CatalogError::Transport(_)));
}
