//! Integration tests for the HTTP API.
//!
//! These exercise the full router over the in-memory store and mock
//! model, so the whole upload/extract/list path runs without Postgres or
//! a real LLM endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use insights::testing::{sample_insight, MockModel, MockResponse};
use insights::{
    DocumentStatus, DocumentStore, InsightCategory, MemoryStore, NewDocument, SourceType,
};
use server_core::kernel::ServerDeps;
use server_core::server::build_app;

const BOUNDARY: &str = "test-boundary-7d81";

fn test_app(model: MockModel) -> (Router, Arc<MemoryStore>, Uuid) {
    let store = Arc::new(MemoryStore::new());
    let owner = Uuid::new_v4();
    let deps = Arc::new(ServerDeps::new(
        store.clone(),
        store.clone(),
        Arc::new(model),
        owner,
    ));
    (build_app(deps, None), store, owner)
}

fn multipart_upload(file_name: &str, content_type: &str, bytes: &[u8], source_type: &str) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        "Content-Disposition: form-data; name=\"source_type\"\r\n\r\n".as_bytes(),
    );
    body.extend_from_slice(source_type.as_bytes());
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/documents")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Wait for the background extraction task to finish.
async fn wait_for_terminal_status(
    store: &MemoryStore,
    owner: Uuid,
    document_id: Uuid,
) -> DocumentStatus {
    for _ in 0..100 {
        let document = store
            .get_document(owner, document_id)
            .await
            .unwrap()
            .unwrap();
        if document.status != DocumentStatus::Processing {
            return document.status;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    DocumentStatus::Processing
}

#[tokio::test]
async fn test_upload_extract_list_dashboard_flow() {
    let (app, store, owner) = test_app(MockModel::new());

    let response = app
        .clone()
        .oneshot(multipart_upload(
            "notes.txt",
            "text/plain",
            b"Users want dark mode",
            "customer_feedback",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let document = body_json(response).await;
    assert_eq!(document["status"], "processing");
    assert_eq!(document["content"], "Users want dark mode");
    let document_id: Uuid = document["id"].as_str().unwrap().parse().unwrap();

    // Background extraction (default mock: one feedback insight)
    let status = wait_for_terminal_status(&store, owner, document_id).await;
    assert_eq!(status, DocumentStatus::Processed);

    let response = app.clone().oneshot(get("/api/documents")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let documents = body_json(response).await;
    assert_eq!(documents.as_array().unwrap().len(), 1);
    assert_eq!(documents[0]["status"], "processed");

    let response = app.clone().oneshot(get("/api/insights")).await.unwrap();
    let insights = body_json(response).await;
    assert_eq!(insights.as_array().unwrap().len(), 1);
    assert_eq!(insights[0]["sources"][0], "notes.txt");
    assert_eq!(insights[0]["category"], "feedback");
    let confidence = insights[0]["confidence"].as_i64().unwrap();
    assert!((60..=99).contains(&confidence));

    let response = app.clone().oneshot(get("/api/dashboard")).await.unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats["total_documents"], 1);
    assert_eq!(stats["total_insights"], 1);
    assert_eq!(stats["insights_by_category"]["feedback"], 1);
    assert_eq!(stats["insights_by_category"]["market"], 0);
}

#[tokio::test]
async fn test_upload_rejects_unknown_source_type() {
    let (app, _store, _owner) = test_app(MockModel::new());

    let response = app
        .oneshot(multipart_upload(
            "notes.txt",
            "text/plain",
            b"text",
            "spreadsheets",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("unknown source type"));
}

#[tokio::test]
async fn test_upload_requires_file_part() {
    let (app, _store, _owner) = test_app(MockModel::new());

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"source_type\"\r\n\r\ncustomer_feedback\r\n--{BOUNDARY}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/documents")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

async fn seed_document(store: &MemoryStore, owner: Uuid) -> Uuid {
    store
        .insert_document(NewDocument {
            owner_id: owner,
            name: "seeded.txt".to_string(),
            source_type: SourceType::AnalystTranscripts,
            object_path: None,
            content: Some("Analyst call notes".to_string()),
            status: DocumentStatus::Processing,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_generate_returns_insight_count() {
    let model = MockModel::new().with_insights(vec![
        sample_insight(InsightCategory::Suggestion, 75),
        sample_insight(InsightCategory::Feedback, 82),
    ]);
    let (app, store, owner) = test_app(model);
    let document_id = seed_document(&store, owner).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/insights/generate",
            serde_json::json!({ "document_id": document_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["insights_count"], 2);

    let document = store.get_document(owner, document_id).await.unwrap().unwrap();
    assert_eq!(document.status, DocumentStatus::Processed);
}

#[tokio::test]
async fn test_generate_missing_document_id_is_400_json() {
    let (app, _store, _owner) = test_app(MockModel::new());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/insights/generate",
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Standard error envelope, not axum's plain-text rejection
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("document_id"));
}

#[tokio::test]
async fn test_generate_unknown_document_is_404() {
    let (app, _store, _owner) = test_app(MockModel::new());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/insights/generate",
            serde_json::json!({ "document_id": Uuid::new_v4() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_generate_surfaces_rate_limit_as_429() {
    let model = MockModel::new().with_response(MockResponse::RateLimited);
    let (app, store, owner) = test_app(model);
    let document_id = seed_document(&store, owner).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/insights/generate",
            serde_json::json!({ "document_id": document_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = body_json(response).await;
    assert!(body["error"].as_str().is_some());

    // Hardened failure path: the document is flipped to error
    let document = store.get_document(owner, document_id).await.unwrap().unwrap();
    assert_eq!(document.status, DocumentStatus::Error);
}

#[tokio::test]
async fn test_generate_surfaces_quota_exhaustion_as_402() {
    let model = MockModel::new().with_response(MockResponse::QuotaExhausted);
    let (app, store, owner) = test_app(model);
    let document_id = seed_document(&store, owner).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/insights/generate",
            serde_json::json!({ "document_id": document_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
}

#[tokio::test]
async fn test_health_without_database() {
    let (app, _store, _owner) = test_app(MockModel::new());

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "memory");
}
