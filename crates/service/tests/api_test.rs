use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use kpdf::{DocumentComposer, DocumentPipeline};
use kpdf_service::{build_router, state::AppState};
use kpdf_storage::memory::{InMemoryObjectStore, InMemoryRecordStore};
use kpdf_storage::{ArtifactStore, FixedClock};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    objects: Arc<InMemoryObjectStore>,
    records: Arc<InMemoryRecordStore>,
}

fn create_test_app(objects: InMemoryObjectStore, records: InMemoryRecordStore) -> TestApp {
    let objects = Arc::new(objects);
    let records = Arc::new(records);
    let artifacts =
        ArtifactStore::new(objects.clone(), "documents", "kp").with_clock(Arc::new(FixedClock(77)));
    let pipeline = DocumentPipeline::new(DocumentComposer::new(), artifacts, records.clone());
    TestApp {
        router: build_router(AppState::new(pipeline)),
        objects,
        records,
    }
}

fn default_app() -> TestApp {
    create_test_app(InMemoryObjectStore::default(), InMemoryRecordStore::default())
}

fn create_test_request() -> Value {
    json!({
        "id_user": 1,
        "id_cart": 2,
        "id_publication": 3,
        "count": 5,
        "logo": { "logo_text": { "value": "Acme", "bold": true } },
        "style_template": { "id_template": "classic", "color": "#112233" }
    })
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_pdf_gen_returns_storage_location() {
    let app = default_app();

    let (status, body) = send(
        app.router,
        post_json("/api/v1/pdfGen", create_test_request().to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bucket"], "documents");
    assert_eq!(body["key"], "kp/2_77.pdf");
    let puts = app.objects.puts();
    assert_eq!(puts.len(), 1);
    assert!(puts[0].bytes.starts_with(b"%PDF"));
    assert_eq!(body["size"], puts[0].bytes.len());
    assert!(app.records.rows().is_empty());
}

#[tokio::test]
async fn test_save_returns_record_id() {
    let app = default_app();

    let (status, body) = send(
        app.router,
        post_json("/api/v1/pdf", create_test_request().to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "saved", "id": 1 }));
    let rows = app.records.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].record.cart_id, 2);
    assert!(rows[0].save_required);
}

#[tokio::test]
async fn test_malformed_json_is_invalid_request() {
    for uri in ["/api/v1/pdfGen", "/api/v1/pdf"] {
        let app = default_app();
        let (status, body) = send(app.router, post_json(uri, "{\"id_cart\": ".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "InvalidRequest");
        assert!(body["message"].as_str().is_some());
        assert_eq!(app.objects.attempts(), 0);
        assert!(app.records.rows().is_empty());
    }
}

#[tokio::test]
async fn test_wrong_field_type_is_invalid_request() {
    let app = default_app();
    let body = json!({ "id_cart": "two" }).to_string();

    let (status, body) = send(app.router, post_json("/api/v1/pdf", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidRequest");
}

#[tokio::test]
async fn test_upload_failure_is_generic_internal_error() {
    let app = create_test_app(
        InMemoryObjectStore::failing("secret backend detail"),
        InMemoryRecordStore::default(),
    );

    let (status, body) = send(
        app.router,
        post_json("/api/v1/pdfGen", create_test_request().to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "InternalError");
    assert!(!body["message"].as_str().unwrap().contains("secret"));
}

#[tokio::test]
async fn test_record_failure_is_internal_error() {
    let app = create_test_app(InMemoryObjectStore::default(), InMemoryRecordStore::failing());

    let (status, body) = send(
        app.router,
        post_json("/api/v1/pdf", create_test_request().to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "InternalError");
}

#[tokio::test]
async fn test_health_reflects_database() {
    let (status, body) = send(
        default_app().router,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let failing = create_test_app(InMemoryObjectStore::default(), InMemoryRecordStore::failing());
    let (status, body) = send(
        failing.router,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Unavailable");
}
