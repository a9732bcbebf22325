//! HTTP API tests driven through the router without binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use symptom_solver::web::server::{build_router, AppState, MAX_REQUEST_BODY_SIZE};
use symptom_solver::DiseaseCatalog;

fn app() -> Router {
    let catalog = DiseaseCatalog::load_embedded().expect("embedded catalog should load");
    build_router(Arc::new(AppState::new(catalog)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn predict_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn raw_predict_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_predict_returns_top_three() {
    let (status, body) = send(app(), predict_request(&json!({ "symptom_ids": [1, 2] }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_diseases_checked"], 5);

    let predictions = body["predictions"].as_array().unwrap();
    let names: Vec<&str> = predictions
        .iter()
        .map(|p| p["disease_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Influenza", "COVID-19", "Common cold"]);

    let first = &predictions[0];
    assert_eq!(first["rank"], 1);
    assert_eq!(first["score"], 1.02);
    assert_eq!(first["disease_id"], 1);
    assert_eq!(first["matched_symptoms"].as_array().unwrap().len(), 2);
    assert!(first.get("breakdown").is_none());
}

#[tokio::test]
async fn test_predict_empty_input_is_bad_request() {
    let (status, body) = send(app(), predict_request(&json!({ "symptom_ids": [] }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "empty_input");
}

#[tokio::test]
async fn test_predict_unknown_symptoms_lists_ids() {
    let (status, body) = send(
        app(),
        predict_request(&json!({ "symptom_ids": [1, 999, 42, 999] })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "unknown_symptoms");
    assert_eq!(body["unknown_symptom_ids"], json!([42, 999]));
    assert_eq!(body["details"], "42, 999");
}

#[tokio::test]
async fn test_predict_too_many_symptoms() {
    let ids: Vec<u32> = (1..=300).collect();
    let (status, body) = send(app(), predict_request(&json!({ "symptom_ids": ids }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "too_many_symptoms");
}

#[tokio::test]
async fn test_predict_malformed_bodies_use_error_shape() {
    let cases = [
        (r#"{ "symptom_ids": ["fever"] }"#, StatusCode::UNPROCESSABLE_ENTITY),
        (r#"{ "symptom_ids": [-1] }"#, StatusCode::UNPROCESSABLE_ENTITY),
        (r#"{ "ids": [1, 2] }"#, StatusCode::UNPROCESSABLE_ENTITY),
        (r#"{ "symptom_ids": [1, "#, StatusCode::BAD_REQUEST),
    ];

    for (raw, expected) in cases {
        let (status, body) = send(app(), raw_predict_request(raw)).await;
        assert_eq!(status, expected, "body {raw}");
        assert_eq!(body["error_type"], "invalid_request", "body {raw}");
        assert!(body["details"].is_string(), "body {raw}");
    }
}

#[tokio::test]
async fn test_predict_requires_json_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/predict")
        .body(Body::from(r#"{ "symptom_ids": [1] }"#))
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error_type"], "invalid_request");
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let padding = "1,".repeat(MAX_REQUEST_BODY_SIZE);
    let request = Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header("content-type", "application/json")
        .body(Body::from(format!(r#"{{ "symptom_ids": [{padding}1] }}"#)))
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error_type"], "invalid_request");
}

#[tokio::test]
async fn test_security_headers_present() {
    let response = app().oneshot(get("/api/symptoms")).await.unwrap();
    let headers = response.headers();

    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
}

#[tokio::test]
async fn test_list_symptoms_paged() {
    let (status, body) = send(app(), get("/api/symptoms")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 10);

    let (_, page) = send(app(), get("/api/symptoms?skip=2&limit=3")).await;
    let ids: Vec<u64> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 4, 5]);
}

#[tokio::test]
async fn test_get_symptom() {
    let (status, body) = send(app(), get("/api/symptoms/7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sore throat");

    let (status, body) = send(app(), get("/api/symptoms/77")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "not_found");
}

#[tokio::test]
async fn test_list_diseases_by_category() {
    let (status, body) = send(app(), get("/api/diseases?category=Respiratory")).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Influenza", "Common cold"]);
}

#[tokio::test]
async fn test_categories() {
    let (status, body) = send(app(), get("/api/diseases/categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "categories": ["Digestive", "Ear, nose and throat", "Infectious", "Respiratory"] })
    );
}

#[tokio::test]
async fn test_get_disease_and_symptoms() {
    let (status, body) = send(app(), get("/api/diseases/5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Tonsillitis");

    let (status, body) = send(app(), get("/api/diseases/5/symptoms")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["disease_name"], "Tonsillitis");
    let symptoms = body["symptoms"].as_array().unwrap();
    assert_eq!(symptoms.len(), 4);
    assert_eq!(symptoms[0]["symptom_name"], "Sore throat");
    assert_eq!(symptoms[0]["is_primary"], true);

    let (status, _) = send(app(), get("/api/diseases/99/symptoms")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_predictions_agree() {
    let app = app();
    let (_, expected) = send(
        app.clone(),
        predict_request(&json!({ "symptom_ids": [1, 7, 5] })),
    )
    .await;

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..16 {
        let app = app.clone();
        tasks.spawn(async move {
            send(app, predict_request(&json!({ "symptom_ids": [5, 1, 7] }))).await
        });
    }

    while let Some(result) = tasks.join_next().await {
        let (status, body) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }
}
