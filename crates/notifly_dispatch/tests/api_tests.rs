use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use notifly_common::memory::InMemoryRegistrationStore;
use notifly_common::services::{RegistrationRecord, RegistrationStore};
use notifly_config::DispatchConfig;
use notifly_dispatch::{routes, ExpoPushClient};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Full wiring under test: real router, in-memory store, real relay
/// client pointed at a mock gateway.
async fn app(store: Arc<InMemoryRegistrationStore>, gateway: &MockServer) -> Router {
    let relay = ExpoPushClient::new(
        Client::new(),
        format!("{}/push/send", gateway.uri()),
        Some("test-token".to_string()),
    );
    routes(&DispatchConfig::default(), store, Arc::new(relay))
}

async fn seeded_store() -> Arc<InMemoryRegistrationStore> {
    let store = Arc::new(InMemoryRegistrationStore::new());
    store
        .upsert_registration(RegistrationRecord {
            device_id: "abc-123".to_string(),
            push_handle: "ExponentPushToken[xyz]".to_string(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    store
}

fn send_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/send-notification")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn registered_device_gets_relay_body_under_data() {
    let gateway = MockServer::start().await;
    let relay_body = json!({ "data": { "status": "ok", "id": "receipt-1" } });
    Mock::given(method("POST"))
        .and(path("/push/send"))
        .and(body_json(json!({
            "to": "ExponentPushToken[xyz]",
            "title": "Test Notification",
            "body": "You got a notification!",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(relay_body.clone()))
        .expect(1)
        .mount(&gateway)
        .await;

    let app = app(seeded_store().await, &gateway).await;
    let response = app
        .oneshot(send_request(json!({ "deviceId": "abc-123" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], relay_body);
}

#[tokio::test]
async fn unknown_device_is_404_and_gateway_is_never_called() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&gateway)
        .await;

    let app = app(Arc::new(InMemoryRegistrationStore::new()), &gateway).await;
    let response = app
        .oneshot(send_request(json!({ "deviceId": "unknown-999" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await, json!({ "error": "User not found" }));
}

#[tokio::test]
async fn empty_device_id_is_400() {
    let gateway = MockServer::start().await;
    let app = app(Arc::new(InMemoryRegistrationStore::new()), &gateway).await;

    let response = app
        .oneshot(send_request(json!({ "deviceId": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("deviceId"));
}

#[tokio::test]
async fn missing_device_id_field_is_400() {
    let gateway = MockServer::start().await;
    let app = app(Arc::new(InMemoryRegistrationStore::new()), &gateway).await;

    let response = app.oneshot(send_request(json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn gateway_rejection_is_500_with_relay_message() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/push/send"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid push token"))
        .mount(&gateway)
        .await;

    let app = app(seeded_store().await, &gateway).await;
    let response = app
        .oneshot(send_request(json!({ "deviceId": "abc-123" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("invalid push token"));
}
