//! Integration tests for the HTTP API
//!
//! One router per test; requests share its state through `clone()`

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use swipedeck::core::{create_router, Entitlements};
use tower::ServiceExt;

fn create_test_router() -> Router {
    create_router(Entitlements::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn new_session(app: &Router, body: Value) -> String {
    let (status, json) = send(app, "POST", "/session/new", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    json["session_id"].as_str().unwrap().to_string()
}

fn three_candidates() -> Value {
    json!([
        {"id": "A", "name": "Aisha", "age": 27, "likes_you": true},
        {"id": "B", "name": "Fatima", "age": 25},
        {"id": "C", "name": "Maryam", "age": 29}
    ])
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();
    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_create_session_with_sample_deck() {
    let app = create_test_router();
    let (status, json) = send(&app, "POST", "/session/new", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["session_id"].is_string());
    assert!(json["websocket_url"].as_str().unwrap().starts_with("/ws/"));
    assert_eq!(json["output"]["tier"], "FREE");
    assert_eq!(json["output"]["cursor"], 0);
}

#[tokio::test]
async fn test_session_not_found() {
    let app = create_test_router();
    let (status, _) = send(&app, "GET", "/session/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/session/nonexistent/rewind", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_tier_rejected() {
    let app = create_test_router();
    let (status, _) = send(&app, "POST", "/session/new", Some(json!({"tier": "gold"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_ids_rejected() {
    let app = create_test_router();
    let deck = json!([{"id": "A", "name": "x", "age": 20}, {"id": "A", "name": "y", "age": 21}]);
    let (status, _) = send(&app, "POST", "/session/new", Some(json!({"candidates": deck}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_swipe_and_rewind_flow() {
    let app = create_test_router();
    let id = new_session(&app, json!({"candidates": three_candidates()})).await;

    let (_, json) = send(&app, "POST", &format!("/session/{}/swipe", id), Some(json!({"direction": "left"}))).await;
    assert_eq!(json["code"], "D001_PASSED");

    let (_, json) = send(&app, "POST", &format!("/session/{}/swipe", id), Some(json!({"direction": "right"}))).await;
    assert_eq!(json["code"], "D001_LIKED");
    assert_eq!(json["output"]["cursor"], 2);

    let (_, json) = send(&app, "POST", &format!("/session/{}/rewind", id), None).await;
    assert_eq!(json["code"], "D002_REWOUND");
    assert_eq!(json["output"]["current"]["id"], "B");
    assert_eq!(json["output"]["rewindable"], 1);
}

#[tokio::test]
async fn test_crush_gating_by_tier() {
    let app = create_test_router();
    let id = new_session(&app, json!({"candidates": three_candidates()})).await;
    let crush = format!("/session/{}/crush", id);

    let (status, json) = send(&app, "POST", &crush, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["code"], "D003_NOT_ENTITLED");
    assert_eq!(json["upsell"], true);
    assert_eq!(json["output"]["cursor"], 0);

    let (_, json) = send(&app, "POST", &format!("/session/{}/tier", id), Some(json!({"tier": "plus"}))).await;
    assert_eq!(json["output"]["crushes_remaining"], 2);

    let (_, json) = send(&app, "POST", &crush, None).await;
    assert_eq!(json["code"], "D003_CRUSH_GRANTED");
    let (_, json) = send(&app, "POST", &crush, None).await;
    assert_eq!(json["code"], "D003_CRUSH_GRANTED");
    let (_, json) = send(&app, "POST", &crush, None).await;
    assert_eq!(json["code"], "D003_BUDGET_EXHAUSTED");
    assert_eq!(json["upsell"], false);
    assert_eq!(json["output"]["cursor"], 2);

    let (_, json) = send(&app, "GET", &format!("/session/{}/matches", id), None).await;
    assert_eq!(json["matches"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["matches"][0]["candidate_id"], "A");
}

#[tokio::test]
async fn test_batch_after_exhaustion() {
    let app = create_test_router();
    let id = new_session(&app, json!({"candidates": [{"id": "A", "name": "Aisha", "age": 27}]})).await;
    let swipe = format!("/session/{}/swipe", id);

    send(&app, "POST", &swipe, Some(json!({"direction": "left"}))).await;
    let (_, json) = send(&app, "POST", &swipe, Some(json!({"direction": "left"}))).await;
    assert_eq!(json["code"], "D001_EXHAUSTED");
    assert!(json["output"]["current"].is_null());

    let batch = json!({"candidates": [{"id": "Z", "name": "Zainab", "age": 26}]});
    let (_, json) = send(&app, "POST", &format!("/session/{}/batch", id), Some(batch)).await;
    assert_eq!(json["code"], "D004_BATCH_LOADED");
    assert_eq!(json["output"]["current"]["id"], "Z");
}

#[tokio::test]
async fn test_boost() {
    let app = create_test_router();
    let id = new_session(&app, json!({"tier": "sapphire"})).await;
    let boost = format!("/session/{}/boost", id);

    let (_, json) = send(&app, "POST", &boost, None).await;
    assert_eq!(json["code"], "D003_BOOST_GRANTED");
    let (_, json) = send(&app, "POST", &boost, None).await;
    assert_eq!(json["code"], "D003_BUDGET_EXHAUSTED");
}

#[tokio::test]
async fn test_action_response_shape() {
    let app = create_test_router();
    let id = new_session(&app, json!({"candidates": three_candidates()})).await;

    let (status, json) = send(&app, "POST", &format!("/session/{}/crush", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["code", "description", "output", "upsell"]);
    assert!(json["description"].is_string());
    assert_eq!(json["output"]["reason"], "D003_NOT_ENTITLED");
}
