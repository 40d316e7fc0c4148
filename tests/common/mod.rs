#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value as JsonValue;
use tower::ServiceExt;

use talentflow::chaos::Chaos;
use talentflow::dataset::Dataset;
use talentflow::store::DurableStore;
use talentflow::AppState;

pub async fn test_state() -> AppState {
    test_state_with_chaos(Chaos::disabled()).await
}

pub async fn test_state_with_chaos(chaos: Chaos) -> AppState {
    let store = DurableStore::open_in_memory().await.expect("store");
    AppState::new(Dataset::default(), store, chaos)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let value: JsonValue = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
