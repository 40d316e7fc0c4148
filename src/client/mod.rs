//! In-process API access: a raw transport over the simulated backend's
//! router, and a caching client layered on top of it.

mod cached;

pub use cached::CachedClient;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request},
    Router,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

use crate::error::{Error, Result};
use crate::AppState;

/// Drives the simulated backend without a socket: requests are built as
/// plain HTTP messages and dispatched straight into the router, so status
/// codes, bodies, and failure injection behave exactly as they would over
/// the wire.
#[derive(Clone)]
pub struct ApiClient {
    router: Router,
}

impl ApiClient {
    pub fn new(state: AppState) -> Self {
        Self {
            router: crate::routes::router(state),
        }
    }

    pub async fn get(&self, uri: &str) -> Result<JsonValue> {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &JsonValue) -> Result<JsonValue> {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: &JsonValue) -> Result<JsonValue> {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: &JsonValue) -> Result<JsonValue> {
        self.send(Method::PUT, uri, Some(body)).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<&JsonValue>) -> Result<JsonValue> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(value)?)
            }
            None => Body::empty(),
        };
        let request = builder
            .body(body)
            .map_err(|e| Error::Internal(format!("Failed to build request: {}", e)))?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|infallible| match infallible {});

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let value: JsonValue = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        if status.is_success() {
            Ok(value)
        } else {
            let message = value
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("Request failed")
                .to_string();
            Err(Error::from_status(status, message))
        }
    }
}
