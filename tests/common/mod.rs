#![allow(dead_code)]

use axum::{body::Body, Router};
use http::{header, HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bmi_service::routes::create_router;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON, panicking with the raw body on failure.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Response is not valid JSON\nStatus: {}\nError: {e}\nBody: {}",
                self.status,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub fn app() -> Router {
    create_router()
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body: body.to_vec(),
    }
}

/// Send a GET request to `uri` (path plus query string).
pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a POST request with a raw body and a JSON content type.
pub async fn post_raw(app: &Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> TestResponse {
    post_raw(app, uri, &body.to_string()).await
}

/// Assert a 400 error envelope with the given machine-readable code.
pub fn assert_rejected(response: &TestResponse, code: &str, title: &str) {
    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", response.text());
    let body = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], code);
    assert_eq!(body["error"]["title"], title);
    assert!(body["error"]["detail"].as_str().is_some_and(|d| !d.is_empty()));
    assert_eq!(response.header(header::CACHE_CONTROL), Some("no-store"));
}
