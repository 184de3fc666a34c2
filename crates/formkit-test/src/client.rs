//! In-process HTTP test client.
//!
//! [`TestClient`] sends requests straight into an axum [`Router`] via
//! `tower::ServiceExt::oneshot`, and [`TestResponse`] exposes the status,
//! headers, and body for assertions.
//!
//! ```rust,no_run
//! use axum::routing::get;
//! use axum::Router;
//! use formkit_test::TestClient;
//!
//! async fn example() {
//!     let app = Router::new().route("/health", get(|| async { "ok" }));
//!     let client = TestClient::new(app);
//!
//!     let response = client.get("/health").await;
//!     assert_eq!(response.status_code(), 200);
//!     assert_eq!(response.text(), "ok");
//! }
//! ```

use axum::body::Body;
use axum::Router;
use bytes::Bytes;
use formkit_core::{FormError, FormResult};
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Sends requests to a router without a network listener.
#[derive(Clone)]
pub struct TestClient {
    app: Router,
}

impl TestClient {
    /// Wraps `app`.
    pub const fn new(app: Router) -> Self {
        Self { app }
    }

    /// Sends a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Method::GET, path, &[], Body::empty()).await
    }

    /// Sends a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.send(Method::DELETE, path, &[], Body::empty()).await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        self.send_json(Method::POST, path, body).await
    }

    /// Sends a PUT request with a JSON body.
    pub async fn put_json(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        self.send_json(Method::PUT, path, body).await
    }

    /// Sends a request with a raw body and explicit content type.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        content_type: &str,
        body: impl Into<Bytes>,
    ) -> TestResponse {
        self.send(
            method,
            path,
            &[("content-type", content_type)],
            Body::from(body.into()),
        )
        .await
    }

    /// Sends a bodiless request with extra headers.
    pub async fn request_with_headers(
        &self,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        self.send(method, path, headers, Body::empty()).await
    }

    async fn send_json(&self, method: Method, path: &str, body: &serde_json::Value) -> TestResponse {
        let bytes = serde_json::to_vec(body).expect("JSON value should serialize");
        self.send(
            method,
            path,
            &[("content-type", "application/json")],
            Body::from(bytes),
        )
        .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
        body: Body,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder
            .body(body)
            .expect("request builder should not fail");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router should not error");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .map_or_else(|_| Bytes::new(), http_body_util::Collected::to_bytes);

        TestResponse {
            status,
            headers,
            body: body.to_vec(),
        }
    }
}

/// A captured response.
#[derive(Debug)]
pub struct TestResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The raw body.
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Returns the numeric status code.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns the body as UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Deserializes the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> FormResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| FormError::Serialization(e.to_string()))
    }

    /// Returns a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
