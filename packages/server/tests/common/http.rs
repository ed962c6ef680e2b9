//! In-process HTTP client for integration testing.
//!
//! Sends requests straight into the axum router with `tower::ServiceExt::oneshot`,
//! so every middleware layer (auth, rate limiting, CORS, tracing) runs.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use server_core::domains::auth::JwtService;
use server_core::domains::users::User;
use tower::ServiceExt;

pub struct HttpClient {
    router: Router,
    jwt_service: Arc<JwtService>,
}

/// Status plus parsed JSON body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn message(&self) -> Option<&str> {
        self.body["message"].as_str()
    }
}

impl HttpClient {
    pub fn new(router: Router, jwt_service: Arc<JwtService>) -> Self {
        Self {
            router,
            jwt_service,
        }
    }

    /// Bearer token for `user`.
    pub fn token_for(&self, user: &User) -> String {
        self.jwt_service
            .create_token(user.id, user.email.clone(), user.role)
            .expect("Failed to create token")
    }

    pub async fn get(&self, path: &str, as_user: Option<&User>) -> TestResponse {
        self.send(Method::GET, path, None, as_user).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>, as_user: Option<&User>) -> TestResponse {
        self.send(Method::POST, path, body, as_user).await
    }

    pub async fn put(&self, path: &str, body: Value, as_user: Option<&User>) -> TestResponse {
        self.send(Method::PUT, path, Some(body), as_user).await
    }

    pub async fn delete(&self, path: &str, as_user: Option<&User>) -> TestResponse {
        self.send(Method::DELETE, path, None, as_user).await
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        as_user: Option<&User>,
    ) -> TestResponse {
        // The rate limiter keys on client IP
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header("x-forwarded-for", "203.0.113.7");

        if let Some(user) = as_user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token_for(user)));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }
}
