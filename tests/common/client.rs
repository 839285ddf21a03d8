// In-process client for the router; every request carries a browser origin

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();

        TestResponse::new(response).await
    }
}

/// Status, headers and decoded JSON of a finished request.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    async fn new(response: axum::response::Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let body: Value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body)
                .unwrap_or(Value::String(String::from_utf8_lossy(&body).to_string()))
        };

        Self {
            status,
            body,
            headers,
        }
    }

    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {}. Body: {}",
            expected, self.status, self.body
        );
    }

    pub fn json(&self) -> &Value {
        &self.body
    }

    /// Sorted keys of the merged record under `data`.
    pub fn data_keys(&self) -> Vec<String> {
        let data = self.body["data"]
            .as_object()
            .unwrap_or_else(|| panic!("no data object in {}", self.body));
        let mut keys: Vec<String> = data.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}
