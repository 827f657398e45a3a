/// HTTP testing utilities
use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tabinsight::analysis::AnalysisOptions;
use tabinsight::http::server::build_router;
use tabinsight::http::state::HttpServerState;
use tower::ServiceExt; // for `oneshot`

/// HTTP test client for making requests to our app
pub struct TestApp {
    app: axum::Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_options(AnalysisOptions::default(), 1024 * 1024)
    }

    pub fn with_options(options: AnalysisOptions, body_limit: usize) -> Self {
        let state = HttpServerState {
            name: Arc::new("TabInsight Test".to_string()),
            options: Arc::new(options),
            default_input_format: Arc::new("csv".to_string()),
        };
        Self {
            app: build_router(state, body_limit, 30),
        }
    }

    /// Send a POST request with CSV data
    pub async fn post_csv(&self, path: &str, csv_data: &str) -> Result<TestResponse> {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "text/csv")
            .body(Body::from(csv_data.to_string()))?;

        let response = self.app.clone().oneshot(request).await?;
        Ok(TestResponse::new(response).await)
    }

    /// Send a GET request
    pub async fn get(&self, path: &str) -> Result<TestResponse> {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())?;

        let response = self.app.clone().oneshot(request).await?;
        Ok(TestResponse::new(response).await)
    }
}

/// Test response wrapper for easier assertions
pub struct TestResponse {
    status: StatusCode,
    body: String,
}

impl TestResponse {
    async fn new(response: axum::response::Response) -> Self {
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default()
            .to_vec();
        let body = String::from_utf8_lossy(&body_bytes).to_string();

        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse response body as JSON
    pub fn json<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status, expected,
            "Unexpected status, body: {}",
            self.body
        );
    }
}
