//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! This module provides a thin wrapper around `wiremock` for declarative
//! HTTP stubbing. Use it to mock Taxu API responses in integration tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_api_call() {
//!     let server = MockHttpServer::start().await;
//!
//!     server
//!         .expect_get("/jurisdictions")
//!         .respond_with_json(json!({"data": [], "success": true}))
//!         .mount()
//!         .await;
//!
//!     // Point the client at server.url() and assert on the result
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)`
//! - **Error response**: `.respond_with_status(500).with_json_response(value)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(5))`
//! - **Request verification**: `.expect_times(2)` plus `server.verify()`
//!
//! For matchers this wrapper doesn't cover (query params, body JSON), mount
//! a `wiremock::Mock` directly against `server.inner()`.

use std::time::Duration;

use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Declarative wrapper around a `wiremock::MockServer`.
pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    /// Start a mock server on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the running server.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Access the underlying wiremock server for custom matchers.
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Assert that all mounted call-count expectations were met.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// Begin stubbing a GET request for `request_path`.
    pub fn expect_get(&self, request_path: &str) -> MockRequestBuilder<'_> {
        self.expect("GET", request_path)
    }

    /// Begin stubbing a POST request for `request_path`.
    pub fn expect_post(&self, request_path: &str) -> MockRequestBuilder<'_> {
        self.expect("POST", request_path)
    }

    fn expect(&self, http_method: &'static str, request_path: &str) -> MockRequestBuilder<'_> {
        MockRequestBuilder {
            server: &self.server,
            method: http_method,
            path: request_path.to_string(),
            headers: Vec::new(),
            status: 200,
            body: None,
            delay: None,
            expected_calls: None,
        }
    }
}

/// Builder for a single stubbed request/response pair.
pub struct MockRequestBuilder<'a> {
    server: &'a MockServer,
    method: &'static str,
    path: String,
    headers: Vec<(String, String)>,
    status: u16,
    body: Option<Value>,
    delay: Option<Duration>,
    expected_calls: Option<u64>,
}

impl MockRequestBuilder<'_> {
    /// Require `name: value` on the incoming request.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Respond 200 with a JSON body.
    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.status = 200;
        self.body = Some(body);
        self
    }

    /// Respond with a bare status code and no body.
    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Attach a JSON body to the already-chosen status.
    pub fn with_json_response(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Delay the response; combine with a short client timeout to simulate
    /// deadline expiry.
    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Expect the stub to be hit exactly `times` times (checked by
    /// `MockHttpServer::verify`).
    pub fn expect_times(mut self, times: u64) -> Self {
        self.expected_calls = Some(times);
        self
    }

    /// Register the stub with the server.
    pub async fn mount(self) {
        let mut template = ResponseTemplate::new(self.status);
        if let Some(body) = self.body {
            template = template.set_body_json(body);
        }
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut mock = Mock::given(method(self.method)).and(path(self.path));
        for (name, value) in self.headers {
            mock = mock.and(header(name.as_str(), value.as_str()));
        }

        let mut mounted = mock.respond_with(template);
        if let Some(times) = self.expected_calls {
            mounted = mounted.expect(times);
        }
        mounted.mount(self.server).await;
    }
}
