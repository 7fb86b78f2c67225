//! Taxu API client.
//!
//! This module provides a trait-based HTTP client for the remote Taxu
//! tax-calculation service. The trait abstraction enables:
//!
//! - Easy mocking in unit tests
//! - HTTP-level testing with `MockHttpServer` in integration tests
//! - Swapping implementations (e.g., a caching decorator)
//!
//! The three typed operations are convenience wrappers over one generic
//! escape hatch, [`HttpTaxuClient::request`], which allows arbitrary verbs
//! and paths against the configured base address.
//!
//! # Example
//!
//! ```ignore
//! use taxu_client::{HttpTaxuClient, TaxuApi, TaxCalculationRequest};
//!
//! let client = HttpTaxuClient::new("sk-live-...")?;
//! let envelope = client
//!     .calculate_tax(&TaxCalculationRequest {
//!         amount: 100.0,
//!         currency: "USD".to_string(),
//!         jurisdiction: Some("US-CA".to_string()),
//!         tax_type: None,
//!     })
//!     .await?;
//! println!("total: {}", envelope.data.total_amount);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::TaxuConfig;
use crate::error::TaxuError;
use crate::types::{ApiEnvelope, Pong, TaxCalculationRequest, TaxCalculationResult};

/// Fixed client-identifier header attached to every request.
const CLIENT_HEADER: &str = "x-taxu-client";
const CLIENT_IDENT: &str = concat!("taxu-rust/", env!("CARGO_PKG_VERSION"));

/// Trait for Taxu API operations.
///
/// Implementations forward typed operations to the remote service.
/// Use `HttpTaxuClient` for real HTTP calls, or create a mock
/// implementation for testing.
#[async_trait]
pub trait TaxuApi: Send + Sync {
    /// Calculate tax for a single amount.
    async fn calculate_tax(
        &self,
        request: &TaxCalculationRequest,
    ) -> Result<ApiEnvelope<TaxCalculationResult>, TaxuError>;

    /// List the jurisdiction codes the service supports, in server order.
    async fn get_jurisdictions(&self) -> Result<ApiEnvelope<Vec<String>>, TaxuError>;

    /// Connectivity check; no side effects.
    async fn ping(&self) -> Result<ApiEnvelope<Pong>, TaxuError>;
}

/// Options for the generic [`HttpTaxuClient::request`] escape hatch.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP verb; GET when left at the default.
    pub method: Method,
    /// JSON body, meaningful for non-GET verbs.
    pub data: Option<serde_json::Value>,
    /// Query parameters appended to the endpoint.
    pub params: Vec<(String, String)>,
}

/// Shape of the `message` field in error bodies; everything else is ignored.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP-based implementation of [`TaxuApi`].
///
/// Owns one `reqwest::Client` (and its connection pool) for the lifetime of
/// the instance. The bearer, content-type and client-identifier headers are
/// fixed at construction and attached to every request.
#[derive(Debug)]
pub struct HttpTaxuClient {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpTaxuClient {
    /// Create a client from a bare credential, with the default base
    /// address and timeout.
    ///
    /// # Errors
    /// Fails only if the underlying transport cannot be constructed; the
    /// credential format is not validated.
    pub fn new(api_key: impl Into<String>) -> Result<Self, TaxuError> {
        Self::with_config(TaxuConfig::new(api_key))
    }

    /// Create a client from a full configuration.
    ///
    /// The underlying HTTP client is built once, with default headers that
    /// cannot be overridden per call and the configured per-request
    /// deadline.
    ///
    /// # Errors
    /// Fails only if the authorization header or the transport cannot be
    /// constructed. An empty credential is accepted; it surfaces as an
    /// authorization failure on the first actual call.
    pub fn with_config(config: TaxuConfig) -> Result<Self, TaxuError> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| TaxuError::Request(e.to_string()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CLIENT_HEADER, HeaderValue::from_static(CLIENT_IDENT));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| TaxuError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// Issue a request against an arbitrary endpoint.
    ///
    /// `endpoint` is resolved relative to the configured base address. The
    /// JSON body and query string are sent independently of each other. The
    /// response body is deserialized into the caller-chosen `T` with no
    /// envelope validation beyond what `T` itself demands; pass
    /// [`ApiEnvelope`] as `T` to get the standard wrapper.
    ///
    /// # Errors
    /// Normalized per the crate error policy: a non-2xx response becomes
    /// [`TaxuError::Api`], an unreachable server [`TaxuError::Network`], and
    /// every local failure (including deadline expiry and body decoding)
    /// [`TaxuError::Request`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, TaxuError> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(method = %options.method, url = %url, "dispatching taxu request");

        let mut request = self.client.request(options.method, &url);
        if !options.params.is_empty() {
            request = request.query(&options.params);
        }
        if let Some(data) = &options.data {
            request = request.json(data);
        }

        self.execute(request).await
    }

    /// Send a prepared request and normalize the outcome.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, TaxuError> {
        let response = request
            .send()
            .await
            .map_err(|e| TaxuError::from_transport(&e, self.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "taxu api rejected request");
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            return Err(TaxuError::api(status.as_u16(), message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TaxuError::from_transport(&e, self.timeout_ms))
    }

    /// Join an endpoint path to the base address with exactly one `/`.
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl TaxuApi for HttpTaxuClient {
    async fn calculate_tax(
        &self,
        request: &TaxCalculationRequest,
    ) -> Result<ApiEnvelope<TaxCalculationResult>, TaxuError> {
        let url = self.endpoint_url("/tax/calculate");
        tracing::debug!(url = %url, "dispatching tax calculation");
        self.execute(self.client.post(&url).json(request)).await
    }

    async fn get_jurisdictions(&self) -> Result<ApiEnvelope<Vec<String>>, TaxuError> {
        let url = self.endpoint_url("/jurisdictions");
        self.execute(self.client.get(&url)).await
    }

    async fn ping(&self) -> Result<ApiEnvelope<Pong>, TaxuError> {
        let url = self.endpoint_url("/ping");
        self.execute(self.client.get(&url)).await
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{
        ApiEnvelope, Pong, TaxCalculationRequest, TaxCalculationResult, TaxuApi, TaxuError,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    type CalculateTaxResult = Result<ApiEnvelope<TaxCalculationResult>, TaxuError>;
    type JurisdictionsResult = Result<ApiEnvelope<Vec<String>>, TaxuError>;
    type PingResult = Result<ApiEnvelope<Pong>, TaxuError>;

    /// Mock implementation of `TaxuApi` for unit tests.
    ///
    /// Configure responses with `set_*_result` methods and verify calls
    /// with `calculate_tax_calls()` and the per-operation call counters.
    pub struct MockTaxuClient {
        calculate_tax_result: Mutex<Option<CalculateTaxResult>>,
        jurisdictions_result: Mutex<Option<JurisdictionsResult>>,
        ping_result: Mutex<Option<PingResult>>,
        calculate_tax_calls: Mutex<Vec<TaxCalculationRequest>>,
        jurisdictions_calls: Mutex<u32>,
        ping_calls: Mutex<u32>,
    }

    impl MockTaxuClient {
        pub fn new() -> Self {
            Self {
                calculate_tax_result: Mutex::new(None),
                jurisdictions_result: Mutex::new(None),
                ping_result: Mutex::new(None),
                calculate_tax_calls: Mutex::new(Vec::new()),
                jurisdictions_calls: Mutex::new(0),
                ping_calls: Mutex::new(0),
            }
        }

        /// Set the result for the next `calculate_tax` call.
        pub fn set_calculate_tax_result(&self, result: CalculateTaxResult) {
            *self.calculate_tax_result.lock().unwrap() = Some(result);
        }

        /// Set the result for the next `get_jurisdictions` call.
        pub fn set_jurisdictions_result(&self, result: JurisdictionsResult) {
            *self.jurisdictions_result.lock().unwrap() = Some(result);
        }

        /// Set the result for the next `ping` call.
        pub fn set_ping_result(&self, result: PingResult) {
            *self.ping_result.lock().unwrap() = Some(result);
        }

        /// Get all requests passed to `calculate_tax`.
        pub fn calculate_tax_calls(&self) -> Vec<TaxCalculationRequest> {
            self.calculate_tax_calls.lock().unwrap().clone()
        }

        /// Number of `get_jurisdictions` calls made.
        pub fn jurisdictions_calls(&self) -> u32 {
            *self.jurisdictions_calls.lock().unwrap()
        }

        /// Number of `ping` calls made.
        pub fn ping_calls(&self) -> u32 {
            *self.ping_calls.lock().unwrap()
        }
    }

    impl Default for MockTaxuClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl TaxuApi for MockTaxuClient {
        async fn calculate_tax(
            &self,
            request: &TaxCalculationRequest,
        ) -> CalculateTaxResult {
            self.calculate_tax_calls.lock().unwrap().push(request.clone());

            self.calculate_tax_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(TaxuError::Network))
        }

        async fn get_jurisdictions(&self) -> JurisdictionsResult {
            *self.jurisdictions_calls.lock().unwrap() += 1;

            self.jurisdictions_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(TaxuError::Network))
        }

        async fn ping(&self) -> PingResult {
            *self.ping_calls.lock().unwrap() += 1;

            self.ping_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(TaxuError::Network))
        }
    }
}
