//! Error type and normalization policy for Taxu API calls.

use thiserror::Error;

/// Errors that can occur when calling the Taxu API.
///
/// Every failure is normalized to one of three causes. The rendered message
/// is the stable surface: `Api` displays the resolved server message alone,
/// so callers matching on text see exactly what the service said, while the
/// status code stays available for programmatic branching.
#[derive(Debug, Error)]
pub enum TaxuError {
    /// Server answered with a non-2xx status.
    #[error("{message}")]
    Api {
        /// HTTP status code of the rejected request.
        status: u16,
        /// Server-provided message, or `API Error: <status>` when the error
        /// body carried none.
        message: String,
    },

    /// The request was sent but no response came back.
    #[error("Network error: Unable to reach Taxu API")]
    Network,

    /// The request failed before or outside of a network exchange.
    #[error("Request error: {0}")]
    Request(String),
}

impl TaxuError {
    /// Build the server-rejection variant, falling back to the literal
    /// `API Error: <status>` text when the error body had no message field.
    pub(crate) fn api(status: u16, message: Option<String>) -> Self {
        Self::Api {
            status,
            message: message.unwrap_or_else(|| format!("API Error: {status}")),
        }
    }

    /// Classify a transport-level failure from `reqwest`.
    ///
    /// Deadline expiry surfaces as a local error rather than an absent
    /// response, so timeouts land in `Request` with the configured deadline
    /// in the text. Connection-level failures (refused, DNS) are the only
    /// ones that map to `Network`.
    pub(crate) fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            return Self::Request(format!("timeout of {timeout_ms}ms exceeded"));
        }
        if err.is_connect() {
            return Self::Network;
        }
        Self::Request(err.to_string())
    }
}
