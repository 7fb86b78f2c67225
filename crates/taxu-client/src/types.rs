//! Data types for Taxu API requests and responses.

use serde::{Deserialize, Serialize};

/// Uniform response wrapper returned by every Taxu endpoint.
///
/// On a 2xx response the envelope is decoded and handed back unchanged;
/// the client never inspects `success` or `message` itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    /// Operation payload. Meaningful only when the transport call succeeded.
    pub data: T,
    /// Server-reported outcome flag, passed through uninterpreted.
    pub success: bool,
    /// Optional server-provided note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Input to the tax calculation endpoint.
///
/// No client-side validation is performed; the server is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationRequest {
    /// Amount to calculate tax on, in major currency units.
    pub amount: f64,
    /// ISO-4217-style currency code (e.g., "USD").
    pub currency: String,
    /// Jurisdiction code (e.g., "US-CA"). The server picks a default when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    /// Tax type (e.g., "sales", "vat"). The server picks a default when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
}

/// Result of a tax calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationResult {
    /// Amount the calculation was requested for.
    pub original_amount: f64,
    /// Tax owed on the original amount.
    pub tax_amount: f64,
    /// Original amount plus tax.
    pub total_amount: f64,
    /// Applied rate as a fraction (e.g., 0.085 for 8.5%).
    pub tax_rate: f64,
    /// Jurisdiction the rate was resolved in.
    pub jurisdiction: String,
    /// Opaque identifier assigned by the server.
    pub calculation_id: String,
}

/// Payload of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pong {
    /// Server-side timestamp of the health check.
    pub timestamp: String,
}
