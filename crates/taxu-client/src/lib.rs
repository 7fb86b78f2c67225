//! Client library for the Taxu tax calculation API.
//!
//! # Overview
//!
//! Holds connection configuration (base address, credential, timeout),
//! exposes typed methods for the three known endpoints plus one generic
//! escape hatch, and normalizes every failure into a single [`TaxuError`]
//! with a stable, human-readable message. There is no retry, caching or
//! rate-limiting layer; one call maps to one HTTP round-trip.
//!
//! # Architecture
//!
//! - [`TaxuApi`] - Trait defining the typed API operations
//! - [`HttpTaxuClient`] - Real HTTP implementation using reqwest
//! - [`mock::MockTaxuClient`] - Mock for unit tests (behind the `test-utils` feature)
//!
//! # Example
//!
//! ```ignore
//! use taxu_client::{HttpTaxuClient, TaxuApi, TaxuConfig};
//!
//! let client = HttpTaxuClient::with_config(TaxuConfig::from_env()?)?;
//! let jurisdictions = client.get_jurisdictions().await?;
//! println!("supported: {:?}", jurisdictions.data);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{HttpTaxuClient, RequestOptions, TaxuApi};
pub use config::{ConfigError, TaxuConfig};
pub use error::TaxuError;
pub use types::{ApiEnvelope, Pong, TaxCalculationRequest, TaxCalculationResult};

/// HTTP verb type accepted by [`RequestOptions`], re-exported so callers of
/// the generic escape hatch don't need a direct `reqwest` dependency.
pub use reqwest::Method;

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;
