//! Client configuration.

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Connection configuration for a Taxu client.
///
/// Immutable after construction; owned by exactly one client instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaxuConfig {
    /// Opaque bearer token sent on every request. Never validated
    /// client-side; an invalid or empty key only surfaces as an
    /// authorization failure on the first actual call.
    #[serde(default)]
    pub api_key: String,

    /// Base address all endpoint paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://api.taxu.io/v1".to_string()
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for TaxuConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl TaxuConfig {
    /// Configuration for `api_key` with defaults for everything else.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load configuration from the environment.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. Environment variables with `TAXU_` prefix (highest)
    ///
    /// Recognized variables: `TAXU_API_KEY`, `TAXU_BASE_URL`,
    /// `TAXU_TIMEOUT_MS`. Nothing requires using this entry point; a config
    /// can always be assembled directly.
    ///
    /// # Errors
    /// Returns an error if an environment value cannot be deserialized into
    /// the target field (e.g., a non-numeric timeout).
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("TAXU_"))
            .extract()?;

        Ok(config)
    }
}

impl From<&str> for TaxuConfig {
    fn from(api_key: &str) -> Self {
        Self::new(api_key)
    }
}

impl From<String> for TaxuConfig {
    fn from(api_key: String) -> Self {
        Self::new(api_key)
    }
}
