//! Configuration schema definitions.
//!
//! This module defines the configuration file structure for the negotiation
//! server. All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::config::flags::{Method, NegotiationOption};
use crate::config::language::LanguageConfig;
use crate::config::validation::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Languages, methods and options.
    pub negotiation: NegotiationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Raw negotiation settings as written in the file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NegotiationConfig {
    /// Supported language codes; the first one is the default.
    pub languages: Vec<String>,

    /// Enabled methods (`path_prefix`, `subdomain`, `header`).
    pub methods: Vec<Method>,

    /// Enabled options.
    pub options: Vec<NegotiationOption>,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            methods: vec![Method::Header],
            options: Vec::new(),
        }
    }
}

impl NegotiationConfig {
    /// Validate the settings and compile them into a [`LanguageConfig`].
    pub fn build(&self) -> Result<LanguageConfig, ConfigError> {
        LanguageConfig::new(
            self.languages.iter().cloned(),
            self.methods.iter().copied().collect(),
            self.options.iter().copied().collect(),
        )
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
