//! Configuration for the classifier facade and its generative backend

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use toxiscan_core::{Error, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToxiscanConfig {
    /// Generative backend used for hybrid resolution
    #[serde(default)]
    pub secondary: SecondaryConfig,
}

/// Generative backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryConfig {
    /// Route classification through hybrid resolution
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// Optional bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-call timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

impl SecondaryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8000/v1".to_string()
}

fn default_model() -> String {
    "toxicity-tl".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_tokens() -> u32 {
    20
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

impl ToxiscanConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let secondary = &self.secondary;

        if secondary.timeout_ms == 0 {
            return Err(Error::config("secondary.timeout_ms must be positive"));
        }
        if !(0.0..=2.0).contains(&secondary.temperature) {
            return Err(Error::config(format!(
                "secondary.temperature must be within [0, 2], got {}",
                secondary.temperature
            )));
        }
        if !(secondary.top_p > 0.0 && secondary.top_p <= 1.0) {
            return Err(Error::config(format!(
                "secondary.top_p must be within (0, 1], got {}",
                secondary.top_p
            )));
        }
        if secondary.enabled && secondary.endpoint.trim().is_empty() {
            return Err(Error::config("secondary.endpoint is required when enabled"));
        }

        Ok(())
    }
}

/// Load and validate configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<ToxiscanConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let config: ToxiscanConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    tracing::debug!(
        path = %path.display(),
        hybrid = config.secondary.enabled,
        "loaded configuration"
    );

    Ok(config)
}
