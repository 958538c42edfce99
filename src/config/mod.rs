pub mod cli;
pub mod toml_config;

use serde::{Deserialize, Serialize};

pub use cli::CliArgs;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_NAMESPACE: &str = "urn:poweron:customer-inbound";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Complete gateway configuration, usually loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub poweron: PowerOnConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

/// Where and how to reach the PowerOn SOAP endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerOnConfig {
    pub url: String,
    /// Target namespace of the request payload elements.
    pub namespace: String,
    /// Whole-request timeout; the transport default applies when unset.
    pub timeout_seconds: Option<u64>,
}

impl Default for PowerOnConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}
