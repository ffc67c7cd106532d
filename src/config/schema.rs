use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_DEMO_BIND: &str = "127.0.0.1:5001";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration file.
///
/// Example YAML:
/// ```yaml
/// log_level: debug
/// api:
///   bind: "0.0.0.0:8000"
/// demo:
///   bind: "127.0.0.1:5001"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// One of trace, debug, info, warn, error (default: info)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Strict validating API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ServerConfig>,

    /// Permissive demo service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<ServerConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. "127.0.0.1:8000"
    pub bind: String,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn api_bind(&self) -> &str {
        self.api
            .as_ref()
            .map(|s| s.bind.as_str())
            .unwrap_or(DEFAULT_API_BIND)
    }

    pub fn demo_bind(&self) -> &str {
        self.demo
            .as_ref()
            .map(|s| s.bind.as_str())
            .unwrap_or(DEFAULT_DEMO_BIND)
    }
}
