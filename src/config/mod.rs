mod init;
mod schema;

pub use init::run_init_wizard;
pub use schema::{Config, ServerConfig, DEFAULT_API_BIND, DEFAULT_DEMO_BIND, DEFAULT_LOG_LEVEL};

use anyhow::{Context, Result};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// Get the config directory path (~/.config/risk-engine/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("risk-engine"))
}

/// Get the default config file path (~/.config/risk-engine/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<()> {
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory at {}",
                config_dir.display()
            )
        })?;
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// An explicit `path` must exist. Without one, the default path is tried and
/// built-in defaults are used when it is absent.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Parse a log level name as accepted in `log_level`.
pub fn parse_log_level(name: &str) -> Option<Level> {
    match name.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if parse_log_level(config.log_level()).is_none() {
        errors.push(format!(
            "log_level: unknown level '{}' (expected trace, debug, info, warn or error)",
            config.log_level()
        ));
    }

    for (field, bind) in [("api.bind", config.api_bind()), ("demo.bind", config.demo_bind())] {
        if let Err(e) = bind.parse::<SocketAddr>() {
            errors.push(format!("{}: invalid address '{}' - {}", field, bind, e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
