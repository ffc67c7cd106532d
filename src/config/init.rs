use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::{
    ensure_config_dir, get_config_path, parse_log_level, Config, ServerConfig, DEFAULT_API_BIND,
    DEFAULT_DEMO_BIND, DEFAULT_LOG_LEVEL,
};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

fn prompt_bind(message: &str, default: &str) -> Result<String> {
    loop {
        let input = prompt_with_default(message, default)?;
        match input.parse::<SocketAddr>() {
            Ok(_) => return Ok(input),
            Err(e) => println!("  Invalid address: {}. Try again.", e),
        }
    }
}

/// Build the YAML written by the wizard, leaving defaults out of the file.
pub(crate) fn build_config(log_level: &str, api_bind: &str, demo_bind: &str) -> Config {
    Config {
        log_level: (log_level != DEFAULT_LOG_LEVEL).then(|| log_level.to_string()),
        api: (api_bind != DEFAULT_API_BIND).then(|| ServerConfig {
            bind: api_bind.to_string(),
        }),
        demo: (demo_bind != DEFAULT_DEMO_BIND).then(|| ServerConfig {
            bind: demo_bind.to_string(),
        }),
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("Risk Engine Configuration");
    println!("=========================");
    println!();

    let api_bind = prompt_bind("Strict API listen address", DEFAULT_API_BIND)?;
    let demo_bind = prompt_bind("Demo service listen address", DEFAULT_DEMO_BIND)?;

    let log_level = loop {
        let input = prompt_with_default(
            "Log level (trace, debug, info, warn, error)",
            DEFAULT_LOG_LEVEL,
        )?;
        if parse_log_level(&input).is_some() {
            break input.to_lowercase();
        }
        println!("  Invalid log level. Try again.");
    };

    let default_config_path = match default_path {
        Some(p) => p,
        None => {
            ensure_config_dir()?;
            get_config_path()?
        }
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = build_config(&log_level, &api_bind, &demo_bind);
    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `risk-engine serve-api` or `risk-engine serve-demo` to get started.");

    Ok(())
}
