//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{print_formatted, print_success, OutputFormat};
use crate::api::ApiClient;
use crate::config::{Config, ServerConfig};
use crate::ui::theme::ThemePreset;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "server.base_url", "ui.theme")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "server.base_url", "ui.theme")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format),
        ConfigCommands::Get { key } => get(&key, format),
        ConfigCommands::Set { key, value } => set(&key, &value, quiet),
        ConfigCommands::Path => path(format),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

fn get(key: &str, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let value = get_config_value(&config, key)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&value)?),
        OutputFormat::Text => println!("{}", value),
    }

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["server", "base_url"] => Ok(config.server.base_url.clone()),
        ["server", "connect_timeout_secs"] => Ok(config.server.connect_timeout_secs.to_string()),
        ["server", "request_timeout_secs"] => Ok(config.server.request_timeout_secs.to_string()),
        ["ui", "theme"] => Ok(format!("{:?}", config.ui.theme).to_lowercase()),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;

    set_config_value(&mut config, key, value)?;
    config.save()?;

    print_success(&format!("Set {} = {}", key, value), quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["server", "base_url"] => {
            let server = ServerConfig {
                base_url: value.trim().to_string(),
                ..config.server.clone()
            };
            let client = ApiClient::new(&server)?;
            config.server.base_url = client.base_url().to_string();
        }
        ["server", "connect_timeout_secs"] => {
            config.server.connect_timeout_secs = value.parse()?;
        }
        ["server", "request_timeout_secs"] => {
            config.server.request_timeout_secs = value.parse()?;
        }
        ["ui", "theme"] => {
            config.ui.theme = ThemePreset::from_name(value)
                .ok_or_else(|| anyhow::anyhow!("Unknown theme: {} (slate, indigo or paper)", value))?;
        }
        _ => anyhow::bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists: path.exists(),
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}
