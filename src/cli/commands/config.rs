//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::api::ApiClient;
use crate::cli::output::{print_formatted, print_success, OutputFormat};
use crate::config::Config;
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

    /// Point the browser at another effect server
    SetServer {
        /// Base URL, e.g. http://render-box:5000
        url: String,
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
        ConfigCommands::Show => show(format).await,
        ConfigCommands::Get { key } => get(&key, format).await,
        ConfigCommands::Set { key, value } => set(&key, &value, quiet).await,
        ConfigCommands::SetServer { url } => set("server.base_url", &url, quiet).await,
        ConfigCommands::Path => path(format).await,
    }
}

async fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

async fn get(key: &str, format: OutputFormat) -> Result<()> {
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
        ["server", "timeout_secs"] => Ok(config
            .server
            .timeout_secs
            .map(|s| s.to_string())
            .unwrap_or_else(|| "<none>".to_string())),
        ["ui", "theme"] => Ok(config.ui.theme.name().to_string()),
        ["ui", "toast_secs"] => Ok(config.ui.toast_secs.to_string()),
        ["ui", "default_generate_count"] => Ok(config.ui.default_generate_count.to_string()),
        ["downloads", "directory"] => Ok(config
            .downloads
            .directory
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "<not set>".to_string())),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

async fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
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
            // Reject URLs the client could never use
            ApiClient::new(value, None)?;
            config.server.base_url = value.to_string();
        }
        ["server", "timeout_secs"] => {
            config.server.timeout_secs = match value {
                "" | "none" => None,
                secs => Some(secs.parse()?),
            };
        }
        ["ui", "theme"] => {
            config.ui.theme = parse_theme(value)?;
        }
        ["ui", "toast_secs"] => {
            config.ui.toast_secs = value.parse()?;
        }
        ["ui", "default_generate_count"] => {
            let count: u32 = value.parse()?;
            if count == 0 {
                anyhow::bail!("default_generate_count must be at least 1");
            }
            config.ui.default_generate_count = count;
        }
        ["downloads", "directory"] => {
            config.downloads.directory = (!value.is_empty()).then(|| value.into());
        }
        _ => anyhow::bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn parse_theme(value: &str) -> Result<ThemePreset> {
    let wanted = value.trim().to_lowercase();
    ThemePreset::all()
        .iter()
        .copied()
        .find(|p| {
            p.name().to_lowercase() == wanted
                || serde_json::to_value(p)
                    .ok()
                    .and_then(|v| v.as_str().map(|s| s == wanted))
                    .unwrap_or(false)
        })
        .ok_or_else(|| anyhow::anyhow!("Unknown theme: {}", value))
}

async fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_get_known_keys() {
        let config = Config::default();
        assert_eq!(
            get_config_value(&config, "server.base_url").unwrap(),
            "http://localhost:5000"
        );
        assert_eq!(get_config_value(&config, "server.timeout_secs").unwrap(), "<none>");
        assert_eq!(get_config_value(&config, "ui.toast_secs").unwrap(), "3");
        assert!(get_config_value(&config, "ui.colour").is_err());
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();

        set_config_value(&mut config, "server.base_url", "http://render-box:8080").unwrap();
        set_config_value(&mut config, "server.timeout_secs", "20").unwrap();
        set_config_value(&mut config, "ui.default_generate_count", "8").unwrap();
        set_config_value(&mut config, "ui.theme", "catppuccin").unwrap();

        assert_eq!(config.server.base_url, "http://render-box:8080");
        assert_eq!(config.server.timeout(), Some(Duration::from_secs(20)));
        assert_eq!(config.ui.default_generate_count, 8);
        assert_eq!(config.ui.theme, ThemePreset::Catppuccin);

        set_config_value(&mut config, "server.timeout_secs", "none").unwrap();
        assert_eq!(config.server.timeout_secs, None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "server.base_url", "not a url").is_err());
        assert!(set_config_value(&mut config, "ui.default_generate_count", "0").is_err());
        assert!(set_config_value(&mut config, "ui.theme", "neon").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_theme_by_display_name() {
        assert_eq!(parse_theme("Catppuccin Mocha").unwrap(), ThemePreset::Catppuccin);
        assert_eq!(parse_theme("SLATE").unwrap(), ThemePreset::Slate);
    }
}
