use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ui::theme::ThemePreset;

/// Server used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Environment variable that overrides the configured server URL
pub const SERVER_ENV_VAR: &str = "EFFECT_BROWSER_SERVER";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub downloads: DownloadConfig,
}

/// Connection to the effect server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the server, e.g. `http://localhost:5000`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; unset means requests never time out
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Appearance and interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color theme
    #[serde(default)]
    pub theme: ThemePreset,
    /// How long toasts stay on screen
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
    /// Effect count pre-filled in the generation form
    #[serde(default = "default_generate_count")]
    pub default_generate_count: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreset::default(),
            toast_secs: default_toast_secs(),
            default_generate_count: default_generate_count(),
        }
    }
}

impl UiConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_secs.max(1))
    }
}

fn default_toast_secs() -> u64 {
    3
}

fn default_generate_count() -> u32 {
    5
}

/// Where downloaded effects and demos are saved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory the save dialog opens in
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl DownloadConfig {
    /// Directory to save into: the configured one, else the user's download folder
    pub fn resolve_directory(&self) -> Option<PathBuf> {
        self.directory.clone().or_else(|| {
            directories::UserDirs::new().and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        })
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "effect-browser", "EffectBrowser")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a file, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Server URL after applying overrides: command line, then environment, then file.
    pub fn server_url(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(str::to_string)
            .or_else(|| std::env::var(SERVER_ENV_VAR).ok().filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| self.server.base_url.clone())
    }
}
