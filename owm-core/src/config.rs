use anyhow::{Context, Result, anyhow, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

use crate::units::UnitMatch;

/// Environment variable holding the OpenWeatherMap API key.
pub const API_KEY_ENV: &str = "OWM_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";

/// Settings read from the optional config file.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 30
/// unit_match = "exact"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fallback key; `OWM_API_KEY` wins when set.
    pub api_key: Option<String>,
    pub base_url: String,
    pub geolocation_url: String,
    /// Total request timeout.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub unit_match: UnitMatch,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            unit_match: UnitMatch::default(),
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "openweathermap", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from `OWM_API_KEY`, else from the file, else empty.
    ///
    /// An empty key is still sent; the provider rejects it with 401.
    pub fn resolved_api_key(&self) -> String {
        Self::pick_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    fn pick_api_key(env: Option<String>, file: Option<&str>) -> String {
        env.filter(|k| !k.is_empty()).or_else(|| file.map(str::to_owned)).unwrap_or_default()
    }

    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.timeout_secs > 0, "timeout_secs must be greater than zero");
        ensure!(self.connect_timeout_secs > 0, "connect_timeout_secs must be greater than zero");
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
