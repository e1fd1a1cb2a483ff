//! KrackerXR settings
//!
//! Looked up in this order, later wins:
//! 1. built-in defaults
//! 2. `<config dir>/krackerxr/config.yaml`
//! 3. `KRACKER_CAMPAIGN`, `KRACKER_LOG`, `KRACKER_MODE`

use kracker_cipher::Mode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_CAMPAIGN: &str = "KRACKER_CAMPAIGN";
pub const ENV_LOG: &str = "KRACKER_LOG";
pub const ENV_MODE: &str = "KRACKER_MODE";

/// Errors from loading settings
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Campaign document (stages, puzzles, mission copy)
    pub campaign_path: PathBuf,

    /// tracing filter used when RUST_LOG is not set
    pub log_filter: String,

    /// Direction used by the CLI when none is given
    pub default_mode: Mode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            campaign_path: config_dir().join("campaign.json"),
            log_filter: "info".into(),
            default_mode: Mode::Encode,
        }
    }
}

impl Settings {
    /// Load from the default location, then apply the environment.
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(config_dir().join("config.yaml"))?;
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Load from an explicit file. A missing file yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings = serde_yaml::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(settings)
    }

    /// Overlay values from `lookup` (normally the process environment).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_CAMPAIGN).filter(|v| !v.is_empty()) {
            self.campaign_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_LOG).filter(|v| !v.is_empty()) {
            self.log_filter = v;
        }
        if let Some(v) = lookup(ENV_MODE).filter(|v| !v.is_empty()) {
            self.default_mode = v.parse().map_err(|_| Error::InvalidValue {
                key: ENV_MODE.into(),
                value: v.clone(),
            })?;
        }
        Ok(())
    }

    /// Write settings as YAML, creating parent directories
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }
}

/// `~/.config/krackerxr` (or the platform equivalent)
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("krackerxr")
}
