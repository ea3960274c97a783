//! User preferences stored as TOML in the platform config directory.
//!
//! A missing or unreadable settings file yields the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quill_store::RemoteConfig;
use quill_store::remote::{DEFAULT_BASE_URL, DEFAULT_LIMIT};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "QuillStudio";
const APPLICATION: &str = "Quill";

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub remote: RemoteSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where sessions and posts are kept. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

/// Placeholder posts from the demo API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    pub enabled: bool,
    pub base_url: String,
    pub limit: usize,
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            timeout_secs: 10,
        }
    }
}

impl RemoteSettings {
    pub fn to_config(&self) -> RemoteConfig {
        RemoteConfig {
            base_url: self.base_url.clone(),
            limit: self.limit,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// `chrono` format string for dates.
    pub date_format: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            date_format: "%b %-d, %Y".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default path.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "Ignoring invalid settings file");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }

    /// The default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    /// Data directory: `override_dir`, then the configured one, then the
    /// platform default.
    pub fn data_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir.to_path_buf();
        }
        if let Some(dir) = &self.storage.data_dir {
            return dir.clone();
        }
        directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("quill-data"))
    }
}
