//! Configuration handling for the TUI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Backend origin used when neither the environment nor the config file names one
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the backend origin
pub const API_URL_ENV: &str = "ADMISSIONS_API_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("in", "sairam", "admissions-tui")
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Admissions backend origin, e.g. `https://admissions.example.edu`
    pub api_base_url: Option<String>,
    /// Per-request timeout; transport defaults apply when unset
    pub request_timeout_secs: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config directory.
    /// On first run a starter file is written so the backend origin is easy to find and edit.
    pub fn load_or_init() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if path.exists() {
            return Self::load_from(&path);
        }
        let config = Self {
            api_base_url: Some(DEFAULT_API_URL.to_string()),
            request_timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        };
        if let Err(e) = config.save_to(&path) {
            warn!("Could not write starter config to {}: {}", path.display(), e);
        }
        Ok(config)
    }

    /// Load configuration from a file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Save configuration to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Backend origin: environment, then config file, then the local default
    pub fn resolve_base_url(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_base_url.clone().filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string()
    }

    /// Backend origin using the process environment
    pub fn api_base_url(&self) -> String {
        self.resolve_base_url(std::env::var(API_URL_ENV).ok())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
