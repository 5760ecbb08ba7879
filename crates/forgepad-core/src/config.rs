//! Host configuration
//!
//! Built-in defaults, then an optional `config.json` in the data directory,
//! then environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use forgepad_auth::GithubConfig;
use forgepad_window::LifecycleSettings;

use crate::error::CoreError;
use crate::Result;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Minimize the window instead of showing it once loaded
    pub start_minimized: bool,
    /// How long the splash stays up, in milliseconds
    pub splash_delay_ms: u64,
    /// Store scope for the GitHub credential
    pub storage_scope: String,
    /// GitHub OAuth application
    pub github: GithubConfig,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("forgepad.db"),
            start_minimized: false,
            splash_delay_ms: 6000,
            storage_scope: "github".to_string(),
            github: GithubConfig::default(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Forgepad"))
            .unwrap_or_else(|| PathBuf::from(".forgepad"))
    }

    /// Defaults, overlaid with `<data_dir>/config.json` and the process environment
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut config = Self::from_file(data_dir)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn from_file(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::new(data_dir.to_path_buf()));
        }

        let text = std::fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&text)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("START_MINIMIZED") {
            self.start_minimized = is_truthy(&value);
        }
        if let Some(client_id) = lookup("GITHUB_CLIENT_ID") {
            self.github.client_id = client_id;
        }
        if let Some(client_secret) = lookup("GITHUB_CLIENT_SECRET") {
            self.github.client_secret = client_secret;
        }
    }

    pub fn lifecycle(&self) -> LifecycleSettings {
        LifecycleSettings {
            splash_delay: Duration::from_millis(self.splash_delay_ms),
            start_minimized: self.start_minimized,
            credential_scope: self.storage_scope.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}
