use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::jsonrpc::DEFAULT_REQUEST_TIMEOUT;

/// Client configuration loaded from config.toml and environment variables
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// RemoteControl endpoint, e.g. `https://host/index.php/admin/remotecontrol`
    pub endpoint: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Per-call deadline in seconds
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost/index.php/admin/remotecontrol".to_string(),
            username: None,
            password: None,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT,
            log_level: "info".to_string(),
        }
    }
}

// Keeps the password out of logs
impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl ClientSettings {
    /// Load settings: defaults, then the config file (if present), then
    /// `LIMESURVEY_*` environment variables.
    ///
    /// An explicitly given `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Self::load_from_file(path)?
            }
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::load_from_file(&default_path)?
                } else {
                    info!("No config file found at {}, using defaults", default_path.display());
                    Self::default()
                }
            }
        };

        settings.apply_env_overrides();
        Ok(settings)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Using config file: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn config_path() -> PathBuf {
        if let Ok(custom_path) = std::env::var("LIMESURVEY_CONFIG_PATH") {
            PathBuf::from(custom_path)
        } else {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("limesurvey")
                .join("config.toml")
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("LIMESURVEY_URL") {
            self.endpoint = val;
        }

        if let Some(val) = lookup("LIMESURVEY_USERNAME") {
            self.username = Some(val);
        }

        if let Some(val) = lookup("LIMESURVEY_PASSWORD") {
            self.password = Some(val);
        }

        if let Some(val) = lookup("LIMESURVEY_TIMEOUT") {
            self.timeout_secs = val.parse().unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        }

        if let Some(val) = lookup("LIMESURVEY_LOG_LEVEL") {
            self.log_level = val;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Username and password, or an error naming what is missing
    pub fn credentials(&self) -> Result<(&str, &str)> {
        let username = self
            .username
            .as_deref()
            .context("No username configured. Set `username` in config.toml or LIMESURVEY_USERNAME")?;
        let password = self
            .password
            .as_deref()
            .context("No password configured. Set `password` in config.toml or LIMESURVEY_PASSWORD")?;
        Ok((username, password))
    }

    pub fn validate(&self) -> Result<()> {
        super::validation::validate_configuration(self, false)
    }
}
