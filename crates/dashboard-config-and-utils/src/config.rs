//! Configuration management for the dashboard tools.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Environment variable holding the backend API base URL.
pub const BACKEND_URL_ENV: &str = "BACKEND_ENDPOINT_URL";

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "ADMIN_DASHBOARD_LOG_LEVEL";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Base URL of the backend API, e.g. `https://api.example.com`.
    #[serde(default)]
    pub backend_endpoint_url: Option<String>,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            backend_endpoint_url: None,
        }
    }
}

impl Config {
    /// Load configuration from the config file (if present), then apply
    /// environment overrides.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "Loading config file");
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the config file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        tracing::info!(path = %paths.config_file().display(), "Config saved");
        Ok(())
    }

    fn load_from_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(url) = non_empty(BACKEND_URL_ENV) {
            self.backend_endpoint_url = Some(url);
        }
        if let Some(level) = non_empty(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
    }

    /// Get the backend base URL as a parsed URL.
    pub fn backend_url(&self) -> CoreResult<Url> {
        let raw = self.backend_endpoint_url.as_deref().ok_or_else(|| {
            CoreError::Config(format!("{BACKEND_URL_ENV} is not configured"))
        })?;
        let url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(CoreError::Config(format!(
                "backend URL cannot be used as a base: {raw}"
            )));
        }
        Ok(url)
    }
}
