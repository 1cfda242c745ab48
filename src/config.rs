//! Configuration loading and management
//!
//! Handles parsing of `.todo.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::debounce::DEFAULT_QUIESCENCE_MS;
use crate::loader::DEFAULT_SOURCE_URL;

pub const CONFIG_FILE_NAME: &str = ".todo.toml";

const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the initial task list comes from
    #[serde(default)]
    pub source: SourceConfig,

    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,

    /// Task defaults
    #[serde(default)]
    pub tasks: TasksConfig,
}

/// Initial load source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Remote endpoint returning a JSON array of tasks
    #[serde(default = "default_source_url")]
    pub url: String,

    /// Local JSON file used instead of the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            file: None,
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiescence window before a typed term takes effect
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_QUIESCENCE_MS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SearchConfig {
    pub fn quiescence(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Tasks configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Owner id stamped on newly created tasks
    #[serde(default = "default_owner")]
    pub default_owner: i64,
}

fn default_owner() -> i64 {
    1
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_owner: default_owner(),
        }
    }
}

impl Config {
    /// Load configuration from a `.todo.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.todo.toml` from `dir`, or return defaults when it is absent
    pub fn load_from_dir(dir: &Path) -> crate::error::Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> crate::error::Result<()> {
        self.source.validate()?;
        self.search.validate()?;
        Ok(())
    }
}

impl SourceConfig {
    fn validate(&self) -> crate::error::Result<()> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "source.url cannot be empty".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(crate::error::Error::InvalidConfig(format!(
                "source.url must be http(s): '{url}'"
            )));
        }
        Ok(())
    }
}

impl SearchConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.debounce_ms == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "search.debounce_ms must be > 0".to_string(),
            ));
        }
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(crate::error::Error::InvalidConfig(format!(
                "search.debounce_ms must be <= {MAX_DEBOUNCE_MS}"
            )));
        }
        Ok(())
    }
}
