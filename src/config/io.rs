//! Configuration file I/O operations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{CONFIG_FILE_NAME, Config};

impl Config {
    /// Get the global config directory path (~/.bounty-targets/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bounty-targets")
    }

    /// Get the global config file path (~/.bounty-targets/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load and validate configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for: bounty-targets.toml, then ~/.bounty-targets/config.toml
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let local_path = dir.join(CONFIG_FILE_NAME);
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        let global_path = Self::global_config_path();
        if global_path.exists() {
            return Self::from_file(&global_path);
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Resolve the config for a run: an explicit path wins, relative paths
    /// are taken from `work_dir`.
    pub fn load(work_dir: &Path, config_override: Option<&Path>) -> Result<Self> {
        match config_override {
            Some(p) if p.is_absolute() => Self::from_file(p),
            Some(p) => Self::from_file(&work_dir.join(p)),
            None => Self::from_dir(work_dir),
        }
    }
}
