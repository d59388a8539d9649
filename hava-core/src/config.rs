use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::provider::ErrorPolicy;

/// Where the e-ink page lands when nothing is configured, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "dist/index.html";

/// Error policy per entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Build-time page generation.
    pub generate: ErrorPolicy,
    /// Interactive `show` and `export`.
    pub show: ErrorPolicy,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            generate: ErrorPolicy::Propagate,
            show: ErrorPolicy::Fallback,
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Override for the Open-Meteo forecast endpoint, e.g. a local mirror.
    pub api_base_url: Option<String>,

    pub output_path: Option<PathBuf>,

    /// Example TOML:
    /// [policy]
    /// generate = "fallback"
    pub policy: PolicyConfig,
}

impl Config {
    pub fn output_path(&self) -> &Path {
        self.output_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_PATH))
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

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
        let dirs = ProjectDirs::from("dev", "hava", "hava")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
