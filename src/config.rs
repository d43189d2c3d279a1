// CLI configuration loaded from YAML

use crate::store::StoreOptions;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug};

const CONFIG_DIR: &str = "rosterstore";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data file used when `--file` is not given
    pub file: PathBuf,
    pub sync_writes: bool,
    pub atomic_batches: bool,
    /// One of error, warn, info, debug, trace
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let options = StoreOptions::default();
        Self {
            file: PathBuf::from("students.csv"),
            sync_writes: options.sync_writes,
            atomic_batches: options.atomic_batches,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default config location, e.g. `~/.config/rosterstore/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load config from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).wrap_err_with(|| format!("Failed to read config file {:?}", path))?;
        let config: Config = serde_yaml::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse config file {:?}", path))?;
        config
            .level()
            .wrap_err_with(|| format!("Invalid config file {:?}", path))?;
        debug!(path = ?path, "Loaded config");
        Ok(config)
    }

    /// Load an explicit config, or the default one if present, or defaults
    ///
    /// An explicit path must exist. A missing default file is not an error.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse `log_level` into a tracing level
    pub fn level(&self) -> Result<Level> {
        self.log_level.parse().map_err(|_| {
            eyre!(
                "Invalid log_level {:?} (expected error, warn, info, debug or trace)",
                self.log_level
            )
        })
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            sync_writes: self.sync_writes,
            atomic_batches: self.atomic_batches,
        }
    }
}
