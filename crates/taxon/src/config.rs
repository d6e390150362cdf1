//! Configuration management for taxon.
//!
//! Configuration is optional. Without a config file the snapshot is read from
//! `public/taxonomy.json`, the path the export step writes to.
//!
//! ```yaml
//! snapshot-path: data/taxonomy.json
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "taxon.yaml";

/// Snapshot path used when nothing else is configured
pub const DEFAULT_SNAPSHOT_PATH: &str = "public/taxonomy.json";

/// Configuration file structure for taxon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TaxonConfig {
    /// Path to the taxonomy snapshot
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(DEFAULT_SNAPSHOT_PATH)
}

impl Default for TaxonConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl TaxonConfig {
    /// Load configuration from a file.
    ///
    /// A relative `snapshot-path` is resolved against the directory holding
    /// the config file, so the file can be used from any working directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or is not valid
    /// configuration YAML.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| Error::Config(format!("Cannot read {}: {e}", path.display())))?;
        let mut config = Self::parse(&content)?;

        if config.snapshot_path.is_relative() {
            if let Some(base) = path.parent() {
                config.snapshot_path = base.join(&config.snapshot_path);
            }
        }

        Ok(config)
    }

    /// Parse configuration from YAML text without path resolution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the YAML is invalid or has unknown keys.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Determine which snapshot file to load.
    ///
    /// Precedence: an explicit snapshot path, then the explicit config file,
    /// then `taxon.yaml` in `working_dir` if it exists, then the default path
    /// relative to `working_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a config file that is consulted cannot be
    /// loaded.
    pub async fn resolve_snapshot_path(
        working_dir: &Path,
        snapshot: Option<&Path>,
        config_file: Option<&Path>,
    ) -> Result<PathBuf> {
        if let Some(snapshot) = snapshot {
            return Ok(snapshot.to_path_buf());
        }

        let config_file = match config_file {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = working_dir.join(CONFIG_FILE_NAME);
                fs::try_exists(&candidate)
                    .await
                    .unwrap_or(false)
                    .then_some(candidate)
            }
        };

        match config_file {
            Some(path) => {
                tracing::debug!(config = %path.display(), "Loading configuration");
                Ok(Self::load(&path).await?.snapshot_path)
            }
            None => Ok(working_dir.join(DEFAULT_SNAPSHOT_PATH)),
        }
    }
}
