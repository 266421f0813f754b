//! User configuration for diaryx-tree.
//!
//! Configuration is optional: every key has a default and a missing file
//! yields [`DiaryxConfig::default`].
//!
//! # Location
//!
//! 1. `--config <PATH>` on the command line
//! 2. the `DIARYX_CONFIG` environment variable
//! 3. `~/.diaryx/config.toml`
//!
//! # Format
//!
//! ```toml
//! # Extensions classified as Markdown during import (case-insensitive)
//! markdown_extensions = ["md", "markdown"]
//!
//! # Upper bound on concurrent file reads; defaults to max(10, 2 × cores)
//! max_parallel_reads = 16
//!
//! # Frontmatter keys reported as missing after import
//! required_fields = ["title", "author", "created"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_PATH_ENV, DEFAULT_MARKDOWN_EXTENSIONS, default_parallelism,
};
use crate::core::DiaryxError;
use crate::note::REQUIRED_FIELDS;

fn default_markdown_extensions() -> Vec<String> {
    DEFAULT_MARKDOWN_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect()
}

fn default_required_fields() -> Vec<String> {
    REQUIRED_FIELDS.iter().map(|field| (*field).to_string()).collect()
}

/// Settings that shape import and tree commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiaryxConfig {
    /// Extensions (without the dot) treated as Markdown notes.
    pub markdown_extensions: Vec<String>,

    /// Bound on concurrent file reads during import.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parallel_reads: Option<usize>,

    /// Keys reported when absent from a note's frontmatter.
    pub required_fields: Vec<String>,
}

impl Default for DiaryxConfig {
    fn default() -> Self {
        Self {
            markdown_extensions: default_markdown_extensions(),
            max_parallel_reads: None,
            required_fields: default_required_fields(),
        }
    }
}

impl DiaryxConfig {
    /// Load from the default location, falling back to defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if a value is out of range.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` if given, otherwise from [`Self::default_path`].
    ///
    /// An explicitly given path must exist; the default location may not.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(&path).await,
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path).await
                } else {
                    debug!("No config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific file path.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Config file location: `$DIARYX_CONFIG`, else `~/.diaryx/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|value| !value.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir().ok_or_else(|| DiaryxError::ConfigError {
            message: "Unable to determine home directory".to_string(),
        })?;
        Ok(home.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Check value ranges and normalize extensions (leading dots removed).
    fn validate(&self) -> Result<(), DiaryxError> {
        if self.markdown_extensions.iter().all(|ext| ext.trim_start_matches('.').is_empty()) {
            return Err(DiaryxError::ConfigError {
                message: "markdown_extensions must list at least one extension".to_string(),
            });
        }
        if self.max_parallel_reads == Some(0) {
            return Err(DiaryxError::ConfigError {
                message: "max_parallel_reads must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Configured extensions without leading dots.
    #[must_use]
    pub fn extensions(&self) -> Vec<String> {
        self.markdown_extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect()
    }

    /// Effective read concurrency.
    #[must_use]
    pub fn parallelism(&self) -> usize {
        self.max_parallel_reads.unwrap_or_else(default_parallelism)
    }
}
