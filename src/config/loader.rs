//! Configuration loading for memgraph
//!
//! Handles loading scan tunables from TOML files and merging with defaults.

use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Scan tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum nodes one scan may record before stopping
    #[serde(default = "default_node_budget")]
    pub node_budget: usize,

    /// Chunk size in bytes for probing unclassified blocks
    #[serde(default = "default_probe_chunk")]
    pub probe_chunk: usize,

    /// Hard cap in bytes on an unclassified block's probed extent
    #[serde(default = "default_probe_cap")]
    pub probe_cap: usize,

    /// Forward probe bound in bytes when sizing a static symbol's span
    #[serde(default = "default_symbol_span_probe")]
    pub symbol_span_probe: usize,

    /// Minimum length of a kept printable run
    #[serde(default = "default_string_min_len")]
    pub string_min_len: usize,

    /// Hex characters shown per block before truncation
    #[serde(default = "default_hex_preview_len")]
    pub hex_preview_len: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            node_budget: default_node_budget(),
            probe_chunk: default_probe_chunk(),
            probe_cap: default_probe_cap(),
            symbol_span_probe: default_symbol_span_probe(),
            string_min_len: default_string_min_len(),
            hex_preview_len: default_hex_preview_len(),
        }
    }
}

impl ScanConfig {
    /// Builder-style override for the node budget
    pub fn with_node_budget(mut self, budget: usize) -> Self {
        self.node_budget = budget;
        self
    }
}

/// Configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigLoader {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads configuration from file
    pub fn load(&self) -> Result<ScanConfig, ConfigError> {
        if !self.config_path.exists() {
            return Err(ConfigError::FileNotFound(
                self.config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(&self.config_path)?;
        let config: ScanConfig = toml::from_str(&contents)?;
        super::validator::validate_config(&config)?;
        Ok(config)
    }

    /// Loads configuration or returns defaults if the file doesn't exist
    pub fn load_or_default(&self) -> ScanConfig {
        self.load().unwrap_or_default()
    }

    /// Saves configuration to file
    pub fn save(&self, config: &ScanConfig) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Loads configuration from the conventional path.
///
/// A missing file falls back to defaults; a file that exists but fails to
/// parse or validate is an error, never silently ignored.
pub fn load_config() -> Result<ScanConfig, ConfigError> {
    load_config_from("memgraph.toml")
}

/// Same fallback semantics as `load_config`, for an explicit path
pub fn load_config_from<P: AsRef<Path>>(path: P) -> Result<ScanConfig, ConfigError> {
    if !path.as_ref().exists() {
        return Ok(ScanConfig::default());
    }
    ConfigLoader::new(path).load()
}
