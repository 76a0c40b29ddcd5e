//! Compile configuration, optionally loaded from TOML
//!
//! ```toml
//! source_dir = "templates"
//! resolve = true
//! ids = "sequential"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::compose::{IdSource, RandomIds, SequentialIds};

/// Errors that can occur when loading a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How include context ids are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Base64 of 16 random bytes
    #[default]
    Random,
    /// `ctx0`, `ctx1`, ... in document order
    Sequential,
}

impl IdStrategy {
    pub fn source(&self) -> Box<dyn IdSource> {
        match self {
            IdStrategy::Random => Box::new(RandomIds::new()),
            IdStrategy::Sequential => Box::new(SequentialIds::new()),
        }
    }
}

/// Configuration for the compile pipeline
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileConfig {
    /// Directory `@path` values are resolved against; the entry file's
    /// directory when unset
    pub source_dir: Option<PathBuf>,
    /// Run include and slot resolution after building the AST
    pub resolve: bool,
    pub ids: IdStrategy,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            source_dir: None,
            resolve: true,
            ids: IdStrategy::Random,
        }
    }
}

impl CompileConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    pub fn with_resolve(mut self, resolve: bool) -> Self {
        self.resolve = resolve;
        self
    }

    pub fn with_ids(mut self, ids: IdStrategy) -> Self {
        self.ids = ids;
        self
    }
}
