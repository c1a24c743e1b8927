//! Analyzer configuration file support.
//!
//! This module reads the analyzer settings (input file, preview size, log
//! sinks) from a TOML file. Every field has a default, so an empty file or
//! no file at all yields a working configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::logging::LoggingConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SALES_ANALYZER_CONFIG";

/// Analyzer configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
    /// Rows shown in the console preview after loading
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("data").join("sales_data.csv")
}

fn default_preview_rows() -> usize {
    5
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            preview_rows: default_preview_rows(),
        }
    }
}

impl AnalyzerConfig {
    /// Load analyzer configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AnalyzerConfig)` if successful, with relative paths resolved
    ///   against the directory holding the file
    /// * `Err(ConfigError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(match path.parent() {
            Some(dir) => config.relative_to(dir),
            None => config,
        })
    }

    /// Anchor relative input and log paths at `dir`.
    pub fn relative_to(mut self, dir: &Path) -> Self {
        if self.input.path.is_relative() {
            self.input.path = dir.join(&self.input.path);
        }
        if let Some(log_dir) = self.logging.directory.as_mut() {
            if log_dir.is_relative() {
                *log_dir = dir.join(&*log_dir);
            }
        }
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load analyzer configuration from the default location.
    ///
    /// Searches for `sales_analyzer.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(AnalyzerConfig))` if found and parsed successfully
    /// * `Ok(None)` if no config file exists in any of those places
    /// * `Err(ConfigError)` if a file was found but could not be read or parsed
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from("sales_analyzer.toml"),
            PathBuf::from("rust_backend/sales_analyzer.toml"),
            PathBuf::from("../sales_analyzer.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Resolve the configuration the binary should run with.
    ///
    /// An explicit path in [`CONFIG_ENV_VAR`] wins, then the default search,
    /// then built-in defaults.
    pub fn resolve() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(PathBuf::from(path));
        }
        Ok(Self::from_default_location()?.unwrap_or_default())
    }
}
