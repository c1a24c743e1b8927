//! Error types for the sales pipeline.
//!
//! Every stage reports its failures through the logging channel, and also
//! hands them back as one of these values so library callers can tell
//! "no file" apart from "bad data" or "nothing left after cleaning".

use std::path::PathBuf;

use polars::prelude::PolarsError;

/// Result type for loading operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for aggregations over the cleaned table
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error raised while reading the sales file into a table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("An unexpected error occurred while reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("An unexpected error occurred while parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

impl LoadError {
    /// Classify an I/O failure by kind.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(path),
            std::io::ErrorKind::PermissionDenied => LoadError::PermissionDenied(path),
            _ => LoadError::Io { path, source },
        }
    }
}

/// Error raised by a cleaning step.
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    #[error("Cleaning step '{step}' failed: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: PolarsError,
    },
}

impl CleanError {
    pub fn step(step: &'static str) -> impl FnOnce(PolarsError) -> CleanError {
        move |source| CleanError::Step { step, source }
    }
}

/// Error raised by an aggregation.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("No data available: the sales table has not been cleaned")]
    NoData,

    #[error("Column unavailable: {0}")]
    ColumnUnavailable(String),

    #[error("Column '{0}' has no values")]
    NoRows(String),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Error raised while reading configuration or building the log sinks.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid log level '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },

    #[error("Failed to open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
