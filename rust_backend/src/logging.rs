//! Logging setup shared by every pipeline stage.
//!
//! A single [`Logging`] value is built at process start and passed by
//! reference into each component constructor. Nothing is registered as the
//! global default subscriber; every event is routed through the dispatch held
//! by the [`StageLogger`] that emitted it.
//!
//! # Example
//!
//! ```no_run
//! use sales_insights::logging::{Logging, LoggingConfig};
//!
//! let logging = Logging::from_config(&LoggingConfig::default()).unwrap();
//! let loader_log = logging.logger("loader");
//! loader_log.info("Loaded 30 rows");
//! ```

use std::fmt::Display;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::dispatcher::{self, Dispatch};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ConfigError;

/// Sink configuration, usually the `[logging]` table of the analyzer config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `warn`
    #[serde(default = "default_level")]
    pub level: String,
    /// Directory for the persistent log file; `None` disables the file sink
    #[serde(default = "default_directory")]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_directory() -> Option<PathBuf> {
    Some(PathBuf::from("logs"))
}

fn default_file_name() -> String {
    "sales_analyzer".to_string()
}

fn default_console() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: default_directory(),
            file_name: default_file_name(),
            console: default_console(),
        }
    }
}

impl LoggingConfig {
    /// Full path of the persistent log file, if one is configured.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.directory
            .as_ref()
            .map(|dir| dir.join(format!("{}.log", self.file_name)))
    }
}

/// Shared sink configuration for all named stage loggers.
#[derive(Clone)]
pub struct Logging {
    dispatch: Dispatch,
}

impl Logging {
    /// Build the console and file sinks described by `config`.
    pub fn from_config(config: &LoggingConfig) -> Result<Self, ConfigError> {
        let filter = parse_filter(&config.level)?;

        let console = config.console.then(|| {
            fmt::layer()
                .with_target(false)
                .with_writer(io::stdout)
        });

        let file = match config.log_file_path() {
            Some(path) => {
                if let Some(dir) = path.parent() {
                    fs::create_dir_all(dir).map_err(|source| ConfigError::LogFile {
                        path: path.clone(),
                        source,
                    })?;
                }
                let handle = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|source| ConfigError::LogFile {
                        path: path.clone(),
                        source,
                    })?;
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(false)
                        .with_writer(Mutex::new(handle)),
                )
            }
            None => None,
        };

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(file);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
        })
    }

    /// Route every event to a single writer, without ANSI colouring.
    pub fn with_writer<W>(level: &str, writer: W) -> Result<Self, ConfigError>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::registry().with(parse_filter(level)?).with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer),
        );

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
        })
    }

    /// Discard everything.
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    /// A logger for one named stage, sharing this sink configuration.
    pub fn logger(&self, name: &'static str) -> StageLogger {
        StageLogger {
            name,
            dispatch: self.dispatch.clone(),
        }
    }
}

fn parse_filter(level: &str) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(level).map_err(|e| ConfigError::InvalidLevel {
        level: level.to_string(),
        reason: e.to_string(),
    })
}

/// Named logger handed to one pipeline stage.
#[derive(Clone)]
pub struct StageLogger {
    name: &'static str,
    dispatch: Dispatch,
}

impl StageLogger {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn info(&self, message: impl Display) {
        dispatcher::with_default(&self.dispatch, || {
            tracing::info!(logger = self.name, "{}", message)
        });
    }

    pub fn warn(&self, message: impl Display) {
        dispatcher::with_default(&self.dispatch, || {
            tracing::warn!(logger = self.name, "{}", message)
        });
    }

    pub fn error(&self, message: impl Display) {
        dispatcher::with_default(&self.dispatch, || {
            tracing::error!(logger = self.name, "{}", message)
        });
    }
}

/// In-memory log sink.
///
/// Clones share the same buffer, so one handle can be given to
/// [`Logging::with_writer`] and another kept to read what was written.
#[derive(Debug, Clone, Default)]
pub struct MemorySink(Arc<Mutex<Vec<u8>>>);

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        match self.0.lock() {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }

    /// Lines containing `level` (e.g. `WARN`) and `needle`.
    pub fn lines_matching(&self, level: &str, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(level) && line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log buffer poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for MemorySink {
    type Writer = MemorySink;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
