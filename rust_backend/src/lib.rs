//! Sales insights: load a daily sales file, validate it against the expected
//! schema, clean it, and report headline figures.

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod logging;
pub mod parsing;
pub mod preprocessing;
pub mod transformations;

pub use algorithms::{SalesAnalyzer, SalesInsights};
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, CleanError, ConfigError, LoadError};
pub use logging::{Logging, LoggingConfig, StageLogger};
pub use preprocessing::{PipelineOutcome, SalesPipeline};
