use polars::prelude::*;
use std::path::{Path, PathBuf};

use crate::core::domain::{CleanedTable, TableState};
use crate::error::{AnalysisError, CleanError, LoadError};
use crate::io::loaders::SalesLoader;
use crate::logging::Logging;
use crate::preprocessing::validator::{SalesValidator, ValidationReport};
use crate::transformations::cleaning::DataCleaner;

/// How a pipeline run ended.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The file could not be read; nothing after loading ran
    LoadFailed(LoadError),
    /// The table was loaded and validated, but a cleaning step failed
    CleanFailed {
        validation: ValidationReport,
        error: CleanError,
    },
    /// The table went through every stage
    Cleaned {
        validation: ValidationReport,
        initial_rows: usize,
        cleaned_rows: usize,
    },
}

impl PipelineOutcome {
    pub fn is_cleaned(&self) -> bool {
        matches!(self, PipelineOutcome::Cleaned { .. })
    }

    pub fn validation(&self) -> Option<&ValidationReport> {
        match self {
            PipelineOutcome::LoadFailed(_) => None,
            PipelineOutcome::CleanFailed { validation, .. }
            | PipelineOutcome::Cleaned { validation, .. } => Some(validation),
        }
    }

    /// `true` when cleaning finished but left no rows.
    pub fn is_empty_after_cleaning(&self) -> bool {
        matches!(self, PipelineOutcome::Cleaned { cleaned_rows: 0, .. })
    }
}

/// Load, validate and clean one sales file.
///
/// The pipeline owns its table for its whole life. Stages run strictly in
/// order, and the validator's missing-columns set is handed to the cleaner
/// so that steps for absent columns are skipped.
pub struct SalesPipeline {
    source: PathBuf,
    loader: SalesLoader,
    validator: SalesValidator,
    cleaner: DataCleaner,
    state: TableState,
}

impl SalesPipeline {
    pub fn new(source: impl Into<PathBuf>, logging: &Logging) -> Self {
        Self {
            source: source.into(),
            loader: SalesLoader::new(logging),
            validator: SalesValidator::new(logging),
            cleaner: DataCleaner::new(logging),
            state: TableState::Unloaded,
        }
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.loader = self.loader.with_preview_rows(rows);
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Run every stage and report how far it got.
    ///
    /// Loading replaces whatever table the pipeline held before.
    pub fn run(&mut self) -> PipelineOutcome {
        self.state = TableState::Unloaded;

        let loaded = match self.loader.load(&self.source) {
            Ok(table) => table,
            Err(err) => return PipelineOutcome::LoadFailed(err),
        };

        let validation = self.validator.validate(Some(&loaded.dataframe));

        match self.cleaner.clean(&loaded, &validation.missing_columns) {
            Ok(cleaned) => {
                let outcome = PipelineOutcome::Cleaned {
                    validation,
                    initial_rows: cleaned.initial_row_count,
                    cleaned_rows: cleaned.row_count(),
                };
                self.state = TableState::Cleaned(cleaned);
                outcome
            }
            Err(error) => {
                self.state = TableState::Loaded(loaded);
                PipelineOutcome::CleanFailed { validation, error }
            }
        }
    }

    /// The cleaned table, or [`AnalysisError::NoData`] if cleaning has not
    /// produced one.
    pub fn cleaned(&self) -> Result<&CleanedTable, AnalysisError> {
        self.state.cleaned().ok_or(AnalysisError::NoData)
    }

    pub fn cleaned_dataframe(&self) -> Result<&DataFrame, AnalysisError> {
        self.cleaned().map(|table| &table.dataframe)
    }
}

/// Convenience function to run the pipeline over one file.
pub fn preprocess_sales(path: &Path, logging: &Logging) -> (PipelineOutcome, TableState) {
    let mut pipeline = SalesPipeline::new(path, logging);
    let outcome = pipeline.run();
    (outcome, pipeline.state)
}
