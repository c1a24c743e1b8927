//! Table state as it moves through the pipeline.
//!
//! A sales table is loaded once, narrowed once by cleaning, and then only
//! read. `TableState` makes "not loaded yet" an explicit variant instead of
//! an absent frame.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

/// A table exactly as read from storage.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub dataframe: DataFrame,
    pub source: PathBuf,
    pub initial_row_count: usize,
}

impl LoadedTable {
    pub fn new(dataframe: DataFrame, source: impl Into<PathBuf>) -> Self {
        let initial_row_count = dataframe.height();
        Self {
            dataframe,
            source: source.into(),
            initial_row_count,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// A table that has been through every applicable cleaning step.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub dataframe: DataFrame,
    pub initial_row_count: usize,
}

impl CleanedTable {
    pub fn row_count(&self) -> usize {
        self.dataframe.height()
    }

    pub fn rows_removed(&self) -> usize {
        self.initial_row_count.saturating_sub(self.row_count())
    }
}

/// Where a pipeline run currently stands.
#[derive(Debug, Clone, Default)]
pub enum TableState {
    #[default]
    Unloaded,
    Loaded(LoadedTable),
    Cleaned(CleanedTable),
}

impl TableState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableState::Unloaded => "unloaded",
            TableState::Loaded(_) => "loaded",
            TableState::Cleaned(_) => "cleaned",
        }
    }

    /// The current frame, whatever stage it is at.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        match self {
            TableState::Unloaded => None,
            TableState::Loaded(table) => Some(&table.dataframe),
            TableState::Cleaned(table) => Some(&table.dataframe),
        }
    }

    pub fn cleaned(&self) -> Option<&CleanedTable> {
        match self {
            TableState::Cleaned(table) => Some(table),
            _ => None,
        }
    }
}
