//! Sales table validation with warning reporting.
//!
//! This module checks a loaded sales table against the expected five-column
//! schema and for basic data quality problems. Validation never changes the
//! data and never stops the pipeline; every finding is reported as a warning
//! and collected into a [`ValidationReport`].

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::schema::{MissingColumns, EXPECTED_COLUMNS};
use crate::logging::{Logging, StageLogger};
use crate::transformations::cleaning::count_duplicate_rows;

/// A single problem found while validating a sales table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationFinding {
    /// Loading did not produce a table
    NoTable,
    /// The table has neither columns nor rows
    EmptyTable,
    MissingColumns(Vec<String>),
    UnexpectedColumns(Vec<String>),
    /// The table has columns but no rows
    NoRows,
    /// Rows that exactly repeat an earlier row
    DuplicateRows(usize),
    /// The duplicate check itself could not run
    DuplicateCheckFailed(String),
}

impl ValidationFinding {
    pub fn message(&self) -> String {
        match self {
            ValidationFinding::NoTable => "No data found. Read the file first.".to_string(),
            ValidationFinding::EmptyTable => "DataFrame is empty".to_string(),
            ValidationFinding::MissingColumns(cols) => {
                format!("These columns are missing: {:?}", cols)
            }
            ValidationFinding::UnexpectedColumns(cols) => {
                format!("These columns are unexpected: {:?}", cols)
            }
            ValidationFinding::NoRows => "DataFrame has no rows".to_string(),
            ValidationFinding::DuplicateRows(n) => format!("There are {} duplicate rows", n),
            ValidationFinding::DuplicateCheckFailed(reason) => {
                format!("Could not check for duplicate rows: {}", reason)
            }
        }
    }
}

/// Summary statistics computed during validation.
///
/// # Fields
///
/// * `total_rows` - Rows in the loaded table
/// * `total_columns` - Columns in the loaded table
/// * `duplicate_rows` - Rows that repeat an earlier row
/// * `missing_columns` - Expected columns that are absent
/// * `unexpected_columns` - Columns outside the expected schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_rows: usize,
    pub total_columns: usize,
    pub duplicate_rows: usize,
    pub missing_columns: usize,
    pub unexpected_columns: usize,
}

/// Validation result with findings, statistics and the missing-columns set.
///
/// `warnings` holds the rendered message of each finding, in the order the
/// checks ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
    pub missing_columns: MissingColumns,
}

impl ValidationReport {
    pub fn new(missing_columns: MissingColumns) -> Self {
        Self {
            findings: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
            missing_columns,
        }
    }

    pub fn add_finding(&mut self, finding: ValidationFinding) {
        self.warnings.push(finding.message());
        self.findings.push(finding);
    }

    /// `true` when no finding was raised.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn has(&self, predicate: impl Fn(&ValidationFinding) -> bool) -> bool {
        self.findings.iter().any(predicate)
    }
}

/// Validator for loaded sales tables.
pub struct SalesValidator {
    log: StageLogger,
}

impl SalesValidator {
    pub fn new(logging: &Logging) -> Self {
        Self {
            log: logging.logger("validator"),
        }
    }

    /// Validates a loaded table, or the absence of one.
    ///
    /// Checks, in order:
    /// 1. no table loaded (stops)
    /// 2. no columns and no rows (stops)
    /// 3. expected columns that are missing
    /// 4. unexpected columns, when there are more columns than expected
    /// 5. no rows (stops)
    /// 6. duplicate rows
    ///
    /// The missing-columns set is always filled in, even when a check stops
    /// the sequence early.
    pub fn validate(&self, df: Option<&DataFrame>) -> ValidationReport {
        let report = Self::inspect(df);
        for warning in &report.warnings {
            self.log.warn(warning);
        }
        report
    }

    /// Run the checks without logging.
    pub fn inspect(df: Option<&DataFrame>) -> ValidationReport {
        let Some(df) = df else {
            let mut report = ValidationReport::new(MissingColumns::all());
            report.add_finding(ValidationFinding::NoTable);
            return report;
        };

        let mut report = ValidationReport::new(MissingColumns::of(df));
        report.stats.total_rows = df.height();
        report.stats.total_columns = df.width();
        report.stats.missing_columns = report.missing_columns.len();

        if df.width() == 0 && df.height() == 0 {
            report.add_finding(ValidationFinding::EmptyTable);
            return report;
        }

        if !report.missing_columns.is_empty() {
            let names = report.missing_columns.names();
            report.add_finding(ValidationFinding::MissingColumns(names));
        }

        if df.width() > EXPECTED_COLUMNS.len() {
            let unexpected = unexpected_columns(df);
            report.stats.unexpected_columns = unexpected.len();
            report.add_finding(ValidationFinding::UnexpectedColumns(unexpected));
        }

        if df.height() == 0 {
            report.add_finding(ValidationFinding::NoRows);
            return report;
        }

        match count_duplicate_rows(df) {
            Ok(duplicates) => {
                report.stats.duplicate_rows = duplicates;
                if duplicates > 0 {
                    report.add_finding(ValidationFinding::DuplicateRows(duplicates));
                }
            }
            Err(err) => report.add_finding(duplicate_check_failed(&err)),
        }

        report
    }
}

fn duplicate_check_failed(err: &PolarsError) -> ValidationFinding {
    ValidationFinding::DuplicateCheckFailed(err.to_string())
}

fn unexpected_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .filter(|name| !EXPECTED_COLUMNS.iter().any(|c| c.as_str() == name.as_str()))
        .map(|name| name.to_string())
        .collect()
}
