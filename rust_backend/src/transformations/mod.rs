//! Data cleaning for sales tables.
//!
//! This module provides the ordered cleaning steps that turn a loaded sales
//! table into one safe for aggregation: missing-value removal, duplicate
//! removal, positivity filters and day-first date parsing.
//!
//! # Example
//!
//! ```no_run
//! use sales_insights::transformations::{drop_missing_rows, remove_duplicate_rows};
//! use polars::prelude::*;
//!
//! # fn example(df: DataFrame) -> Result<(), PolarsError> {
//! let complete = drop_missing_rows(&df)?;
//! let unique = remove_duplicate_rows(&complete)?;
//! # Ok(())
//! # }
//! ```

pub mod cleaning;

pub use cleaning::{
    count_duplicate_rows, drop_missing_rows, filter_positive, parse_date_column,
    remove_duplicate_rows, DataCleaner, DateConversion,
};
