//! Core data model for the sales pipeline.
//!
//! This module defines the expected sales schema, the missing-columns set
//! derived from it, and the explicit state of the record table as it moves
//! from loading through cleaning.

pub mod domain;
pub mod schema;

pub use domain::{CleanedTable, LoadedTable, TableState};
pub use schema::{MissingColumns, SalesColumn, EXPECTED_COLUMNS};
