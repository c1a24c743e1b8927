//! Parsers for individual sales-file values.
//!
//! - [`dates`]: day-first calendar dates for the `Date` column

pub mod dates;

pub use dates::DateParser;
