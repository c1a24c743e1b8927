//! Loading sales files into tables.
//!
//! # Example
//!
//! ```no_run
//! use sales_insights::io::SalesLoader;
//! use sales_insights::logging::Logging;
//! use std::path::Path;
//!
//! let logging = Logging::disabled();
//! let table = SalesLoader::new(&logging)
//!     .load(Path::new("data/sales_data.csv"))
//!     .expect("Failed to load sales file");
//! println!("{} rows", table.initial_row_count);
//! ```

pub mod loaders;


pub use loaders::{SalesLoader, DEFAULT_PREVIEW_ROWS, NULL_MARKERS};
