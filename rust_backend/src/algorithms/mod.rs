//! Aggregations over a cleaned sales table.
//!
//! # Components
//!
//! - [`analysis`]: the headline reductions (peak and average daily sales,
//!   most frequent best-selling item, average transactions per day) and the
//!   [`SalesAnalyzer`] that runs the pipeline and reports them
//!
//! # Example
//!
//! ```no_run
//! use sales_insights::algorithms::average_daily_sales;
//! use polars::prelude::*;
//!
//! # fn example(df: &DataFrame) {
//! let average = average_daily_sales(df).expect("sales column present");
//! println!("Average sales per day: {:.2}", average);
//! # }
//! ```

pub mod analysis;

pub use analysis::{
    average_daily_sales, average_transactions_per_day, most_frequent_item, peak_daily_sales,
    SalesAnalyzer, SalesInsights,
};
