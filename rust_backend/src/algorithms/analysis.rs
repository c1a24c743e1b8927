use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::PathBuf;

use crate::config::AnalyzerConfig;
use crate::core::schema::SalesColumn;
use crate::error::{AnalysisError, AnalysisResult};
use crate::logging::{Logging, StageLogger};
use crate::preprocessing::pipeline::{PipelineOutcome, SalesPipeline};

/// Headline figures for a cleaned sales table.
///
/// A field is `None` when its reduction could not be computed, for example
/// because the column it needs is missing from the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesInsights {
    pub peak_daily_sales: Option<f64>,
    pub average_daily_sales: Option<f64>,
    pub most_frequent_item: Option<String>,
    pub average_transactions_per_day: Option<f64>,
}

fn numeric_column(df: &DataFrame, column: SalesColumn) -> AnalysisResult<Float64Chunked> {
    let values = df
        .column(column.as_str())
        .map_err(|_| AnalysisError::ColumnUnavailable(column.as_str().to_string()))?
        .cast(&DataType::Float64)?;
    Ok(values.f64()?.clone())
}

/// Highest `Total Sales (USD)` value across all days.
pub fn peak_daily_sales(df: &DataFrame) -> AnalysisResult<f64> {
    numeric_column(df, SalesColumn::TotalSales)?
        .max()
        .ok_or_else(|| AnalysisError::NoRows(SalesColumn::TotalSales.as_str().to_string()))
}

/// Mean of `Total Sales (USD)`.
pub fn average_daily_sales(df: &DataFrame) -> AnalysisResult<f64> {
    numeric_column(df, SalesColumn::TotalSales)?
        .mean()
        .ok_or_else(|| AnalysisError::NoRows(SalesColumn::TotalSales.as_str().to_string()))
}

/// Mean of `Number of Transactions`.
pub fn average_transactions_per_day(df: &DataFrame) -> AnalysisResult<f64> {
    numeric_column(df, SalesColumn::NumberOfTransactions)?
        .mean()
        .ok_or_else(|| {
            AnalysisError::NoRows(SalesColumn::NumberOfTransactions.as_str().to_string())
        })
}

/// Most common `Best-Selling Item`.
///
/// When several items share the highest count, the one that appears first
/// in row order wins. Missing items are not counted.
pub fn most_frequent_item(df: &DataFrame) -> AnalysisResult<String> {
    let name = SalesColumn::BestSellingItem.as_str();
    let items = df
        .column(name)
        .map_err(|_| AnalysisError::ColumnUnavailable(name.to_string()))?
        .cast(&DataType::String)?;
    let items = DataFrame::new(vec![items])?.drop_nulls::<String>(None)?;

    // groups keep the order of first appearance
    let grouped = items.group_by_stable([name])?;
    let sizes = grouped.get_groups().group_count();

    let mut best: Option<(usize, IdxSize)> = None;
    for (idx, size) in sizes.into_iter().enumerate() {
        let size = size.unwrap_or(0);
        if best.map_or(true, |(_, top)| size > top) {
            best = Some((idx, size));
        }
    }

    let keys = grouped.keys();
    best.and_then(|(idx, _)| keys.first()?.str().ok()?.get(idx).map(str::to_string))
        .ok_or_else(|| AnalysisError::NoRows(name.to_string()))
}

/// Runs the sales pipeline and reports the headline figures.
///
/// # Examples
///
/// ```no_run
/// use sales_insights::algorithms::SalesAnalyzer;
/// use sales_insights::logging::Logging;
///
/// let logging = Logging::disabled();
/// let mut analyzer = SalesAnalyzer::new("data/sales_data.csv", &logging);
/// analyzer.get_sales_df();
/// let insights = analyzer.calculate_insights().unwrap();
/// println!("{:?}", insights.average_daily_sales);
/// ```
pub struct SalesAnalyzer {
    pipeline: SalesPipeline,
    log: StageLogger,
}

impl SalesAnalyzer {
    pub fn new(file_path: impl Into<PathBuf>, logging: &Logging) -> Self {
        Self {
            pipeline: SalesPipeline::new(file_path, logging),
            log: logging.logger("sales_analyzer"),
        }
    }

    pub fn from_config(config: &AnalyzerConfig, logging: &Logging) -> Self {
        Self {
            pipeline: SalesPipeline::new(&config.input.path, logging)
                .with_preview_rows(config.input.preview_rows),
            log: logging.logger("sales_analyzer"),
        }
    }

    /// Read, validate and clean the sales file.
    pub fn get_sales_df(&mut self) -> PipelineOutcome {
        self.pipeline.run()
    }

    pub fn pipeline(&self) -> &SalesPipeline {
        &self.pipeline
    }

    /// Compute and log every headline figure.
    ///
    /// Fails only when there is no cleaned table; a figure that cannot be
    /// computed is logged as a warning and left out of the result.
    pub fn calculate_insights(&self) -> AnalysisResult<SalesInsights> {
        let df = match self.pipeline.cleaned_dataframe() {
            Ok(df) => df,
            Err(err) => {
                self.log.error(&err);
                return Err(err);
            }
        };

        Ok(SalesInsights {
            peak_daily_sales: self.report(
                "The highest total sales of the day",
                peak_daily_sales(df),
            ),
            average_daily_sales: self.report(
                "The average sales per day is",
                average_daily_sales(df),
            ),
            most_frequent_item: self.report(
                "The most frequently sold item is",
                most_frequent_item(df),
            ),
            average_transactions_per_day: self.report(
                "Average transactions per day is",
                average_transactions_per_day(df),
            ),
        })
    }

    fn report<T: Display>(&self, label: &str, result: AnalysisResult<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.log.info(format!("{label}: {value}"));
                Some(value)
            }
            Err(err) => {
                self.log.warn(format!("{label}: unavailable ({err})"));
                None
            }
        }
    }
}
