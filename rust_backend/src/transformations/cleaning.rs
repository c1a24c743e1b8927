use polars::prelude::*;

use crate::core::domain::{CleanedTable, LoadedTable};
use crate::core::schema::{MissingColumns, SalesColumn};
use crate::error::CleanError;
use crate::logging::{Logging, StageLogger};
use crate::parsing::dates::DateParser;

/// Number of rows that repeat an earlier row.
///
/// Two rows are the same when every column holds the same value, nulls
/// included. This is exactly the set of rows [`remove_duplicate_rows`] drops.
pub fn count_duplicate_rows(df: &DataFrame) -> PolarsResult<usize> {
    Ok(df.height() - remove_duplicate_rows(df)?.height())
}

/// Remove rows with a missing value in any column.
///
/// Floating point `NaN` counts as missing.
pub fn drop_missing_rows(df: &DataFrame) -> PolarsResult<DataFrame> {
    let complete = df.drop_nulls::<String>(None)?;

    let mut keep = BooleanChunked::full("keep".into(), true, complete.height());
    for column in complete.get_columns() {
        if column.dtype().is_float() {
            let values = column.cast(&DataType::Float64)?;
            keep = &keep & &(!values.f64()?.is_nan());
        }
    }

    complete.filter(&keep)
}

/// Remove duplicate rows, keeping the first occurrence in row order.
pub fn remove_duplicate_rows(df: &DataFrame) -> PolarsResult<DataFrame> {
    if df.width() == 0 {
        return Ok(df.clone());
    }
    df.unique_stable(None, UniqueKeepStrategy::First, None)
}

/// Keep only rows whose `column` value is strictly greater than zero.
///
/// Values are compared as numbers; anything that cannot be read as a number
/// fails the test and its row is removed.
pub fn filter_positive(df: &DataFrame, column: SalesColumn) -> PolarsResult<DataFrame> {
    let values = df.column(column.as_str())?.cast(&DataType::Float64)?;
    let mask = values.f64()?.gt(0.0);
    df.filter(&mask)
}

/// Outcome of converting the `Date` column.
#[derive(Debug)]
pub struct DateConversion {
    pub dataframe: DataFrame,
    /// Rows removed because their date could not be read
    pub unparseable: usize,
}

/// Convert the `Date` column from text to calendar dates, day first.
///
/// A column that is already of `Date` type is returned unchanged. Rows
/// whose date cannot be parsed are removed and counted.
pub fn parse_date_column(df: &DataFrame) -> PolarsResult<DateConversion> {
    let name = SalesColumn::Date.as_str();
    let column = df.column(name)?;

    if column.dtype() == &DataType::Date {
        return Ok(DateConversion {
            dataframe: df.clone(),
            unparseable: 0,
        });
    }

    let text = column.cast(&DataType::String)?;
    let parsed = DateParser::parse_batch(text.str()?.into_iter());
    let unparseable = parsed
        .iter()
        .zip(text.str()?.into_iter())
        .filter(|(date, raw)| date.is_none() && raw.is_some())
        .count();

    let dates = DateChunked::from_naive_date_options(column.name().clone(), parsed);
    let mut converted = df.clone();
    converted.with_column(dates.into_series())?;

    let dataframe = if unparseable > 0 {
        let mask = converted.column(name)?.is_not_null();
        converted.filter(&mask)?
    } else {
        converted
    };

    Ok(DateConversion {
        dataframe,
        unparseable,
    })
}

/// Applies the ordered cleaning steps to a loaded table.
pub struct DataCleaner {
    log: StageLogger,
}

impl DataCleaner {
    pub fn new(logging: &Logging) -> Self {
        Self {
            log: logging.logger("cleaner"),
        }
    }

    /// Produce the analysis table.
    ///
    /// Steps run in this order, each on the output of the one before:
    /// 1. drop rows with any missing value
    /// 2. drop duplicate rows, keeping the first
    /// 3. drop non-positive `Total Sales (USD)`, if that column exists
    /// 4. drop non-positive `Number of Transactions`, if that column exists
    /// 5. parse `Date` day-first, if that column exists
    ///
    /// Running `clean` on its own output changes nothing.
    pub fn clean(
        &self,
        table: &LoadedTable,
        missing: &MissingColumns,
    ) -> Result<CleanedTable, CleanError> {
        let df = self
            .clean_frame(&table.dataframe, missing)
            .inspect_err(|err| self.log.error(err))?;

        if df.height() != table.initial_row_count {
            self.log
                .info(format!("Row count post data cleaning is: {}", df.height()));
        }

        Ok(CleanedTable {
            dataframe: df,
            initial_row_count: table.initial_row_count,
        })
    }

    /// The cleaning steps on a bare frame, without row-count reporting.
    pub fn clean_frame(
        &self,
        df: &DataFrame,
        missing: &MissingColumns,
    ) -> Result<DataFrame, CleanError> {
        let mut df = drop_missing_rows(df).map_err(CleanError::step("drop_missing_rows"))?;
        df = remove_duplicate_rows(&df).map_err(CleanError::step("remove_duplicate_rows"))?;

        for column in [SalesColumn::TotalSales, SalesColumn::NumberOfTransactions] {
            if missing.is_present(column) {
                df = filter_positive(&df, column).map_err(CleanError::step("filter_positive"))?;
            }
        }

        if missing.is_present(SalesColumn::Date) {
            let conversion =
                parse_date_column(&df).map_err(CleanError::step("parse_date_column"))?;
            if conversion.unparseable > 0 {
                self.log.warn(format!(
                    "{} rows have unparseable dates and were removed",
                    conversion.unparseable
                ));
            }
            df = conversion.dataframe;
        }

        Ok(df)
    }
}
