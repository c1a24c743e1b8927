//! End-to-end runs of the sales pipeline over files on disk.
//!
//! Each test writes a small CSV to a temporary directory, runs the
//! loader, validator and cleaner through [`SalesPipeline`] or
//! [`SalesAnalyzer`], and checks both the resulting table and what was
//! logged.

use chrono::NaiveDate;
use polars::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use sales_insights::core::schema::SalesColumn;
use sales_insights::error::{AnalysisError, LoadError};
use sales_insights::logging::{Logging, MemorySink};
use sales_insights::preprocessing::validator::ValidationFinding;
use sales_insights::{AnalyzerConfig, PipelineOutcome, SalesAnalyzer, SalesPipeline};

const HEADER: &str = "Date,Total Sales (USD),Number of Transactions,Avg Sale per Transaction (USD),Best-Selling Item";

// ==================== Helper Functions ====================

fn write_sales(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn captured_logging() -> (Logging, MemorySink) {
    let sink = MemorySink::new();
    let logging = Logging::with_writer("info", sink.clone()).unwrap();
    (logging, sink)
}

fn date_at(df: &DataFrame, idx: usize) -> Option<NaiveDate> {
    let dates = df.column("Date").unwrap().cast(&DataType::String).unwrap();
    dates
        .str()
        .unwrap()
        .get(idx)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

// ==================== Scenarios ====================

#[test]
fn test_duplicates_and_negative_sales_are_removed() {
    let dir = TempDir::new().unwrap();
    let path = write_sales(
        &dir,
        "sales.csv",
        &format!(
            "{HEADER}\n\
             01/03/2024,120.0,6,20.0,Coffee\n\
             02/03/2024,80.0,4,20.0,Tea\n\
             02/03/2024,80.0,4,20.0,Tea\n\
             03/03/2024,-10,2,-5.0,Cake\n\
             04/03/2024,200.0,8,25.0,Coffee\n"
        ),
    );

    let (logging, sink) = captured_logging();
    let mut pipeline = SalesPipeline::new(&path, &logging);
    let outcome = pipeline.run();

    match outcome {
        PipelineOutcome::Cleaned {
            validation,
            initial_rows,
            cleaned_rows,
        } => {
            assert_eq!(initial_rows, 5);
            assert_eq!(cleaned_rows, 3);
            assert_eq!(validation.findings, vec![ValidationFinding::DuplicateRows(1)]);
        }
        other => panic!("expected a cleaned table, got {:?}", other),
    }

    let df = pipeline.cleaned_dataframe().unwrap();
    assert_eq!(df.height(), 3);
    let sales = df
        .column(SalesColumn::TotalSales.as_str())
        .unwrap()
        .f64()
        .unwrap()
        .clone();
    assert!(sales.into_iter().flatten().all(|v| v > 0.0));

    assert_eq!(
        sink.lines_matching("WARN", "There are 1 duplicate rows").len(),
        1
    );
    assert_eq!(
        sink.lines_matching("INFO", "Row count post data cleaning is: 3")
            .len(),
        1
    );
}

#[test]
fn test_missing_item_column_degrades_gracefully() {
    let dir = TempDir::new().unwrap();
    let path = write_sales(
        &dir,
        "no_items.csv",
        "Date,Total Sales (USD),Number of Transactions,Avg Sale per Transaction (USD)\n\
         01/03/2024,120.0,6,20.0\n\
         02/03/2024,0.0,4,0.0\n\
         03/03/2024,90.0,3,30.0\n",
    );

    let (logging, sink) = captured_logging();
    let mut analyzer = SalesAnalyzer::new(&path, &logging);
    let outcome = analyzer.get_sales_df();

    let validation = outcome.validation().unwrap();
    assert!(validation
        .missing_columns
        .contains(SalesColumn::BestSellingItem));
    assert_eq!(
        validation.findings,
        vec![ValidationFinding::MissingColumns(vec![
            "Best-Selling Item".to_string()
        ])]
    );

    // the zero-sales row still goes
    let df = analyzer.pipeline().cleaned_dataframe().unwrap();
    assert_eq!(df.height(), 2);
    assert_eq!(df.column("Date").unwrap().dtype(), &DataType::Date);

    let insights = analyzer.calculate_insights().unwrap();
    assert_eq!(insights.most_frequent_item, None);
    assert_eq!(insights.peak_daily_sales, Some(120.0));
    assert!(matches!(
        sales_insights::algorithms::most_frequent_item(df),
        Err(AnalysisError::ColumnUnavailable(name)) if name == "Best-Selling Item"
    ));
    assert_eq!(
        sink.lines_matching("WARN", "The most frequently sold item is: unavailable")
            .len(),
        1
    );
}

#[test]
fn test_missing_file_stops_after_loading() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.csv");

    let (logging, sink) = captured_logging();
    let mut analyzer = SalesAnalyzer::new(&path, &logging);
    let outcome = analyzer.get_sales_df();

    assert!(matches!(
        outcome,
        PipelineOutcome::LoadFailed(LoadError::NotFound(ref p)) if *p == path
    ));
    assert_eq!(analyzer.pipeline().state().as_str(), "unloaded");
    assert!(matches!(
        analyzer.calculate_insights(),
        Err(AnalysisError::NoData)
    ));

    assert_eq!(sink.lines_matching("ERROR", "File not found").len(), 1);
    let out = sink.contents();
    assert!(!out.contains("logger=\"validator\""));
    assert!(!out.contains("logger=\"cleaner\""));
}

#[test]
fn test_dates_are_read_day_first() {
    let dir = TempDir::new().unwrap();
    let path = write_sales(
        &dir,
        "dates.csv",
        &format!(
            "{HEADER}\n\
             03/04/2024,50.0,2,25.0,Tea\n\
             25/12/2024,75.0,3,25.0,Cake\n"
        ),
    );

    let mut pipeline = SalesPipeline::new(&path, &Logging::disabled());
    assert!(pipeline.run().is_cleaned());

    let df = pipeline.cleaned_dataframe().unwrap();
    assert_eq!(date_at(df, 0), NaiveDate::from_ymd_opt(2024, 4, 3));
    assert_eq!(date_at(df, 1), NaiveDate::from_ymd_opt(2024, 12, 25));
}

#[test]
fn test_header_only_file_cleans_to_zero_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_sales(&dir, "empty.csv", &format!("{HEADER}\n"));

    let (logging, sink) = captured_logging();
    let mut pipeline = SalesPipeline::new(&path, &logging);
    let outcome = pipeline.run();

    assert!(outcome.is_cleaned());
    assert!(outcome.is_empty_after_cleaning());
    assert_eq!(
        outcome.validation().unwrap().findings,
        vec![ValidationFinding::NoRows]
    );
    assert_eq!(pipeline.cleaned().unwrap().row_count(), 0);
    assert_eq!(sink.lines_matching("WARN", "DataFrame has no rows").len(), 1);
}

#[test]
fn test_zero_byte_file_is_reported_empty() {
    let dir = TempDir::new().unwrap();
    let path = write_sales(&dir, "blank.csv", "");

    let mut pipeline = SalesPipeline::new(&path, &Logging::disabled());
    let outcome = pipeline.run();

    let validation = outcome.validation().unwrap();
    assert_eq!(validation.findings, vec![ValidationFinding::EmptyTable]);
    assert_eq!(validation.missing_columns.len(), 5);
}

#[test]
fn test_analyzer_from_config_file() {
    let dir = TempDir::new().unwrap();
    write_sales(
        &dir,
        "sales.csv",
        &format!(
            "{HEADER}\n\
             01/03/2024,100.0,4,25.0,Coffee\n\
             02/03/2024,300.0,10,30.0,Tea\n\
             03/03/2024,200.0,7,28.57,Coffee\n"
        ),
    );
    let config_path = dir.path().join("sales_analyzer.toml");
    fs::write(
        &config_path,
        "[input]\npath = \"sales.csv\"\npreview_rows = 2\n\n[logging]\nconsole = false\n",
    )
    .unwrap();

    let config = AnalyzerConfig::from_file(&config_path).unwrap();
    let logging = Logging::from_config(&config.logging).unwrap();
    let mut analyzer = SalesAnalyzer::from_config(&config, &logging);
    assert!(analyzer.get_sales_df().is_cleaned());

    let insights = analyzer.calculate_insights().unwrap();
    assert_eq!(insights.peak_daily_sales, Some(300.0));
    assert_eq!(insights.average_daily_sales, Some(200.0));
    assert_eq!(insights.average_transactions_per_day, Some(7.0));
    assert_eq!(insights.most_frequent_item.as_deref(), Some("Coffee"));

    let log_file = dir.path().join("logs").join("sales_analyzer.log");
    let written = fs::read_to_string(log_file).unwrap();
    assert!(written.contains("The average sales per day is: 200"));
}

#[test]
fn test_late_bad_values_are_cleaned_not_fatal() {
    let dir = TempDir::new().unwrap();
    let mut csv = format!("{HEADER}\n");
    for i in 0..150 {
        let sales = match i {
            120 => "N/A".to_string(),
            140 => "unknown".to_string(),
            _ => format!("{}.0", 50 + i),
        };
        csv.push_str(&format!("02/01/2024,{sales},{},12.5,Tea\n", i + 1));
    }
    let path = write_sales(&dir, "long.csv", &csv);

    let mut analyzer = SalesAnalyzer::new(&path, &Logging::disabled());
    let outcome = analyzer.get_sales_df();

    match outcome {
        PipelineOutcome::Cleaned {
            initial_rows,
            cleaned_rows,
            ..
        } => {
            assert_eq!(initial_rows, 150);
            assert_eq!(cleaned_rows, 148);
        }
        other => panic!("expected a cleaned table, got {:?}", other),
    }

    let insights = analyzer.calculate_insights().unwrap();
    assert_eq!(insights.peak_daily_sales, Some(199.0));
}

#[test]
fn test_missing_value_markers_drop_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_sales(
        &dir,
        "markers.csv",
        &format!(
            "{HEADER}\n\
             01/03/2024,40.0,2,20.0,NA\n\
             02/03/2024,60.0,3,20.0,Latte\n\
             03/03/2024,80.0,4,20.0,N/A\n"
        ),
    );

    let mut pipeline = SalesPipeline::new(&path, &Logging::disabled());
    pipeline.run();

    let df = pipeline.cleaned_dataframe().unwrap();
    assert_eq!(df.height(), 1);
    let items = df.column("Best-Selling Item").unwrap();
    assert_eq!(items.str().unwrap().get(0), Some("Latte"));
}
