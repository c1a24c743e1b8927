//! Sales analyzer binary
//!
//! Loads the configured sales file, validates and cleans it, and logs the
//! headline figures.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin sales-analyzer
//!
//! # With an explicit configuration file
//! SALES_ANALYZER_CONFIG=/etc/sales/analyzer.toml cargo run --bin sales-analyzer
//! ```
//!
//! # Configuration
//!
//! Without `SALES_ANALYZER_CONFIG`, `sales_analyzer.toml` is looked up in the
//! current directory, `rust_backend/`, and the parent directory. If none is
//! found, the input is `data/sales_data.csv` and logs go to stdout and
//! `logs/sales_analyzer.log`.

use sales_insights::{AnalyzerConfig, Logging, SalesAnalyzer};

fn main() -> anyhow::Result<()> {
    let config = AnalyzerConfig::resolve()?;
    let logging = Logging::from_config(&config.logging)?;
    let log = logging.logger("main");

    log.info(format!(
        "Starting sales analysis of {}",
        config.input.path.display()
    ));

    let mut analyzer = SalesAnalyzer::from_config(&config, &logging);
    let outcome = analyzer.get_sales_df();
    if !outcome.is_cleaned() {
        log.warn("No cleaned sales table was produced; skipping insights");
        return Ok(());
    }

    // Failures were already logged by the analyzer
    if let Ok(insights) = analyzer.calculate_insights() {
        log.info(format!("Summary: {}", serde_json::to_string(&insights)?));
    }

    Ok(())
}
