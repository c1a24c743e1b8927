use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::core::domain::LoadedTable;
use crate::error::{LoadError, LoadResult};
use crate::logging::{Logging, StageLogger};

/// Rows shown by the console preview unless configured otherwise.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Reads a delimited sales file into a [`LoadedTable`].
///
/// The first row is taken as headers. No rows are filtered and no values are
/// coerced beyond the reader's own type inference; dates stay as text.
pub struct SalesLoader {
    log: StageLogger,
    preview_rows: usize,
}

impl SalesLoader {
    pub fn new(logging: &Logging) -> Self {
        Self {
            log: logging.logger("loader"),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Load a sales table from a file on disk.
    ///
    /// Failures are logged at ERROR and returned; they never panic. On
    /// success a preview of the first rows is printed to stdout.
    pub fn load(&self, path: &Path) -> LoadResult<LoadedTable> {
        match Self::read_table(path) {
            Ok(table) => {
                println!("{}", Self::preview(&table.dataframe, self.preview_rows));
                self.log.info(format!(
                    "Loaded {} rows and {} columns from {}",
                    table.initial_row_count,
                    table.dataframe.width(),
                    path.display()
                ));
                Ok(table)
            }
            Err(err) => {
                self.log.error(&err);
                Err(err)
            }
        }
    }

    /// Load a sales table from CSV text already in memory.
    pub fn load_from_str(&self, csv: &str) -> LoadResult<LoadedTable> {
        let source = PathBuf::from("<memory>");
        let df = parse_csv_bytes(csv.as_bytes().to_vec(), &source).inspect_err(|err| {
            self.log.error(err);
        })?;
        Ok(LoadedTable::new(df, source))
    }

    /// The first `rows` rows of a frame.
    pub fn preview(df: &DataFrame, rows: usize) -> DataFrame {
        df.head(Some(rows))
    }

    fn read_table(path: &Path) -> LoadResult<LoadedTable> {
        // The handle is closed inside `fs::read`, before any parsing.
        let bytes = std::fs::read(path).map_err(|e| LoadError::from_io(path, e))?;
        let df = parse_csv_bytes(bytes, path)?;
        Ok(LoadedTable::new(df, path))
    }
}

/// Cell contents read as missing, on top of empty cells.
pub const NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse CSV bytes with a header row.
///
/// Column types are inferred from every row. Input with no content at all
/// becomes a frame with no columns and no rows, which validation reports
/// as empty.
fn parse_csv_bytes(bytes: Vec<u8>, source: &Path) -> LoadResult<DataFrame> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(DataFrame::empty());
    }

    let markers: Vec<PlSmallStr> = NULL_MARKERS.iter().map(|m| PlSmallStr::from(*m)).collect();

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|opts| opts.with_null_values(Some(NullValues::AllColumns(markers.clone()))))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|source_err| LoadError::Parse {
            path: source.to_path_buf(),
            source: source_err,
        })
}
