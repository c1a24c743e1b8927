//! Expected layout of a daily sales file.

use std::fmt;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// One of the five columns a sales file is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SalesColumn {
    Date,
    TotalSales,
    NumberOfTransactions,
    AvgSalePerTransaction,
    BestSellingItem,
}

/// The expected schema, in file order.
pub const EXPECTED_COLUMNS: [SalesColumn; 5] = [
    SalesColumn::Date,
    SalesColumn::TotalSales,
    SalesColumn::NumberOfTransactions,
    SalesColumn::AvgSalePerTransaction,
    SalesColumn::BestSellingItem,
];

impl SalesColumn {
    /// Header text as it appears in the file.
    pub fn as_str(&self) -> &'static str {
        match self {
            SalesColumn::Date => "Date",
            SalesColumn::TotalSales => "Total Sales (USD)",
            SalesColumn::NumberOfTransactions => "Number of Transactions",
            SalesColumn::AvgSalePerTransaction => "Avg Sale per Transaction (USD)",
            SalesColumn::BestSellingItem => "Best-Selling Item",
        }
    }

    pub fn from_header(header: &str) -> Option<Self> {
        EXPECTED_COLUMNS.into_iter().find(|c| c.as_str() == header)
    }
}

impl fmt::Display for SalesColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected columns absent from a loaded table.
///
/// Computed once by the validator and consulted by the cleaner to skip
/// steps whose column is not there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingColumns(Vec<SalesColumn>);

impl MissingColumns {
    /// Every expected column, used when there is no table at all.
    pub fn all() -> Self {
        Self(EXPECTED_COLUMNS.to_vec())
    }

    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// Expected columns not found among the frame's headers, in schema order.
    pub fn of(df: &DataFrame) -> Self {
        let names = df.get_column_names();
        Self(
            EXPECTED_COLUMNS
                .into_iter()
                .filter(|c| !names.iter().any(|n| n.as_str() == c.as_str()))
                .collect(),
        )
    }

    pub fn contains(&self, column: SalesColumn) -> bool {
        self.0.contains(&column)
    }

    pub fn is_present(&self, column: SalesColumn) -> bool {
        !self.contains(column)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = SalesColumn> + '_ {
        self.0.iter().copied()
    }

    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|c| c.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_header_round_trip() {
        for column in EXPECTED_COLUMNS {
            assert_eq!(SalesColumn::from_header(column.as_str()), Some(column));
        }
        assert_eq!(SalesColumn::from_header("Region"), None);
    }

    #[test]
    fn test_missing_columns_of_partial_frame() {
        let df = df!(
            "Date" => ["01/01/2024"],
            "Total Sales (USD)" => [120.0],
            "Region" => ["North"],
        )
        .unwrap();

        let missing = MissingColumns::of(&df);
        assert_eq!(missing.len(), 3);
        assert!(missing.contains(SalesColumn::NumberOfTransactions));
        assert!(missing.contains(SalesColumn::AvgSalePerTransaction));
        assert!(missing.contains(SalesColumn::BestSellingItem));
        assert!(missing.is_present(SalesColumn::Date));
        assert_eq!(
            missing.names(),
            vec![
                "Number of Transactions",
                "Avg Sale per Transaction (USD)",
                "Best-Selling Item"
            ]
        );
    }

    #[test]
    fn test_missing_columns_of_empty_frame_is_everything() {
        assert_eq!(MissingColumns::of(&DataFrame::empty()), MissingColumns::all());
    }
}
