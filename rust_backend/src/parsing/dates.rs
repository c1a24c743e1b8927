use chrono::{NaiveDate, NaiveDateTime};

/// Date-only layouts, day before month wherever the order is ambiguous.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Date plus time of day; only the date is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

/// Calendar-date parser for the `Date` column.
///
/// `03/04/2024` is the 3rd of April. Year-first layouts such as ISO
/// `2024-03-04` are unambiguous and read as written.
pub struct DateParser;

impl DateParser {
    pub fn parse(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        if let Some(date) = parse_compact(value) {
            return Some(date);
        }

        DATE_FORMATS
            .iter()
            .filter_map(|fmt| {
                NaiveDate::parse_from_str(value, fmt)
                    .ok()
                    .filter(|date| plausible_year(fmt, *date))
            })
            .next()
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                    .map(|dt| dt.date())
            })
    }

    pub fn parse_batch<'a, I>(values: I) -> Vec<Option<NaiveDate>>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        values
            .into_iter()
            .map(|v| v.and_then(Self::parse))
            .collect()
    }
}

/// `YYYYMMDD` written without separators.
fn parse_compact(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse().ok()?;
    let month = value[4..6].parse().ok()?;
    let day = value[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

// `%Y` happily reads "24" as the year 24; leave two-digit years to `%y`.
fn plausible_year(fmt: &str, date: NaiveDate) -> bool {
    !fmt.contains("%Y") || chrono::Datelike::year(&date) >= 1000
}
