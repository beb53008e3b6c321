//! CSV loading
//!
//! Reads the expense file into `Transaction`s: locates the `Date`, `Category`
//! and `Amount` columns by header name, parses each row and derives its month.
//! Any bad row aborts the load; there is no partial result.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{InsightError, InsightResult};
use crate::models::{Money, Transaction};

/// Header names of the required columns
pub const DATE_HEADER: &str = "Date";
pub const CATEGORY_HEADER: &str = "Category";
pub const AMOUNT_HEADER: &str = "Amount";

/// Date formats tried after the configured primary format
const FALLBACK_DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%m-%d-%Y", "%d-%m-%Y",
];

/// Date-time formats whose date part is kept
const FALLBACK_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Column positions of the required fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Index of the date column
    pub date_column: usize,
    /// Index of the category column
    pub category_column: usize,
    /// Index of the amount column
    pub amount_column: usize,
}

impl ColumnMapping {
    /// Detect column positions from the header record
    ///
    /// Header names match case-insensitively after trimming; extra columns
    /// are ignored.
    pub fn from_headers(headers: &StringRecord) -> InsightResult<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or(InsightError::MissingColumn(name))
        };

        Ok(Self {
            date_column: find(DATE_HEADER)?,
            category_column: find(CATEGORY_HEADER)?,
            amount_column: find(AMOUNT_HEADER)?,
        })
    }
}

/// Loads transactions from delimited text
#[derive(Debug, Clone)]
pub struct Loader {
    date_format: String,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Loader {
    /// Create a loader with the default date format
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary date format
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Load all transactions from a file
    pub fn load_path(&self, path: &Path) -> InsightResult<Vec<Transaction>> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => InsightError::SourceNotFound(path.to_path_buf()),
            _ => InsightError::Io(format!("Failed to open {}: {}", path.display(), e)),
        })?;

        let transactions = self.load_reader(file)?;
        debug!(
            path = %path.display(),
            count = transactions.len(),
            "loaded transactions"
        );
        Ok(transactions)
    }

    /// Load all transactions from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> InsightResult<Vec<Transaction>> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mapping = ColumnMapping::from_headers(&headers)?;
        debug!(?mapping, "detected columns");

        let mut transactions = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // Rows are numbered from 1, the header excluded
            let row = idx + 1;
            transactions.push(self.parse_record(&record, row, &mapping)?);
        }

        Ok(transactions)
    }

    /// Parse a single CSV record
    fn parse_record(
        &self,
        record: &StringRecord,
        row: usize,
        mapping: &ColumnMapping,
    ) -> InsightResult<Transaction> {
        let field = |col: usize, name: &str| {
            record
                .get(col)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| InsightError::malformed(row, format!("Missing {} value", name)))
        };

        let date_str = field(mapping.date_column, DATE_HEADER)?;
        let date = self.parse_date(date_str).ok_or_else(|| {
            InsightError::malformed(row, format!("Could not parse date: '{}'", date_str))
        })?;

        let category = field(mapping.category_column, CATEGORY_HEADER)?;

        let amount_str = field(mapping.amount_column, AMOUNT_HEADER)?;
        let amount =
            Money::parse(amount_str).map_err(|e| InsightError::malformed(row, e.to_string()))?;

        Ok(Transaction::new(date, category, amount))
    }

    /// Parse a date string using multiple format attempts
    fn parse_date(&self, s: &str) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(s, &self.date_format) {
            return Some(date);
        }

        for format in FALLBACK_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Some(date);
            }
        }

        for format in FALLBACK_DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
                return Some(datetime.date());
            }
        }

        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|datetime| datetime.date_naive())
    }
}
