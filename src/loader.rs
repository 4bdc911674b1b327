// CSV Loader - transaction log → Vec<SaleRecord>
//
// Expected format (header row required, case-sensitive):
//   Date,Product,Category,Amount,Region
//   2024-03-01,Laptop,Electronics,1000.00,North
//
// Every row is validated into a SaleRecord. The first bad row aborts the
// whole load; callers never see a partial result.

use crate::error::{AnalyticsError, Result};
use crate::record::SaleRecord;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Columns that must appear in the header row. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Date", "Product", "Category", "Amount", "Region"];

const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// RAW ROW
// ============================================================================

/// Row exactly as it appears in the file, before any field is interpreted
#[derive(Debug, Deserialize)]
struct RawSaleRow {
    #[serde(rename = "Date")]
    date: String,

    #[serde(rename = "Product")]
    product: String,

    #[serde(rename = "Category")]
    category: String,

    #[serde(rename = "Amount")]
    amount: String,

    #[serde(rename = "Region")]
    region: String,
}

impl RawSaleRow {
    fn into_record(self, line: u64) -> Result<SaleRecord> {
        let date = parse_iso_date(&self.date).ok_or_else(|| AnalyticsError::Parse {
            line,
            message: format!("invalid date '{}': expected YYYY-MM-DD", self.date),
        })?;

        let amount = self.amount.trim().parse::<f64>().map_err(|e| AnalyticsError::Parse {
            line,
            message: format!("invalid amount '{}': {}", self.amount, e),
        })?;

        Ok(SaleRecord {
            date,
            product: self.product,
            category: self.category,
            amount,
            region: self.region,
        })
    }
}

/// Exactly `YYYY-MM-DD`: zero-padded month and day, no sign
fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Load every record from the CSV file at `path`, in file order
///
/// # Errors
/// * `NotFound` - `path` does not exist
/// * `MissingColumn` - the header lacks one of `REQUIRED_COLUMNS`
/// * `Parse` - a row has a malformed date/amount or the wrong field count
pub fn load_sales_csv(path: &Path) -> Result<Vec<SaleRecord>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AnalyticsError::NotFound {
            path: path.to_path_buf(),
        },
        _ => AnalyticsError::Io(e),
    })?;

    let records = read_sales(file)?;
    debug!(path = %path.display(), count = records.len(), "parsed sales csv");

    Ok(records)
}

/// Parse sales records from any reader holding CSV text
pub fn read_sales<R: Read>(reader: R) -> Result<Vec<SaleRecord>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    verify_required_columns(&headers)?;

    let mut records = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        // +2 because: 1-indexed + header row
        let fallback_line = index as u64 + 2;

        let row = result.map_err(|e| AnalyticsError::Parse {
            line: e.position().map(|p| p.line()).unwrap_or(fallback_line),
            message: e.to_string(),
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(fallback_line);

        let raw: RawSaleRow = row
            .deserialize(Some(&headers))
            .map_err(|e| AnalyticsError::Parse {
                line,
                message: e.to_string(),
            })?;

        records.push(raw.into_record(line)?);
    }

    Ok(records)
}

fn verify_required_columns(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AnalyticsError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
