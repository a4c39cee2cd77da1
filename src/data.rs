//! Session-record ingestion for charging-report exports
//!
//! Loads delimited text (semicolon first, comma as fallback) into a polars
//! DataFrame with the seven canonical columns, then normalizes timestamps and
//! energy values into typed [`SessionRecord`] rows.

use crate::config::TimestampPolicy;
use crate::error::{ForecastError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

/// Canonical column names, in the order the export writes them
pub const CANONICAL_COLUMNS: [&str; 7] = [
    "location",
    "user_id",
    "session_id",
    "plugin_time",
    "plugout_time",
    "connection_time",
    "energy_session",
];

/// The canonical header as the export writes it, semicolon-joined
pub const CANONICAL_HEADER: &str =
    "location;user_id;session_id;plugin_time;plugout_time;connection_time;energy_session";

const COL_LOCATION: &str = "location";
const COL_USER_ID: &str = "user_id";
const COL_SESSION_ID: &str = "session_id";
const COL_PLUGIN_TIME: &str = "plugin_time";
const COL_PLUGOUT_TIME: &str = "plugout_time";
const COL_CONNECTION_TIME: &str = "connection_time";
const COL_ENERGY_SESSION: &str = "energy_session";

/// Timestamp formats accepted by the normalizer, tried in order
const TIMESTAMP_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M",
];

/// One charging event with parsed timestamps and coerced energy
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub location: String,
    pub user_id: String,
    pub session_id: String,
    pub plugin_time: NaiveDateTime,
    pub plugout_time: NaiveDateTime,
    pub connection_time: String,
    /// Energy delivered in kWh; `None` when the cell could not be coerced
    pub energy_session: Option<f64>,
}

/// Loader for charging-report exports
#[derive(Debug)]
pub struct SessionLoader;

/// A loaded table with the canonical seven columns, all cells kept as text
/// until [`SessionTable::normalize`] runs
#[derive(Debug, Clone)]
pub struct SessionTable {
    df: DataFrame,
}

impl SessionLoader {
    /// Load session records from a delimited-text file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<SessionTable> {
        let bytes = std::fs::read(&path).map_err(|e| {
            ForecastError::DataUnavailable(format!(
                "failed to read '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Load session records from an upload buffer
    pub fn from_bytes(bytes: &[u8]) -> Result<SessionTable> {
        let text = std::str::from_utf8(bytes).map_err(|_| {
            ForecastError::DataUnavailable("uploaded data is not valid UTF-8".to_string())
        })?;
        Self::from_text(text)
    }

    /// Load session records from already-decoded text
    pub fn from_text(text: &str) -> Result<SessionTable> {
        let text = text.trim_start_matches('\u{feff}');
        if text.trim().is_empty() {
            return Err(ForecastError::DataUnavailable("input is empty".to_string()));
        }

        let (first_line, rest) = match text.split_once('\n') {
            Some((first, rest)) => (first, rest),
            None => (text, ""),
        };
        let first_line = first_line.trim_end_matches('\r').trim();

        // Known malformed-export artifact: the first row is the full
        // semicolon-joined header, sometimes quoted as a single field. Drop
        // that row and force-assign the canonical names positionally.
        if first_line.trim_matches('"') == CANONICAL_HEADER {
            if rest.trim().is_empty() {
                return Err(ForecastError::DataUnavailable(
                    "no session rows after header".to_string(),
                ));
            }
            let mut df = read_frame(rest, b';', false).map_err(|e| {
                ForecastError::DataUnavailable(format!("could not parse session rows: {e}"))
            })?;
            if df.width() != CANONICAL_COLUMNS.len() {
                return Err(ForecastError::SchemaMismatch(format!(
                    "expected {} columns, found {}",
                    CANONICAL_COLUMNS.len(),
                    df.width()
                )));
            }
            df.set_column_names(&CANONICAL_COLUMNS)?;
            debug!(rows = df.height(), "recovered semicolon export with forced header");
            return Ok(SessionTable { df });
        }

        // Semicolon-delimited parsing first, comma as fallback
        if let Ok(df) = read_frame(text, b';', true) {
            if let Ok(table) = reconcile(df) {
                debug!(rows = table.len(), delimiter = ";", "loaded session table");
                return Ok(table);
            }
        }

        let df = read_frame(text, b',', true).map_err(|e| {
            ForecastError::DataUnavailable(format!("could not parse input as delimited text: {e}"))
        })?;
        match reconcile(df) {
            Ok(table) => {
                debug!(rows = table.len(), delimiter = ",", "loaded session table");
                Ok(table)
            }
            Err(found) => Err(ForecastError::SchemaMismatch(format!(
                "columns [{}] cannot be reconciled to the canonical [{}]",
                found.join(", "),
                CANONICAL_COLUMNS.join(", ")
            ))),
        }
    }
}

/// Read delimited text into an all-text DataFrame
fn read_frame(text: &str, delimiter: u8, has_header: bool) -> PolarsResult<DataFrame> {
    let cursor = Cursor::new(text.as_bytes().to_vec());
    CsvReader::new(cursor)
        .with_delimiter(delimiter)
        .has_header(has_header)
        // Zero inference rows keeps every column Utf8 so coercion stays explicit
        .infer_schema(Some(0))
        .finish()
}

/// Normalize header names and accept the frame only when they match the
/// canonical seven in order. Normalization is idempotent.
fn reconcile(mut df: DataFrame) -> std::result::Result<SessionTable, Vec<String>> {
    let normalized: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim().to_lowercase())
        .collect();

    let canonical = normalized.len() == CANONICAL_COLUMNS.len()
        && normalized
            .iter()
            .zip(CANONICAL_COLUMNS.iter())
            .all(|(found, expected)| found == expected);

    if !canonical {
        return Err(normalized);
    }
    df.set_column_names(&normalized)
        .map_err(|_| normalized.clone())?;
    Ok(SessionTable { df })
}

impl SessionTable {
    /// Get the underlying DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Parse timestamps and coerce energy into typed session records
    ///
    /// Energy cells that cannot be coerced become `None` and stay in the
    /// record set; the aggregator ignores them. Timestamp failures follow the
    /// configured policy: `Strict` fails the batch, `SkipInvalid` drops the
    /// row.
    pub fn normalize(&self, policy: TimestampPolicy) -> Result<Vec<SessionRecord>> {
        let location = self.df.column(COL_LOCATION)?.utf8()?;
        let user_id = self.df.column(COL_USER_ID)?.utf8()?;
        let session_id = self.df.column(COL_SESSION_ID)?.utf8()?;
        let plugin = self.df.column(COL_PLUGIN_TIME)?.utf8()?;
        let plugout = self.df.column(COL_PLUGOUT_TIME)?.utf8()?;
        let connection = self.df.column(COL_CONNECTION_TIME)?.utf8()?;
        let energy = self.df.column(COL_ENERGY_SESSION)?.utf8()?;

        let mut records = Vec::with_capacity(self.df.height());
        let mut skipped = 0usize;

        for row in 0..self.df.height() {
            let plugin_time = match timestamp_cell(plugin.get(row), COL_PLUGIN_TIME, row, policy)? {
                Some(ts) => ts,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            let plugout_time =
                match timestamp_cell(plugout.get(row), COL_PLUGOUT_TIME, row, policy)? {
                    Some(ts) => ts,
                    None => {
                        skipped += 1;
                        continue;
                    }
                };

            records.push(SessionRecord {
                location: location.get(row).unwrap_or_default().to_string(),
                user_id: user_id.get(row).unwrap_or_default().to_string(),
                session_id: session_id.get(row).unwrap_or_default().to_string(),
                plugin_time,
                plugout_time,
                connection_time: connection.get(row).unwrap_or_default().to_string(),
                energy_session: coerce_energy(energy.get(row)),
            });
        }

        if skipped > 0 {
            warn!(skipped, "dropped rows with unparseable timestamps");
        }

        Ok(records)
    }
}

fn timestamp_cell(
    raw: Option<&str>,
    column: &str,
    row: usize,
    policy: TimestampPolicy,
) -> Result<Option<NaiveDateTime>> {
    let value = raw.unwrap_or("");
    match parse_timestamp(value) {
        Some(ts) => Ok(Some(ts)),
        None => match policy {
            TimestampPolicy::Strict => Err(ForecastError::UnparseableTimestamp {
                column: column.to_string(),
                row,
                value: value.to_string(),
            }),
            TimestampPolicy::SkipInvalid => Ok(None),
        },
    }
}

/// Parse a timestamp cell through the accepted format list
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Coerce an energy cell to kWh; anything unparseable becomes missing
pub fn coerce_energy(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = value.parse::<f64>() {
        return parsed.is_finite().then_some(parsed);
    }
    // Decimal-comma numerics are common in semicolon-delimited exports
    if value.matches(',').count() == 1 && !value.contains('.') {
        let parsed = value.replace(',', ".").parse::<f64>().ok()?;
        return parsed.is_finite().then_some(parsed);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-01-05 10:30:00")]
    #[case("2024-01-05 10:30")]
    #[case("2024-01-05T10:30:00")]
    #[case("05.01.2024 10:30:00")]
    #[case("05.01.2024 10:30")]
    #[case("05/01/2024 10:30")]
    fn accepted_timestamp_formats(#[case] value: &str) {
        let ts = parse_timestamp(value).unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn bare_dates_parse_to_midnight() {
        let ts = parse_timestamp("2024-01-05").unwrap();
        assert_eq!(ts.to_string(), "2024-01-05 00:00:00");
    }

    #[rstest]
    #[case("not a date")]
    #[case("")]
    #[case("2024-13-40 99:99")]
    fn rejected_timestamps(#[case] value: &str) {
        assert!(parse_timestamp(value).is_none());
    }

    #[rstest]
    #[case(Some("12.5"), Some(12.5))]
    #[case(Some(" 7 "), Some(7.0))]
    #[case(Some("12,5"), Some(12.5))]
    #[case(Some("n/a"), None)]
    #[case(Some(""), None)]
    #[case(Some("NaN"), None)]
    #[case(None, None)]
    fn energy_coercion(#[case] raw: Option<&str>, #[case] expected: Option<f64>) {
        assert_eq!(coerce_energy(raw), expected);
    }
}
