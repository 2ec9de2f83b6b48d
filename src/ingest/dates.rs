//! Spreadsheet date normalization.
//!
//! Workbook cells carry dates either as serial day numbers (days since the
//! 1899-12-30 spreadsheet epoch) or as preformatted strings. Normalization
//! runs exactly once per collection during ingestion; report builders only
//! ever see `Option<DateTime<Utc>>`.

use calamine::Data;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Days between the spreadsheet epoch (1899-12-30) and the Unix epoch.
const SERIAL_UNIX_OFFSET_DAYS: f64 = 25_569.0;

/// Convert a spreadsheet serial day number to a UTC timestamp.
///
/// Returns `None` for values that land outside chrono's representable range
/// (grossly corrupt cells).
pub fn from_serial(serial: f64) -> Option<DateTime<Utc>> {
    if !serial.is_finite() {
        return None;
    }
    let secs = (serial - SERIAL_UNIX_OFFSET_DAYS) * 86_400.0;
    Utc.timestamp_opt(secs as i64, 0).single()
}

/// Parse a date string in the handful of shapes the source produces:
/// RFC 3339 (what the original exporter wrote), a bare datetime, or a bare
/// date.
pub fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }
    None
}

/// Normalize a raw workbook cell to a timestamp.
///
/// Numeric cells are serial day numbers; string cells are parsed as-is.
/// Anything else (empty, error, boolean) means the row has no usable date.
pub fn parse_date_cell(cell: &Data) -> Option<DateTime<Utc>> {
    match cell {
        Data::Float(f) => from_serial(*f),
        Data::Int(i) => from_serial(*i as f64),
        Data::DateTime(dt) => from_serial(dt.as_f64()),
        Data::String(s) => parse_date_str(s),
        Data::DateTimeIso(s) => parse_date_str(s),
        _ => None,
    }
}
