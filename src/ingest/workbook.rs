//! Workbook parsing: six named sheets into typed collections.
//!
//! Ingestion is best effort per collection — a missing or unreadable sheet
//! yields an empty `Vec`, never an error. Only a corrupt workbook container
//! fails the parse (and sends the caller down the fallback chain).
//!
//! All cell coercion lives here: `RowView` is the single place where a
//! loosely-typed cell becomes a typed value or a defined default.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::ingest::dates;
use crate::ingest::IngestError;
use crate::models::{Doctor, FinancialRecord, Patient, PerformanceRecord, QualityRecord, Visit};
use crate::store::HospitalData;

const SHEET_DOCTORS: &str = "hospital_doctors";
const SHEET_PATIENTS: &str = "hospital_patients";
const SHEET_VISITS: &str = "hospital_patient_visits";
const SHEET_FINANCIAL: &str = "hospital_financial_metrics";
const SHEET_QUALITY: &str = "hospital_quality_metrics";
const SHEET_PERFORMANCE: &str = "hospital_staff_performance";

/// Parse an `.xlsx`/`.xls` byte buffer into the six collections.
pub fn parse_workbook(bytes: &[u8]) -> Result<HospitalData, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| IngestError::Workbook(e.to_string()))?;

    let doctors = sheet_records(&mut workbook, SHEET_DOCTORS, doctor_from_row);
    let patients = sheet_records(&mut workbook, SHEET_PATIENTS, patient_from_row);
    let visits = sheet_records(&mut workbook, SHEET_VISITS, visit_from_row);
    let financial = sheet_records(&mut workbook, SHEET_FINANCIAL, financial_from_row);
    let quality = sheet_records(&mut workbook, SHEET_QUALITY, quality_from_row);
    let performance = sheet_records(&mut workbook, SHEET_PERFORMANCE, performance_from_row);

    Ok(HospitalData {
        doctors,
        patients,
        visits,
        financial,
        quality,
        performance,
    })
}

fn sheet_records<RS, T>(
    workbook: &mut calamine::Sheets<RS>,
    name: &str,
    from_row: impl Fn(&RowView<'_>) -> T,
) -> Vec<T>
where
    RS: std::io::Read + std::io::Seek,
{
    match workbook.worksheet_range(name) {
        Ok(range) => rows_of(&range, from_row),
        Err(e) => {
            tracing::warn!(sheet = name, "Sheet missing or unreadable: {e}");
            Vec::new()
        }
    }
}

/// Map every non-empty data row of a sheet through a row builder.
pub(crate) fn rows_of<T>(range: &Range<Data>, from_row: impl Fn(&RowView<'_>) -> T) -> Vec<T> {
    let mut rows = range.rows();
    let headers: HashMap<String, usize> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(i, c)| (c.to_string().trim().to_string(), i))
            .collect(),
        None => return Vec::new(),
    };

    rows.filter(|cells| cells.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|cells| from_row(&RowView { headers: &headers, cells }))
        .collect()
}

/// A single sheet row addressed by column header.
pub(crate) struct RowView<'a> {
    headers: &'a HashMap<String, usize>,
    cells: &'a [Data],
}

impl RowView<'_> {
    fn cell(&self, name: &str) -> Option<&Data> {
        self.headers
            .get(name)
            .and_then(|&i| self.cells.get(i))
            .filter(|c| !matches!(c, Data::Empty))
    }

    /// Non-empty trimmed string; numeric cells render without a trailing
    /// `.0` so spreadsheet-mangled id columns survive.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.cell(name)? {
            Data::String(s) => {
                let t = s.trim();
                (!t.is_empty()).then(|| t.to_string())
            }
            Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
            Data::Float(f) => Some(f.to_string()),
            Data::Int(i) => Some(i.to_string()),
            Data::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Numeric value; numeric-looking strings parse, everything else is
    /// `None` (callers substitute 0 for summation fields).
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.cell(name)? {
            Data::Float(f) => Some(*f),
            Data::Int(i) => Some(*i as f64),
            Data::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Boolean flag; accepts real booleans, 0/1 numerics, and the usual
    /// true/false spellings.
    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.cell(name)? {
            Data::Bool(b) => Some(*b),
            Data::Float(f) => Some(*f != 0.0),
            Data::Int(i) => Some(*i != 0),
            Data::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Normalized date (serial number or formatted string).
    pub fn date(&self, name: &str) -> Option<chrono::DateTime<chrono::Utc>> {
        self.cell(name).and_then(dates::parse_date_cell)
    }
}

// ── row builders ────────────────────────────────────────────

fn doctor_from_row(row: &RowView<'_>) -> Doctor {
    Doctor {
        doctor_id: row.text("doctor_id").unwrap_or_default(),
        name: row.text("name").unwrap_or_default(),
        department: row.text("department").unwrap_or_default(),
        hire_date: row.date("hire_date"),
        is_active: row.flag("is_active").unwrap_or(true),
    }
}

fn patient_from_row(row: &RowView<'_>) -> Patient {
    Patient {
        patient_id: row.text("patient_id").unwrap_or_default(),
        name: row.text("name").unwrap_or_default(),
        registration_date: row.date("registration_date"),
        insurance_provider: row.text("insurance_provider"),
    }
}

fn visit_from_row(row: &RowView<'_>) -> Visit {
    Visit {
        visit_id: row.text("visit_id").unwrap_or_default(),
        patient_id: row.text("patient_id").unwrap_or_default(),
        doctor_id: row.text("doctor_id").unwrap_or_default(),
        department: row.text("department"),
        visit_date: row.date("visit_date"),
        visit_type: row.text("visit_type"),
        total_cost: row.number("total_cost").unwrap_or(0.0),
        status: row.text("status"),
        length_of_stay: row.number("length_of_stay").unwrap_or(0.0),
        readmission_30_days: row.flag("readmission_30_days").unwrap_or(false),
    }
}

fn financial_from_row(row: &RowView<'_>) -> FinancialRecord {
    FinancialRecord {
        year: row.number("year").map(|y| y as i32).unwrap_or(0),
        month: row.number("month").map(|m| m as u32).unwrap_or(0),
        date: row.date("date"),
        total_revenue: row.number("total_revenue").unwrap_or(0.0),
        operating_expenses: row.number("operating_expenses").unwrap_or(0.0),
        net_profit: row.number("net_profit").unwrap_or(0.0),
        profit_margin: row.number("profit_margin").unwrap_or(0.0),
        bed_occupancy_rate: row.number("bed_occupancy_rate").unwrap_or(0.0),
        average_daily_census: row.number("average_daily_census").unwrap_or(0.0),
    }
}

fn quality_from_row(row: &RowView<'_>) -> QualityRecord {
    QualityRecord {
        year: row.number("year").map(|y| y as i32).unwrap_or(0),
        month: row.number("month").map(|m| m as u32).unwrap_or(0),
        department: row.text("department").unwrap_or_else(|| "Unknown".into()),
        patient_satisfaction_score: row.number("patient_satisfaction_score").unwrap_or(0.0),
        date: row.date("date"),
    }
}

fn performance_from_row(row: &RowView<'_>) -> PerformanceRecord {
    PerformanceRecord {
        doctor_id: row.text("doctor_id").unwrap_or_default(),
        name: row.text("name").unwrap_or_default(),
        department: row.text("department").unwrap_or_else(|| "Unknown".into()),
        performance_rating: row.number("performance_rating").unwrap_or(0.0),
        average_patient_satisfaction: row.number("average_patient_satisfaction").unwrap_or(0.0),
        overtime_hours_monthly: row.number("overtime_hours_monthly").unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a sheet range from a header row and data rows.
    fn sheet(headers: &[&str], rows: &[Vec<Data>]) -> Range<Data> {
        let cols = headers.len() as u32;
        let mut range = Range::new((0, 0), (rows.len() as u32, cols.saturating_sub(1)));
        for (c, h) in headers.iter().enumerate() {
            range.set_value((0, c as u32), Data::String((*h).to_string()));
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32 + 1, c as u32), cell.clone());
            }
        }
        range
    }

    #[test]
    fn visit_row_coerces_serial_date_and_string_cost() {
        let range = sheet(
            &["visit_id", "department", "visit_date", "total_cost", "status"],
            &[vec![
                Data::String("VISIT_1".into()),
                Data::String("Cardiology".into()),
                Data::Float(45_292.0), // 2024-01-01
                Data::String("1500.50".into()),
                Data::Empty,
            ]],
        );
        let visits = rows_of(&range, visit_from_row);
        assert_eq!(visits.len(), 1);
        let v = &visits[0];
        assert_eq!(v.visit_id, "VISIT_1");
        assert_eq!(v.year(), Some(2024));
        assert_eq!(v.total_cost, 1500.50);
        assert!(v.status.is_none());
        assert!(v.is_completed());
    }

    #[test]
    fn non_numeric_cost_defaults_to_zero() {
        let range = sheet(
            &["visit_id", "total_cost"],
            &[vec![Data::String("V1".into()), Data::String("n/a".into())]],
        );
        let visits = rows_of(&range, visit_from_row);
        assert_eq!(visits[0].total_cost, 0.0);
    }

    #[test]
    fn unparsable_date_becomes_none() {
        let range = sheet(
            &["visit_id", "visit_date"],
            &[vec![Data::String("V1".into()), Data::String("soon".into())]],
        );
        let visits = rows_of(&range, visit_from_row);
        assert!(visits[0].visit_date.is_none());
    }

    #[test]
    fn doctor_active_defaults_to_true() {
        let range = sheet(
            &["doctor_id", "name", "is_active"],
            &[
                vec![
                    Data::String("DOC_1".into()),
                    Data::String("Dr. A".into()),
                    Data::Empty,
                ],
                vec![
                    Data::String("DOC_2".into()),
                    Data::String("Dr. B".into()),
                    Data::Bool(false),
                ],
            ],
        );
        let doctors = rows_of(&range, doctor_from_row);
        assert!(doctors[0].is_active);
        assert!(!doctors[1].is_active);
    }

    #[test]
    fn patient_without_provider_stays_none() {
        let range = sheet(
            &["patient_id", "registration_date", "insurance_provider"],
            &[vec![
                Data::String("PAT_1".into()),
                Data::String("2024-03-01T00:00:00.000Z".into()),
                Data::Empty,
            ]],
        );
        let patients = rows_of(&range, patient_from_row);
        assert!(patients[0].insurance_provider.is_none());
        assert_eq!(patients[0].registration_year(), Some(2024));
    }

    #[test]
    fn numeric_id_cell_renders_without_decimal_point() {
        let range = sheet(
            &["doctor_id", "name"],
            &[vec![Data::Float(42.0), Data::String("Dr. C".into())]],
        );
        let doctors = rows_of(&range, doctor_from_row);
        assert_eq!(doctors[0].doctor_id, "42");
    }

    #[test]
    fn blank_rows_are_skipped() {
        let range = sheet(
            &["visit_id", "total_cost"],
            &[
                vec![Data::Empty, Data::Empty],
                vec![Data::String("V1".into()), Data::Float(10.0)],
            ],
        );
        let visits = rows_of(&range, visit_from_row);
        assert_eq!(visits.len(), 1);
    }

    #[test]
    fn corrupt_container_is_an_error() {
        let err = parse_workbook(b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, IngestError::Workbook(_)));
    }

    #[test]
    fn financial_row_keeps_year_month_columns() {
        let range = sheet(
            &["year", "month", "total_revenue", "profit_margin"],
            &[vec![
                Data::Float(2024.0),
                Data::Float(3.0),
                Data::Float(9_500_000.0),
                Data::Float(0.18),
            ]],
        );
        let records = rows_of(&range, financial_from_row);
        assert_eq!(records[0].year, 2024);
        assert_eq!(records[0].month, 3);
        assert_eq!(records[0].profit_margin, 0.18);
    }
}
