//! Aggregation engine: pure report builders over a record-store snapshot.
//!
//! Each builder is a pure function of `&HospitalData`: no caching, no
//! mutation, and deterministic output (ties in every sort break on the group
//! label so repeated calls against an unchanged snapshot serialize
//! byte-identically).

use chrono::NaiveDate;

pub mod financial;
pub mod operations;
pub mod overview;
pub mod quality;
pub mod staff;
pub mod strategic;

/// Inclusive year window applied by the visit- and patient-driven reports.
pub const REPORT_YEAR_MIN: i32 = 2022;
pub const REPORT_YEAR_MAX: i32 = 2024;

pub(crate) fn in_report_years(year: i32) -> bool {
    (REPORT_YEAR_MIN..=REPORT_YEAR_MAX).contains(&year)
}

/// `"Mon YYYY"` label for a calendar month.
pub(crate) fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d.format("%b %Y").to_string(),
        None => format!("{year}-{month:02}"),
    }
}

/// `part` of `whole` as a fixed one-decimal percentage string.
///
/// Renders the literal `"0"` (not `"0.0"`) when the denominator is zero —
/// dashboard clients key off that exact value.
pub(crate) fn pct_str(part: f64, whole: f64) -> String {
    if whole > 0.0 {
        format!("{:.1}", part / whole * 100.0)
    } else {
        "0".to_string()
    }
}

/// Mean with a zero-count guard.
pub(crate) fn mean(sum: f64, count: usize) -> f64 {
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

/// Mean as a fixed one-decimal string, `"0"` when the count is zero.
pub(crate) fn mean_str(sum: f64, count: usize) -> String {
    if count > 0 {
        format!("{:.1}", sum / count as f64)
    } else {
        "0".to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_label_formats_as_mon_yyyy() {
        assert_eq!(month_label(2024, 1), "Jan 2024");
        assert_eq!(month_label(2022, 12), "Dec 2022");
    }

    #[test]
    fn month_label_survives_nonsense_months() {
        assert_eq!(month_label(2024, 0), "2024-00");
        assert_eq!(month_label(2024, 13), "2024-13");
    }

    #[test]
    fn pct_str_renders_one_decimal() {
        assert_eq!(pct_str(1.0, 3.0), "33.3");
        assert_eq!(pct_str(2.0, 2.0), "100.0");
    }

    #[test]
    fn zero_denominator_renders_literal_zero() {
        assert_eq!(pct_str(5.0, 0.0), "0");
        assert_eq!(mean_str(5.0, 0), "0");
    }

    #[test]
    fn year_window_is_inclusive() {
        assert!(!in_report_years(2021));
        assert!(in_report_years(2022));
        assert!(in_report_years(2024));
        assert!(!in_report_years(2025));
    }
}
