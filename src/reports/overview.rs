//! Executive overview: headline counts plus the latest month's financials.

use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::store::HospitalData;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewReport {
    pub hospital_info: HospitalInfo,
    pub key_metrics: KeyMetrics,
}

#[derive(Debug, Serialize)]
pub struct HospitalInfo {
    pub name: &'static str,
    pub founded: &'static str,
    pub beds: u32,
    pub departments: u32,
    pub accreditation: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub total_doctors: usize,
    pub total_patients: usize,
    /// Visits in `reporting_year`.
    pub total_visits: usize,
    pub reporting_year: i32,
    pub monthly_revenue: f64,
    /// Percent (the source stores a fraction).
    pub profit_margin: f64,
    pub bed_occupancy: f64,
}

/// The year headline visit counts are scoped to: the most recent year with a
/// dated visit, or the wall-clock year for an empty store.
fn reporting_year(data: &HospitalData) -> i32 {
    data.visits
        .iter()
        .filter_map(|v| v.year())
        .max()
        .unwrap_or_else(|| Utc::now().year())
}

pub fn overview_report(data: &HospitalData) -> OverviewReport {
    let year = reporting_year(data);
    let total_doctors = data.doctors.iter().filter(|d| d.is_active).count();
    let total_visits = data
        .visits
        .iter()
        .filter(|v| v.year() == Some(year))
        .count();

    // Latest financial month; ties broken arbitrarily.
    let latest = data.financial.iter().max_by_key(|r| r.sort_key());

    OverviewReport {
        hospital_info: HospitalInfo {
            name: "Renova Hospitals",
            founded: "1985",
            beds: 450,
            departments: 12,
            accreditation: "Joint Commission Accredited",
        },
        key_metrics: KeyMetrics {
            total_doctors,
            total_patients: data.patients.len(),
            total_visits,
            reporting_year: year,
            monthly_revenue: latest.map(|r| r.total_revenue).unwrap_or(0.0),
            profit_margin: latest.map(|r| r.profit_margin * 100.0).unwrap_or(0.0),
            bed_occupancy: latest.map(|r| r.bed_occupancy_rate * 100.0).unwrap_or(0.0),
        },
    }
}
