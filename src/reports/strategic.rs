//! Strategic report: patient acquisition trend and insurance mix.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::reports::{in_report_years, month_label, pct_str};
use crate::store::HospitalData;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicReport {
    pub patient_acquisition: Vec<AcquisitionPoint>,
    pub insurance_mix: Vec<InsuranceShare>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquisitionPoint {
    pub month: String,
    pub new_patients: usize,
}

#[derive(Debug, Serialize)]
pub struct InsuranceShare {
    pub provider: String,
    pub count: usize,
    pub percentage: String,
}

pub fn strategic_report(data: &HospitalData) -> StrategicReport {
    StrategicReport {
        patient_acquisition: patient_acquisition(data),
        insurance_mix: insurance_mix(data),
    }
}

fn patient_acquisition(data: &HospitalData) -> Vec<AcquisitionPoint> {
    let mut by_month: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for p in &data.patients {
        let Some(date) = p.registration_date else {
            continue;
        };
        use chrono::Datelike;
        if !in_report_years(date.year()) {
            continue;
        }
        *by_month.entry((date.year(), date.month())).or_default() += 1;
    }

    by_month
        .into_iter()
        .map(|((year, month), count)| AcquisitionPoint {
            month: month_label(year, month),
            new_patients: count,
        })
        .collect()
}

/// Every registered patient counts toward the mix, undated ones included.
fn insurance_mix(data: &HospitalData) -> Vec<InsuranceShare> {
    let total = data.patients.len();
    let mut by_provider: HashMap<&str, usize> = HashMap::new();
    for p in &data.patients {
        *by_provider.entry(p.provider_or_unknown()).or_default() += 1;
    }

    let mut rows: Vec<InsuranceShare> = by_provider
        .into_iter()
        .map(|(provider, count)| InsuranceShare {
            provider: provider.to_string(),
            count,
            percentage: pct_str(count as f64, total as f64),
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.provider.cmp(&b.provider)));
    rows
}
