//! Quality report: satisfaction trend and 30-day readmission rates.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::reports::{mean_str, month_label, pct_str, REPORT_YEAR_MIN};
use crate::store::HospitalData;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub satisfaction_trends: Vec<SatisfactionPoint>,
    pub readmission_rates: Vec<DepartmentReadmission>,
}

#[derive(Debug, Serialize)]
pub struct SatisfactionPoint {
    pub month: String,
    pub satisfaction: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentReadmission {
    pub department: String,
    pub readmission_rate: String,
}

pub fn quality_report(data: &HospitalData) -> QualityReport {
    QualityReport {
        satisfaction_trends: satisfaction_trends(data),
        readmission_rates: readmission_rates(data),
    }
}

fn satisfaction_trends(data: &HospitalData) -> Vec<SatisfactionPoint> {
    let mut by_month: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for q in &data.quality {
        if q.year < REPORT_YEAR_MIN {
            continue;
        }
        let (sum, count) = by_month.entry((q.year, q.month)).or_default();
        *sum += q.patient_satisfaction_score;
        *count += 1;
    }

    by_month
        .into_iter()
        .map(|((year, month), (sum, count))| SatisfactionPoint {
            month: month_label(year, month),
            satisfaction: mean_str(sum, count),
        })
        .collect()
}

/// Readmission share among completed inpatient/surgical discharges.
fn readmission_rates(data: &HospitalData) -> Vec<DepartmentReadmission> {
    #[derive(Default)]
    struct Acc {
        discharges: usize,
        readmissions: usize,
    }

    let mut by_dept: HashMap<&str, Acc> = HashMap::new();
    for v in &data.visits {
        if !v.is_discharge() || !v.is_completed() {
            continue;
        }
        let acc = by_dept.entry(v.department_or_unknown()).or_default();
        acc.discharges += 1;
        if v.readmission_30_days {
            acc.readmissions += 1;
        }
    }

    let mut rows: Vec<(f64, DepartmentReadmission)> = by_dept
        .into_iter()
        .map(|(dept, acc)| {
            let rate = if acc.discharges > 0 {
                acc.readmissions as f64 / acc.discharges as f64 * 100.0
            } else {
                0.0
            };
            (
                rate,
                DepartmentReadmission {
                    department: dept.to_string(),
                    readmission_rate: pct_str(acc.readmissions as f64, acc.discharges as f64),
                },
            )
        })
        .collect();

    rows.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.department.cmp(&b.1.department))
    });
    rows.into_iter().map(|(_, row)| row).collect()
}
