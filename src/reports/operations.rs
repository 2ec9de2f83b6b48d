//! Operational report: monthly throughput and length of stay by department.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use serde::Serialize;

use crate::reports::{in_report_years, mean, mean_str, month_label, pct_str};
use crate::store::HospitalData;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsReport {
    pub monthly_throughput: Vec<ThroughputPoint>,
    pub length_of_stay_by_department: Vec<DepartmentStay>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputPoint {
    pub month: String,
    pub total_visits: usize,
    pub emergency_visits: usize,
    pub emergency_percentage: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStay {
    pub department: String,
    pub avg_length_of_stay: String,
}

pub fn operations_report(data: &HospitalData) -> OperationsReport {
    OperationsReport {
        monthly_throughput: monthly_throughput(data),
        length_of_stay_by_department: length_of_stay(data),
    }
}

/// Visit counts per month, all statuses included (cancellations still
/// consumed capacity).
fn monthly_throughput(data: &HospitalData) -> Vec<ThroughputPoint> {
    #[derive(Default)]
    struct Acc {
        visits: usize,
        emergency: usize,
    }

    // BTreeMap on (year, month) keeps the output chronological.
    let mut by_month: BTreeMap<(i32, u32), Acc> = BTreeMap::new();
    for v in &data.visits {
        let Some(date) = v.visit_date else { continue };
        if !in_report_years(date.year()) {
            continue;
        }
        let acc = by_month.entry((date.year(), date.month())).or_default();
        acc.visits += 1;
        if v.is_emergency() {
            acc.emergency += 1;
        }
    }

    by_month
        .into_iter()
        .map(|((year, month), acc)| ThroughputPoint {
            month: month_label(year, month),
            total_visits: acc.visits,
            emergency_visits: acc.emergency,
            emergency_percentage: pct_str(acc.emergency as f64, acc.visits as f64),
        })
        .collect()
}

fn length_of_stay(data: &HospitalData) -> Vec<DepartmentStay> {
    let mut by_dept: HashMap<&str, (f64, usize)> = HashMap::new();
    for v in &data.visits {
        if v.length_of_stay <= 0.0 || !v.is_completed() {
            continue;
        }
        let (sum, count) = by_dept.entry(v.department_or_unknown()).or_default();
        *sum += v.length_of_stay;
        *count += 1;
    }

    let mut rows: Vec<(f64, DepartmentStay)> = by_dept
        .into_iter()
        .map(|(dept, (sum, count))| {
            (
                mean(sum, count),
                DepartmentStay {
                    department: dept.to_string(),
                    avg_length_of_stay: mean_str(sum, count),
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
