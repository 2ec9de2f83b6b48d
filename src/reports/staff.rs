//! Staff report: per-department performance averages.

use std::collections::HashMap;

use serde::Serialize;

use crate::reports::{mean, mean_str};
use crate::store::HospitalData;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffReport {
    pub performance_by_department: Vec<DepartmentPerformance>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPerformance {
    pub department: String,
    pub avg_performance_rating: String,
    pub avg_patient_satisfaction: String,
    pub avg_monthly_overtime: String,
    pub staff_count: usize,
}

pub fn staff_report(data: &HospitalData) -> StaffReport {
    #[derive(Default)]
    struct Acc {
        rating: f64,
        satisfaction: f64,
        overtime: f64,
        staff: usize,
    }

    let mut by_dept: HashMap<&str, Acc> = HashMap::new();
    for p in &data.performance {
        let acc = by_dept.entry(p.department.as_str()).or_default();
        acc.rating += p.performance_rating;
        acc.satisfaction += p.average_patient_satisfaction;
        acc.overtime += p.overtime_hours_monthly;
        acc.staff += 1;
    }

    let mut rows: Vec<(f64, DepartmentPerformance)> = by_dept
        .into_iter()
        .map(|(dept, acc)| {
            (
                mean(acc.rating, acc.staff),
                DepartmentPerformance {
                    department: dept.to_string(),
                    avg_performance_rating: mean_str(acc.rating, acc.staff),
                    avg_patient_satisfaction: mean_str(acc.satisfaction, acc.staff),
                    avg_monthly_overtime: mean_str(acc.overtime, acc.staff),
                    staff_count: acc.staff,
                },
            )
        })
        .collect();

    rows.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.department.cmp(&b.1.department))
    });

    StaffReport {
        performance_by_department: rows.into_iter().map(|(_, row)| row).collect(),
    }
}
