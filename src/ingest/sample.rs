//! Synthetic dataset generation — the last ingestion tier.
//!
//! Produces a referentially consistent dataset: every visit's patient and
//! doctor ids resolve to generated entities, and every generated date falls
//! inside `SAMPLE_YEAR` so the rows survive the report year filters. That
//! containment is a correctness requirement, not cosmetics — a sample
//! dataset that the aggregations filter out would render an empty dashboard.

use chrono::{TimeZone, Utc};
use rand::Rng;

use crate::models::{Doctor, FinancialRecord, Patient, PerformanceRecord, QualityRecord, Visit};
use crate::store::HospitalData;

/// All generated dates land in this year; it sits inside the report
/// builders' [2022, 2024] window.
pub const SAMPLE_YEAR: i32 = 2024;

pub const DEPARTMENTS: [&str; 6] = [
    "Cardiology",
    "Neurology",
    "Orthopedics",
    "Emergency Medicine",
    "Internal Medicine",
    "Pediatrics",
];

const FIRST_NAMES: [&str; 6] = ["John", "Jane", "Michael", "Sarah", "David", "Lisa"];
const LAST_NAMES: [&str; 5] = ["Smith", "Johnson", "Williams", "Brown", "Davis"];

const VISIT_TYPES: [&str; 4] = ["Outpatient", "Inpatient", "Emergency", "Surgery"];

const DOCTOR_COUNT: usize = 150;
const PATIENT_COUNT: usize = 5_000;
const VISIT_COUNT: usize = 15_000;
const PERFORMANCE_COUNT: usize = 120;

/// Generate a full synthetic dataset.
pub fn generate() -> HospitalData {
    let mut rng = rand::thread_rng();

    let doctors: Vec<Doctor> = (0..DOCTOR_COUNT)
        .map(|i| Doctor {
            doctor_id: format!("DOC_{:04}", i + 1),
            name: doctor_name(i),
            department: DEPARTMENTS[i % DEPARTMENTS.len()].to_string(),
            hire_date: None,
            is_active: true,
        })
        .collect();

    let patients: Vec<Patient> = (0..PATIENT_COUNT)
        .map(|i| Patient {
            patient_id: format!("PAT_{:06}", i + 1),
            name: format!("Patient {}", i + 1),
            registration_date: sample_date(&mut rng),
            insurance_provider: None,
        })
        .collect();

    let visits: Vec<Visit> = (0..VISIT_COUNT)
        .map(|i| {
            let patient = &patients[rng.gen_range(0..patients.len())];
            let doctor = &doctors[rng.gen_range(0..doctors.len())];
            Visit {
                visit_id: format!("VISIT_{}", i + 1),
                patient_id: patient.patient_id.clone(),
                doctor_id: doctor.doctor_id.clone(),
                department: Some(DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())].to_string()),
                visit_date: sample_date(&mut rng),
                visit_type: Some(VISIT_TYPES[rng.gen_range(0..VISIT_TYPES.len())].to_string()),
                total_cost: 500.0 + rng.gen::<f64>() * 10_000.0,
                status: Some("Completed".to_string()),
                length_of_stay: rng.gen_range(0..15) as f64,
                readmission_30_days: rng.gen::<f64>() < 0.1,
            }
        })
        .collect();

    let financial: Vec<FinancialRecord> = (1..=12)
        .map(|month| {
            let revenue = 8_000_000.0 + rng.gen::<f64>() * 7_000_000.0;
            let expenses = 6_000_000.0 + rng.gen::<f64>() * 6_000_000.0;
            let profit = revenue - expenses;
            FinancialRecord {
                year: SAMPLE_YEAR,
                month,
                date: Utc
                    .with_ymd_and_hms(SAMPLE_YEAR, month, 1, 0, 0, 0)
                    .single(),
                total_revenue: revenue,
                operating_expenses: expenses,
                net_profit: profit,
                profit_margin: profit / revenue,
                bed_occupancy_rate: 0.7 + rng.gen::<f64>() * 0.25,
                average_daily_census: 200.0 + rng.gen::<f64>() * 200.0,
            }
        })
        .collect();

    let mut quality = Vec::with_capacity(12 * DEPARTMENTS.len());
    for month in 1..=12u32 {
        for dept in DEPARTMENTS {
            quality.push(QualityRecord {
                year: SAMPLE_YEAR,
                month,
                department: dept.to_string(),
                patient_satisfaction_score: 7.5 + rng.gen::<f64>() * 2.0,
                date: Utc
                    .with_ymd_and_hms(SAMPLE_YEAR, month, 1, 0, 0, 0)
                    .single(),
            });
        }
    }

    let performance: Vec<PerformanceRecord> = (0..PERFORMANCE_COUNT)
        .map(|i| PerformanceRecord {
            doctor_id: format!("DOC_{:04}", i + 1),
            name: doctor_name(i),
            department: DEPARTMENTS[i % DEPARTMENTS.len()].to_string(),
            performance_rating: 3.0 + rng.gen::<f64>() * 2.0,
            average_patient_satisfaction: 7.0 + rng.gen::<f64>() * 2.5,
            overtime_hours_monthly: rng.gen_range(0..40) as f64,
        })
        .collect();

    HospitalData {
        doctors,
        patients,
        visits,
        financial,
        quality,
        performance,
    }
}

fn doctor_name(i: usize) -> String {
    format!(
        "Dr. {} {}",
        FIRST_NAMES[i % FIRST_NAMES.len()],
        LAST_NAMES[i % LAST_NAMES.len()]
    )
}

/// Random timestamp inside `SAMPLE_YEAR`. Days cap at 28 so every month is
/// valid.
fn sample_date(rng: &mut impl Rng) -> Option<chrono::DateTime<Utc>> {
    Utc.with_ymd_and_hms(
        SAMPLE_YEAR,
        rng.gen_range(1..=12),
        rng.gen_range(1..=28),
        rng.gen_range(0..24),
        rng.gen_range(0..60),
        0,
    )
    .single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::collections::HashSet;

    #[test]
    fn generated_counts_match_contract() {
        let data = generate();
        assert_eq!(data.doctors.len(), 150);
        assert_eq!(data.patients.len(), 5_000);
        assert_eq!(data.visits.len(), 15_000);
        assert_eq!(data.financial.len(), 12);
        assert_eq!(data.quality.len(), 12 * DEPARTMENTS.len());
        assert_eq!(data.performance.len(), 120);
    }

    #[test]
    fn visit_foreign_keys_resolve() {
        let data = generate();
        let patient_ids: HashSet<&str> =
            data.patients.iter().map(|p| p.patient_id.as_str()).collect();
        let doctor_ids: HashSet<&str> =
            data.doctors.iter().map(|d| d.doctor_id.as_str()).collect();
        for visit in &data.visits {
            assert!(patient_ids.contains(visit.patient_id.as_str()));
            assert!(doctor_ids.contains(visit.doctor_id.as_str()));
        }
    }

    #[test]
    fn every_visit_lands_in_the_sample_year() {
        let data = generate();
        for visit in &data.visits {
            let date = visit.visit_date.expect("sample visits always carry dates");
            assert_eq!(date.year(), SAMPLE_YEAR);
        }
    }

    #[test]
    fn registration_dates_land_in_the_sample_year() {
        let data = generate();
        for patient in &data.patients {
            assert_eq!(patient.registration_year(), Some(SAMPLE_YEAR));
        }
    }

    #[test]
    fn financial_margins_are_consistent() {
        let data = generate();
        for rec in &data.financial {
            assert!((rec.net_profit - (rec.total_revenue - rec.operating_expenses)).abs() < 1e-6);
            assert!((rec.profit_margin - rec.net_profit / rec.total_revenue).abs() < 1e-9);
            assert!((0.7..=0.95).contains(&rec.bed_occupancy_rate));
        }
    }

    #[test]
    fn quality_covers_each_department_each_month() {
        let data = generate();
        let keys: HashSet<(u32, &str)> = data
            .quality
            .iter()
            .map(|q| (q.month, q.department.as_str()))
            .collect();
        assert_eq!(keys.len(), 12 * DEPARTMENTS.len());
    }
}
