use serde::{Deserialize, Serialize};

/// Per-doctor performance metrics, from the `hospital_staff_performance`
/// sheet. One row per doctor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub doctor_id: String,
    pub name: String,
    pub department: String,
    pub performance_rating: f64,
    pub average_patient_satisfaction: f64,
    pub overtime_hours_monthly: f64,
}
