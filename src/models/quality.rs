use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One department-month satisfaction score, from the
/// `hospital_quality_metrics` sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityRecord {
    pub year: i32,
    pub month: u32,
    pub department: String,
    pub patient_satisfaction_score: f64,
    pub date: Option<DateTime<Utc>>,
}
