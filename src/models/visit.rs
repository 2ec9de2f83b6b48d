use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A patient encounter from the `hospital_patient_visits` sheet.
///
/// `visit_type` is one of `Outpatient`, `Inpatient`, `Emergency`, `Surgery`
/// in well-formed data; unrecognized values simply fail the type filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub visit_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub department: Option<String>,
    pub visit_date: Option<DateTime<Utc>>,
    pub visit_type: Option<String>,
    pub total_cost: f64,
    pub status: Option<String>,
    pub length_of_stay: f64,
    pub readmission_30_days: bool,
}

impl Visit {
    /// A visit with no status counts as completed.
    pub fn is_completed(&self) -> bool {
        match self.status.as_deref() {
            None => true,
            Some(s) => s == "Completed",
        }
    }

    /// Calendar year of the visit, when the date parsed.
    pub fn year(&self) -> Option<i32> {
        self.visit_date.map(|d| d.year())
    }

    /// Department label, `"Unknown"` when the cell was empty.
    pub fn department_or_unknown(&self) -> &str {
        self.department.as_deref().unwrap_or("Unknown")
    }

    /// Inpatient and surgical visits count as discharges for readmission
    /// tracking.
    pub fn is_discharge(&self) -> bool {
        matches!(self.visit_type.as_deref(), Some("Inpatient") | Some("Surgery"))
    }

    pub fn is_emergency(&self) -> bool {
        self.visit_type.as_deref() == Some("Emergency")
    }
}
