use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A registered patient from the `hospital_patients` sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: String,
    pub name: String,
    pub registration_date: Option<DateTime<Utc>>,
    pub insurance_provider: Option<String>,
}

impl Patient {
    /// Insurance provider label, `"Unknown"` when the source cell was empty.
    pub fn provider_or_unknown(&self) -> &str {
        self.insurance_provider.as_deref().unwrap_or("Unknown")
    }

    /// Calendar year of registration, when the date parsed.
    pub fn registration_year(&self) -> Option<i32> {
        self.registration_date.map(|d| d.year())
    }
}
