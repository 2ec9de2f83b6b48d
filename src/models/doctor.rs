use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A staff physician from the `hospital_doctors` sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: String,
    pub name: String,
    pub department: String,
    pub hire_date: Option<DateTime<Utc>>,
    /// Absent in the source means active.
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_serializes_with_snake_case_fields() {
        let doc = Doctor {
            doctor_id: "DOC_0001".into(),
            name: "Dr. Jane Smith".into(),
            department: "Cardiology".into(),
            hire_date: None,
            is_active: true,
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["doctor_id"], "DOC_0001");
        assert_eq!(json["is_active"], true);
    }
}
