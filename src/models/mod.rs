//! Record types for the six workbook collections.
//!
//! Every date field is `Option<DateTime<Utc>>`: `None` means the source cell
//! was absent or unparsable, and the row is skipped by date-dependent
//! aggregations. Numeric fields default to 0 when the cell is missing or
//! non-numeric — the coercion happens once, in `ingest::workbook`.

pub mod doctor;
pub mod financial;
pub mod patient;
pub mod performance;
pub mod quality;
pub mod visit;

pub use doctor::Doctor;
pub use financial::FinancialRecord;
pub use patient::Patient;
pub use performance::PerformanceRecord;
pub use quality::QualityRecord;
pub use visit::Visit;
