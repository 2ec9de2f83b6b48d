//! API endpoint handlers.
//!
//! `dashboard` serves the six aggregation reports; `admin` covers data
//! lifecycle (reload, status, upload).

pub mod admin;
pub mod dashboard;
