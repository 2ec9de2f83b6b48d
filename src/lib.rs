//! Renova Hospitals operations dashboard service.
//!
//! Ingests a six-sheet workbook (remote blob store → local file → synthetic
//! fallback) into an in-memory record store and serves derived summary
//! reports over a small JSON API for the dashboard UI.

pub mod api;
pub mod config;
pub mod ingest;
pub mod models;
pub mod reports;
pub mod store;
