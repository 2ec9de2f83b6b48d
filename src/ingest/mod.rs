//! Ingestion pipeline — three-tier fallback chain.
//!
//! Remote blob store → local workbook file → synthetic sample data. Each
//! tier failure is logged and non-fatal; the chain always produces a
//! populated dataset, so the record store is never left uninitialized and
//! the report builders never see an absent collection set.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config;
use crate::store::{DataSource, HospitalData};

pub mod blob;
pub mod dates;
pub mod sample;
pub mod workbook;

pub use blob::{BlobStore, FsBlobStore};

/// Errors inside a single ingestion tier. Never fatal to the pipeline —
/// they only push the chain to the next tier.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("workbook parse error: {0}")]
    Workbook(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result of one run of the fallback chain.
pub struct LoadOutcome {
    pub data: HospitalData,
    pub source: DataSource,
}

/// Owns the two external source tiers and runs the chain.
pub struct Loader {
    blob: Arc<dyn BlobStore>,
    local_path: PathBuf,
}

impl Loader {
    pub fn new(blob: Arc<dyn BlobStore>, local_path: PathBuf) -> Self {
        Self { blob, local_path }
    }

    /// Blob store access, for the upload endpoint.
    pub fn blob(&self) -> &dyn BlobStore {
        self.blob.as_ref()
    }

    /// Run the fallback chain. Blocking (file and sheet parsing I/O) —
    /// callers on the async runtime go through `DataStore::reload`.
    pub fn load(&self) -> LoadOutcome {
        match self.load_remote() {
            Ok(data) => {
                log_counts(&data, "blob store");
                return LoadOutcome {
                    data,
                    source: DataSource::Remote,
                };
            }
            Err(e) => tracing::warn!("Remote tier failed, trying local file: {e}"),
        }

        match self.load_local() {
            Ok(data) => {
                log_counts(&data, "local file");
                return LoadOutcome {
                    data,
                    source: DataSource::Local,
                };
            }
            Err(e) => tracing::warn!("Local tier failed, generating sample data: {e}"),
        }

        let data = sample::generate();
        log_counts(&data, "sample generator");
        LoadOutcome {
            data,
            source: DataSource::Sample,
        }
    }

    fn load_remote(&self) -> Result<HospitalData, IngestError> {
        if !self.blob.exists(config::DATA_KEY)? {
            return Err(IngestError::SourceUnavailable(format!(
                "{} not present in blob store",
                config::DATA_KEY
            )));
        }
        let bytes = self.blob.download(config::DATA_KEY)?;
        workbook::parse_workbook(&bytes)
    }

    fn load_local(&self) -> Result<HospitalData, IngestError> {
        let bytes = fs::read(&self.local_path).map_err(|e| {
            IngestError::SourceUnavailable(format!("{}: {e}", self.local_path.display()))
        })?;
        workbook::parse_workbook(&bytes)
    }
}

fn log_counts(data: &HospitalData, source: &str) {
    tracing::info!(
        source,
        doctors = data.doctors.len(),
        patients = data.patients.len(),
        visits = data.visits.len(),
        financial = data.financial.len(),
        quality = data.quality.len(),
        performance = data.performance.len(),
        "Data loaded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader_in(dir: &std::path::Path, local: PathBuf) -> Loader {
        Loader::new(Arc::new(FsBlobStore::new(dir.to_path_buf())), local)
    }

    #[test]
    fn missing_everything_falls_back_to_sample() {
        let dir = tempfile::tempdir().unwrap();
        let loader = loader_in(dir.path(), dir.path().join("no_such_file.xlsx"));

        let outcome = loader.load();
        assert_eq!(outcome.source, DataSource::Sample);
        assert!(!outcome.data.visits.is_empty());
        assert!(!outcome.data.doctors.is_empty());
    }

    #[test]
    fn corrupt_blob_falls_through_to_sample() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path().to_path_buf());
        store.upload(config::DATA_KEY, b"not a workbook").unwrap();

        let loader = loader_in(dir.path(), dir.path().join("also_missing.xlsx"));
        let outcome = loader.load();
        assert_eq!(outcome.source, DataSource::Sample);
    }

    #[test]
    fn corrupt_local_file_falls_through_to_sample() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("hospital_data.xlsx");
        fs::write(&local, b"garbage").unwrap();

        let loader = loader_in(dir.path(), local);
        let outcome = loader.load();
        assert_eq!(outcome.source, DataSource::Sample);
    }

    #[test]
    fn chain_never_yields_empty_collections() {
        let dir = tempfile::tempdir().unwrap();
        let loader = loader_in(dir.path(), dir.path().join("missing.xlsx"));
        let outcome = loader.load();
        let d = &outcome.data;
        assert!(
            !d.doctors.is_empty()
                && !d.patients.is_empty()
                && !d.visits.is_empty()
                && !d.financial.is_empty()
                && !d.quality.is_empty()
                && !d.performance.is_empty()
        );
    }
}
