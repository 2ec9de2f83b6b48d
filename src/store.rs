//! In-memory record store with whole-snapshot replacement.
//!
//! Readers clone an `Arc<Snapshot>` out of a short `RwLock` critical
//! section, so every report request observes all six collections from a
//! single ingestion generation. Reload builds the next snapshot off-lock
//! (the fallback chain does file I/O) and swaps the pointer in one write.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ingest::Loader;
use crate::models::{Doctor, FinancialRecord, Patient, PerformanceRecord, QualityRecord, Visit};

/// The six normalized collections of one ingestion generation.
#[derive(Debug, Clone, Default)]
pub struct HospitalData {
    pub doctors: Vec<Doctor>,
    pub patients: Vec<Patient>,
    pub visits: Vec<Visit>,
    pub financial: Vec<FinancialRecord>,
    pub quality: Vec<QualityRecord>,
    pub performance: Vec<PerformanceRecord>,
}

impl HospitalData {
    pub fn counts(&self) -> CollectionCounts {
        CollectionCounts {
            doctors: self.doctors.len(),
            patients: self.patients.len(),
            visits: self.visits.len(),
            financial: self.financial.len(),
            quality: self.quality.len(),
            performance: self.performance.len(),
        }
    }
}

/// Per-collection row counts for diagnostics endpoints.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CollectionCounts {
    pub doctors: usize,
    pub patients: usize,
    pub visits: usize,
    pub financial: usize,
    pub quality: usize,
    pub performance: usize,
}

/// Which ingestion tier produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Store created, first load not yet completed.
    Unloaded,
    Remote,
    Local,
    Sample,
}

/// One immutable ingestion generation.
#[derive(Debug)]
pub struct Snapshot {
    pub data: HospitalData,
    pub source: DataSource,
    pub generation: u64,
    pub loaded_at: DateTime<Utc>,
}

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Reload task failed: {0}")]
    ReloadTask(String),
}

/// Single-writer, many-reader snapshot holder.
pub struct DataStore {
    current: RwLock<Arc<Snapshot>>,
    generation: AtomicU64,
    /// Serializes reload attempts so concurrent manual/periodic triggers
    /// don't run the fallback chain redundantly.
    reload_gate: tokio::sync::Mutex<()>,
}

impl DataStore {
    /// Create an empty store (generation 0, no data).
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot {
                data: HospitalData::default(),
                source: DataSource::Unloaded,
                generation: 0,
                loaded_at: Utc::now(),
            })),
            generation: AtomicU64::new(0),
            reload_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// The current snapshot. Cheap — clones an `Arc`.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>, StoreError> {
        Ok(self
            .current
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .clone())
    }

    /// Install a new generation wholesale.
    pub fn replace(
        &self,
        data: HospitalData,
        source: DataSource,
    ) -> Result<Arc<Snapshot>, StoreError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(Snapshot {
            data,
            source,
            generation,
            loaded_at: Utc::now(),
        });
        let mut guard = self.current.write().map_err(|_| StoreError::LockPoisoned)?;
        *guard = snapshot.clone();
        drop(guard);
        tracing::info!(generation, source = ?snapshot.source, "Record store swapped");
        Ok(snapshot)
    }

    /// Run the ingestion fallback chain and swap in its result.
    ///
    /// Reload attempts are serialized: a caller that finds another reload in
    /// flight waits for it and reuses the freshly-installed snapshot instead
    /// of re-running the chain. Reads proceed against the previous snapshot
    /// for the whole duration — the chain runs on a blocking worker, not
    /// under the store lock.
    pub async fn reload(&self, loader: Arc<Loader>) -> Result<Arc<Snapshot>, StoreError> {
        let _gate = match self.reload_gate.try_lock() {
            Ok(gate) => gate,
            Err(_) => {
                // Another reload is running; wait it out and piggyback.
                let _wait = self.reload_gate.lock().await;
                return self.snapshot();
            }
        };

        let outcome = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| StoreError::ReloadTask(e.to_string()))?;

        self.replace(outcome.data, outcome.source)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
