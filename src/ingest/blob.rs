//! Blob store collaborator — the "remote" tier of the ingestion chain.
//!
//! The production deployment points this at a synced object-store mount; the
//! minimal deployment ships `FsBlobStore`, a plain directory. Uploads stage
//! through a temp file and persist atomically so a failed write never leaves
//! a half-written workbook at the data key.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::ingest::IngestError;

/// Keyed byte storage for the workbook source.
pub trait BlobStore: Send + Sync {
    fn exists(&self, key: &str) -> Result<bool, IngestError>;
    fn download(&self, key: &str) -> Result<Vec<u8>, IngestError>;
    fn upload(&self, key: &str, bytes: &[u8]) -> Result<(), IngestError>;
}

/// Directory-backed blob store.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl BlobStore for FsBlobStore {
    fn exists(&self, key: &str) -> Result<bool, IngestError> {
        Ok(self.path_for(key).is_file())
    }

    fn download(&self, key: &str) -> Result<Vec<u8>, IngestError> {
        fs::read(self.path_for(key))
            .map_err(|e| IngestError::SourceUnavailable(format!("blob {key}: {e}")))
    }

    fn upload(&self, key: &str, bytes: &[u8]) -> Result<(), IngestError> {
        fs::create_dir_all(&self.root)?;
        let mut staged = tempfile::NamedTempFile::new_in(&self.root)?;
        staged.write_all(bytes)?;
        staged.flush()?;
        staged
            .persist(self.path_for(key))
            .map_err(|e| IngestError::Io(e.error))?;
        Ok(())
    }
}
