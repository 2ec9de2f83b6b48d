//! Shared state for the API layer.

use std::sync::Arc;

use crate::ingest::Loader;
use crate::store::DataStore;

/// Shared context for all API routes: the record store plus the ingestion
/// loader the admin endpoints drive.
#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<DataStore>,
    pub loader: Arc<Loader>,
}

impl ApiContext {
    pub fn new(store: Arc<DataStore>, loader: Arc<Loader>) -> Self {
        Self { store, loader }
    }
}
