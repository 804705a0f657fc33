//! Registry service composing validation and storage
//!
//! Create requests are validated before the store is touched. Lookups and
//! listings go straight to the store.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{RegistryError, RegistryResult};
use crate::record::{validate, MemoryRecordStore, Record, RecordInput, RecordStore};

/// Entry point for the create, read-one and read-all operations
#[derive(Clone)]
pub struct Registry {
    store: Arc<dyn RecordStore>,
}

impl Registry {
    /// Create a registry over an existing store
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Create a registry with a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRecordStore::new()))
    }

    /// Validate `input` and store it under its identifier
    pub async fn create(&self, input: &RecordInput) -> RegistryResult<Record> {
        let record = validate(input).map_err(|reason| {
            warn!("Rejected record payload: {}", reason.as_str());
            RegistryError::from(reason)
        })?;

        let identifier = record.identifier.clone();
        let stored = self.store.insert(record).await.map_err(|err| {
            warn!("Record {} already exists", identifier);
            RegistryError::from(err)
        })?;

        info!("Registered record {}", stored.identifier);
        Ok(stored)
    }

    /// Look up a single record
    pub async fn get(&self, identifier: &str) -> RegistryResult<Record> {
        debug!("Looking up record {}", identifier);
        self.store
            .get(identifier)
            .await
            .ok_or_else(|| RegistryError::not_found(identifier))
    }

    /// All records, in insertion order
    pub async fn list(&self) -> Vec<Record> {
        self.store.list().await
    }

    /// Number of stored records
    pub async fn count(&self) -> usize {
        self.store.len().await
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::in_memory()
    }
}
