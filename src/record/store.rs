//! In-memory record store
//!
//! Records are keyed by identifier with insert-if-absent semantics. Once a
//! record is present it is never replaced or removed by normal operations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use super::types::Record;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this identifier is already stored
    #[error("Usuário com este CPF já existe.")]
    DuplicateIdentifier { identifier: String },
}

impl StoreError {
    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateIdentifier { .. })
    }
}

/// Keyed storage of validated records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record unless its identifier is already taken
    async fn insert(&self, record: Record) -> StoreResult<Record>;

    /// Load a record by identifier
    async fn get(&self, identifier: &str) -> Option<Record>;

    /// All stored records
    async fn list(&self) -> Vec<Record>;

    /// Number of stored records
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every record. Used by tests and process-level resets only.
    async fn clear(&self);
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<String, Record>,
    order: Vec<String>,
}

/// Store backed by a hash map behind a single async read/write lock.
///
/// `list` returns records in insertion order. Cloning the store yields a
/// handle to the same underlying records.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, record: Record) -> StoreResult<Record> {
        // Existence check and write happen under one guard.
        let mut inner = self.inner.write().await;

        if inner.records.contains_key(&record.identifier) {
            debug!("Rejecting duplicate identifier {}", record.identifier);
            return Err(StoreError::DuplicateIdentifier {
                identifier: record.identifier,
            });
        }

        inner.order.push(record.identifier.clone());
        inner
            .records
            .insert(record.identifier.clone(), record.clone());

        debug!("Stored record {} ({} total)", record.identifier, inner.order.len());
        Ok(record)
    }

    async fn get(&self, identifier: &str) -> Option<Record> {
        self.inner.read().await.records.get(identifier).cloned()
    }

    async fn list(&self) -> Vec<Record> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|identifier| inner.records.get(identifier).cloned())
            .collect()
    }

    async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.records.clear();
        inner.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(identifier: &str, name: &str, birth_date: &str) -> Record {
        Record {
            identifier: identifier.to_string(),
            name: name.to_string(),
            birth_date: birth_date.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = MemoryRecordStore::new();
        let stored = store
            .insert(record("12345678901", "José dos Santos", "1970-09-06"))
            .await
            .unwrap();

        assert_eq!(stored.name, "José dos Santos");
        assert_eq!(store.get("12345678901").await, Some(stored));
    }

    #[tokio::test]
    async fn test_duplicate_keeps_first_record() {
        let store = MemoryRecordStore::new();
        store
            .insert(record("11111111111", "Ana", "2000-01-01"))
            .await
            .unwrap();

        let err = store
            .insert(record("11111111111", "Outra", "1990-05-05"))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(
            err,
            StoreError::DuplicateIdentifier {
                identifier: "11111111111".to_string()
            }
        );
        assert_eq!(store.len().await, 1);

        let kept = store.get("11111111111").await.unwrap();
        assert_eq!(kept.name, "Ana");
        assert_eq!(kept.birth_date, "2000-01-01");
    }

    #[tokio::test]
    async fn test_get_unknown_identifier() {
        let store = MemoryRecordStore::new();
        assert!(store.get("99999999999").await.is_none());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryRecordStore::new();
        assert!(store.list().await.is_empty());
        assert!(store.is_empty().await);

        for identifier in ["33333333333", "11111111111", "22222222222"] {
            store
                .insert(record(identifier, "Nome", "2000-01-01"))
                .await
                .unwrap();
        }

        let identifiers: Vec<String> = store
            .list()
            .await
            .into_iter()
            .map(|r| r.identifier)
            .collect();
        assert_eq!(identifiers, ["33333333333", "11111111111", "22222222222"]);
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = MemoryRecordStore::new();
        let handle = store.clone();

        handle
            .insert(record("11111111111", "Ana", "2000-01-01"))
            .await
            .unwrap();

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_empties_store() {
        let store = MemoryRecordStore::new();
        store
            .insert(record("11111111111", "Ana", "2000-01-01"))
            .await
            .unwrap();

        store.clear().await;

        assert!(store.is_empty().await);
        assert!(store.list().await.is_empty());
        assert!(store
            .insert(record("11111111111", "Ana", "2000-01-01"))
            .await
            .is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_single_winner() {
        let store = MemoryRecordStore::new();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(record("55555555555", &format!("Nome {i}"), "2000-01-01"))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(err) if err.is_conflict() => conflicts += 1,
                Err(err) => panic!("unexpected error: {err}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 31);
        assert_eq!(store.len().await, 1);
    }
}
