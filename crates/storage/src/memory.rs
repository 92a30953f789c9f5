//! In-process stores, for tests and local runs without S3 or PostgreSQL.

use crate::artifact::ObjectStore;
use crate::error::{BoxError, RecordError};
use crate::record::{NewRecord, RecordId, RecordStore};
use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Keeps every `put` in memory, or rejects all of them with a fixed message.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<Vec<StoredObject>>,
    attempts: AtomicUsize,
    failure: Option<String>,
}

impl InMemoryObjectStore {
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// Successful writes, oldest first.
    pub fn puts(&self) -> Vec<StoredObject> {
        lock(&self.objects).clone()
    }

    /// Number of `put` calls, failed ones included.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BoxError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(message.clone().into());
        }
        lock(&self.objects).push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            bytes,
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedRecord {
    pub id: RecordId,
    pub record: NewRecord,
    pub save_required: bool,
}

/// Record store backed by a vector. Ids start at 1, like `BIGSERIAL`.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    rows: Mutex<Vec<SavedRecord>>,
    next_id: AtomicI64,
    schema_calls: AtomicUsize,
    fail_inserts: bool,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            schema_calls: AtomicUsize::new(0),
            fail_inserts: false,
        }
    }
}

impl InMemoryRecordStore {
    /// A store whose inserts fail as if the pool had been closed.
    pub fn failing() -> Self {
        Self {
            fail_inserts: true,
            ..Default::default()
        }
    }

    pub fn rows(&self) -> Vec<SavedRecord> {
        lock(&self.rows).clone()
    }

    pub fn schema_calls(&self) -> usize {
        self.schema_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn ensure_schema(&self) -> Result<(), RecordError> {
        self.schema_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn save(&self, record: &NewRecord) -> Result<RecordId, RecordError> {
        if self.fail_inserts {
            return Err(RecordError::Insert(sqlx::Error::PoolClosed));
        }
        let id = RecordId(self.next_id.fetch_add(1, Ordering::SeqCst));
        lock(&self.rows).push(SavedRecord {
            id,
            record: record.clone(),
            save_required: true,
        });
        Ok(id)
    }

    async fn health_check(&self) -> Result<(), RecordError> {
        if self.fail_inserts {
            return Err(RecordError::Health(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}
