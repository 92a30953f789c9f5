//! Upload of rendered documents to object storage.

use crate::clock::{Clock, SystemClock};
use crate::error::{ArtifactError, BoxError};
use async_trait::async_trait;
use kpdf_types::DocumentArtifact;
use serde::Serialize;
use std::sync::Arc;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A bucket/key blob store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `bytes` under `key`, replacing anything already there.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BoxError>;
}

/// Where an artifact ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredArtifact {
    pub bucket: String,
    pub key: String,
    pub size: usize,
}

/// `{upload_dir}/{cart_id}_{nanos}.pdf`, with trailing slashes trimmed from `upload_dir`.
pub fn storage_key(upload_dir: &str, cart_id: i64, nanos: i64) -> String {
    let dir = upload_dir.trim_end_matches('/');
    format!("{}/{}_{}.pdf", dir, cart_id, nanos)
}

pub struct ArtifactStore {
    objects: Arc<dyn ObjectStore>,
    bucket: String,
    upload_dir: String,
    clock: Arc<dyn Clock>,
}

impl ArtifactStore {
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        upload_dir: impl Into<String>,
    ) -> Self {
        Self {
            objects,
            bucket: bucket.into(),
            upload_dir: upload_dir.into(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Stores the artifact under a fresh timestamped key.
    ///
    /// Exactly one `put` is attempted; there is no retry and no check for an
    /// existing object.
    pub async fn upload(&self, artifact: DocumentArtifact) -> Result<StoredArtifact, ArtifactError> {
        let key = storage_key(&self.upload_dir, artifact.cart_id(), self.clock.now_nanos());
        let size = artifact.len();

        self.objects
            .put(&self.bucket, &key, artifact.into_bytes(), PDF_CONTENT_TYPE)
            .await
            .map_err(|source| ArtifactError::Put {
                bucket: self.bucket.clone(),
                key: key.clone(),
                source,
            })?;

        log::info!("Uploaded {} bytes to {}/{}", size, self.bucket, key);
        Ok(StoredArtifact {
            bucket: self.bucket.clone(),
            key,
            size,
        })
    }
}
