//! Archival of request parameters.

use crate::error::RecordError;
use async_trait::async_trait;
use kpdf_types::DocumentRequest;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Database-assigned identifier of a saved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The row written for one request. The JSON blobs are stored verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub user_id: i64,
    pub cart_id: i64,
    pub publication_id: i64,
    pub logo: Value,
    pub executor_parameters: Value,
    pub presentation_parameters: Value,
    pub style_template: Value,
    pub count: i64,
}

fn to_blob<T: Serialize>(field: &'static str, value: &T) -> Result<Value, RecordError> {
    serde_json::to_value(value).map_err(|source| RecordError::Serialize { field, source })
}

impl NewRecord {
    pub fn from_request(request: &DocumentRequest) -> Result<Self, RecordError> {
        Ok(Self {
            user_id: request.user_id,
            cart_id: request.cart_id,
            publication_id: request.publication_id,
            logo: to_blob("logo", &request.logo)?,
            executor_parameters: to_blob("executor_parameters", &request.executor_parameters)?,
            presentation_parameters: to_blob(
                "presentation_parameters",
                &request.presentation_parameters,
            )?,
            style_template: to_blob("style_template", &request.style_template)?,
            count: i64::from(request.count),
        })
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Creates the table if it does not exist. Safe to call repeatedly.
    async fn ensure_schema(&self) -> Result<(), RecordError>;

    /// Inserts one row with `save_required = true` and both timestamps set to now.
    async fn save(&self, record: &NewRecord) -> Result<RecordId, RecordError>;

    async fn health_check(&self) -> Result<(), RecordError>;
}
