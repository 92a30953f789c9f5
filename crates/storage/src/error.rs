use thiserror::Error;

/// Error type returned by [`ObjectStore`](crate::ObjectStore) backends.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("failed to store object '{key}' in bucket '{bucket}': {source}")]
    Put {
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },
}

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("failed to serialize '{field}' for storage: {source}")]
    Serialize {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("database connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("schema bootstrap failed: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("record insert failed: {0}")]
    Insert(#[source] sqlx::Error),

    #[error("database health check failed: {0}")]
    Health(#[source] sqlx::Error),
}
