//! Persistence for kpdf: rendered artifacts go to object storage, request
//! parameters go to PostgreSQL.
//!
//! Both stores are reached through traits ([`ObjectStore`], [`RecordStore`]) so the
//! pipeline can be driven against the in-memory implementations in [`memory`].

pub mod artifact;
pub mod clock;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod s3;
pub mod settings;

pub use artifact::{ArtifactStore, ObjectStore, PDF_CONTENT_TYPE, StoredArtifact, storage_key};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ArtifactError, BoxError, RecordError};
pub use postgres::PgRecordStore;
pub use record::{NewRecord, RecordId, RecordStore};
pub use s3::S3ObjectStore;
pub use settings::{DatabaseSettings, StorageSettings};
