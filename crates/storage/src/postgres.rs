//! PostgreSQL [`RecordStore`].

use crate::error::RecordError;
use crate::record::{NewRecord, RecordId, RecordStore};
use crate::settings::DatabaseSettings;
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

const SCHEMA_SQL: &str = include_str!("../migrations/001_document_records.sql");

const INSERT_SQL: &str = r#"
    INSERT INTO document_records (
        id_user, id_cart, id_publication,
        logo, executor_parameters, presentation_parameters, style_template,
        count, save_required, created_at, updated_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, now(), now())
    RETURNING id
"#;

#[derive(Clone, Debug)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, RecordError> {
        let options = PgPoolOptions::new().max_connections(settings.max_connections);
        let pool = match &settings.url {
            Some(url) => options.connect(url).await,
            None => {
                let connect = PgConnectOptions::new()
                    .host(&settings.host)
                    .port(settings.port)
                    .username(&settings.user)
                    .password(&settings.password)
                    .database(&settings.name);
                options.connect_with(connect).await
            }
        }
        .map_err(RecordError::Connect)?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn ensure_schema(&self) -> Result<(), RecordError> {
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .map_err(RecordError::Schema)?;
        log::info!("document_records schema ready");
        Ok(())
    }

    async fn save(&self, record: &NewRecord) -> Result<RecordId, RecordError> {
        let id: i64 = sqlx::query_scalar(INSERT_SQL)
            .bind(record.user_id)
            .bind(record.cart_id)
            .bind(record.publication_id)
            .bind(&record.logo)
            .bind(&record.executor_parameters)
            .bind(&record.presentation_parameters)
            .bind(&record.style_template)
            .bind(record.count)
            .fetch_one(&self.pool)
            .await
            .map_err(RecordError::Insert)?;

        log::info!("Saved record {} for cart {}", id, record.cart_id);
        Ok(RecordId(id))
    }

    async fn health_check(&self) -> Result<(), RecordError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(RecordError::Health)?;
        Ok(())
    }
}
