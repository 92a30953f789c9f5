use kpdf::DocumentComposer;
use kpdf::DocumentPipeline;
use kpdf_service::{build_router, config::Config, state::AppState};
use kpdf_storage::{ArtifactStore, PgRecordStore, RecordStore, S3ObjectStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting kpdf service...");

    let config = Config::load()?;
    tracing::info!("Configuration loaded");

    let records = PgRecordStore::connect(&config.database).await?;
    records.ensure_schema().await?;
    records.health_check().await?;
    tracing::info!("Database connected and schema ready");

    let objects = S3ObjectStore::from_settings(&config.storage).await;
    let artifacts = ArtifactStore::new(
        Arc::new(objects),
        config.storage.bucket.clone(),
        config.storage.upload_dir.clone(),
    );
    tracing::info!(
        "Artifacts go to bucket '{}' under '{}'",
        config.storage.bucket,
        config.storage.upload_dir
    );

    let composer = DocumentComposer::from_settings(config.document.clone())?;
    let pipeline = DocumentPipeline::new(composer, artifacts, Arc::new(records));
    let app = build_router(AppState::new(pipeline));

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("kpdf service listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - POST /api/v1/pdfGen (generate and archive)");
    tracing::info!("  - POST /api/v1/pdf    (save parameters)");
    tracing::info!("  - GET  /health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    // `init` also installs the `log` bridge, so records from the kpdf crates show up here.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,kpdf_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
