//! The two request-level operations: generate-and-archive, and save-parameters.

use crate::composer::DocumentComposer;
use crate::error::PipelineError;
use kpdf_render_core::RenderError;
use kpdf_storage::{ArtifactStore, NewRecord, RecordId, RecordStore, StoredArtifact};
use kpdf_types::DocumentRequest;
use std::sync::Arc;

pub struct DocumentPipeline {
    composer: Arc<DocumentComposer>,
    artifacts: ArtifactStore,
    records: Arc<dyn RecordStore>,
}

impl DocumentPipeline {
    pub fn new(
        composer: DocumentComposer,
        artifacts: ArtifactStore,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            composer: Arc::new(composer),
            artifacts,
            records,
        }
    }

    pub fn composer(&self) -> &DocumentComposer {
        &self.composer
    }

    pub fn records(&self) -> &Arc<dyn RecordStore> {
        &self.records
    }

    /// Renders the request and uploads the result.
    ///
    /// Rendering is CPU-bound and runs on the blocking pool; the upload is a single
    /// attempt. Nothing is recorded in the record store.
    pub async fn generate(&self, request: DocumentRequest) -> Result<StoredArtifact, PipelineError> {
        let composer = Arc::clone(&self.composer);
        let artifact = tokio::task::spawn_blocking(move || composer.render(&request))
            .await
            .map_err(|e| RenderError::Other(format!("render task aborted: {e}")))??;

        Ok(self.artifacts.upload(artifact).await?)
    }

    /// Archives the request parameters as one new row.
    pub async fn save(&self, request: &DocumentRequest) -> Result<RecordId, PipelineError> {
        let record = NewRecord::from_request(request)?;
        let id = self.records.save(&record).await?;
        log::info!("Saved parameters for cart {} as record {}", request.cart_id, id);
        Ok(id)
    }
}
