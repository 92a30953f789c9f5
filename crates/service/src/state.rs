use kpdf::DocumentPipeline;
use std::sync::Arc;

/// Shared application state accessible to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Composer plus the artifact and record stores
    pub pipeline: Arc<DocumentPipeline>,
}

impl AppState {
    pub fn new(pipeline: DocumentPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
