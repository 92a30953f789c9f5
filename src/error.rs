use kpdf_render_core::RenderError;
use kpdf_storage::{ArtifactError, RecordError};
use thiserror::Error;

/// Failure of one pipeline operation.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Composition failed: {0}")]
    Composition(#[from] RenderError),

    #[error("Artifact persistence failed: {0}")]
    ArtifactPersistence(#[from] ArtifactError),

    #[error("Record persistence failed: {0}")]
    RecordPersistence(#[from] RecordError),
}

/// Coarse classification of a [`PipelineError`], for callers that only branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Composition,
    ArtifactPersistence,
    RecordPersistence,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Composition(_) => ErrorKind::Composition,
            PipelineError::ArtifactPersistence(_) => ErrorKind::ArtifactPersistence,
            PipelineError::RecordPersistence(_) => ErrorKind::RecordPersistence,
        }
    }

    pub fn is_persistence(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ArtifactPersistence | ErrorKind::RecordPersistence
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        let err = PipelineError::from(RenderError::InvalidState("document not started"));
        assert_eq!(err.kind(), ErrorKind::Composition);
        assert!(!err.is_persistence());

        let err = PipelineError::from(ArtifactError::Put {
            bucket: "docs".into(),
            key: "kp/1_1.pdf".into(),
            source: "denied".into(),
        });
        assert_eq!(err.kind(), ErrorKind::ArtifactPersistence);
        assert!(err.is_persistence());
        assert!(err.to_string().contains("kp/1_1.pdf"));
    }
}
