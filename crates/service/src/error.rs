use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kpdf::PipelineError;
use kpdf_storage::RecordError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Database unavailable: {0}")]
    Unavailable(#[from] RecordError),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, "InvalidRequest", self.to_string())
            }
            Self::Pipeline(ref e) => {
                tracing::error!(kind = ?e.kind(), "Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "An internal error occurred".to_string(),
                )
            }
            Self::Unavailable(_) => {
                tracing::error!("Health check failed: {}", self);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Unavailable",
                    "Database is not reachable".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
