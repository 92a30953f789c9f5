use crate::error::{Result, ServiceError};
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use kpdf_storage::{RecordId, StoredArtifact};
use kpdf_types::DocumentRequest;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub status: &'static str,
    pub id: RecordId,
}

fn accept(payload: std::result::Result<Json<DocumentRequest>, JsonRejection>) -> Result<DocumentRequest> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| ServiceError::InvalidRequest(rejection.body_text()))
}

/// Renders the request and archives the PDF to object storage.
pub async fn generate_document(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Json<StoredArtifact>> {
    let request = accept(payload)?;
    let cart_id = request.cart_id;
    tracing::info!(cart_id, "Generation request");

    let stored = state.pipeline.generate(request).await?;

    tracing::info!(cart_id, key = %stored.key, size = stored.size, "Document archived");
    Ok(Json(stored))
}

/// Archives the request parameters as a new record.
pub async fn save_parameters(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>> {
    let request = accept(payload)?;
    let id = state.pipeline.save(&request).await?;

    tracing::info!(cart_id = request.cart_id, %id, "Parameters saved");
    Ok(Json(SaveResponse { status: "saved", id }))
}
