use crate::error::Result;
use crate::state::AppState;
use axum::{Json, extract::State};
use serde_json::{Value, json};

/// 200 when the record store answers, 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>> {
    state.pipeline.records().health_check().await?;
    Ok(Json(json!({ "status": "ok" })))
}
