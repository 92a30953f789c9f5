//! HTTP transport for kpdf.
//!
//! - `POST /api/v1/pdfGen` renders a request and archives the PDF
//! - `POST /api/v1/pdf` records the request parameters
//! - `GET /health` checks the database

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use state::AppState;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health_check))
        .route("/api/v1/pdfGen", post(api::generate_document))
        .route("/api/v1/pdf", post(api::save_parameters))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
