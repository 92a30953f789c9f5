//! Core rendering abstractions for kpdf documents.
//!
//! This crate provides the pieces shared by rendering backends:
//! - `DocumentRenderer` trait that consumes layout instructions in order
//! - Error types for rendering operations
//! - Page geometry and shared helpers for font naming, text encoding and coordinate conversion

mod error;
mod traits;
mod types;
pub mod utils;

pub use error::{FontError, RenderError};
pub use traits::DocumentRenderer;
pub use types::{DocumentInfo, PageSetup};
