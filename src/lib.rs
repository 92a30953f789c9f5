//! kpdf turns a structured document request into a paginated PDF, archives the
//! file to object storage and records the request parameters in PostgreSQL.
//!
//! The pieces live in their own crates; this crate wires them together:
//!
//! - [`DocumentComposer`] builds the instruction list and drives the lopdf renderer
//! - [`DocumentPipeline`] runs the `generate` and `save` operations against the stores

pub mod composer;
pub mod error;
pub mod pipeline;

pub use composer::{
    ComposerSettings, Composition, DEFAULT_TITLE, DocumentComposer, ExecutorVariants, FontSettings,
    LayoutMode,
};
pub use error::{ErrorKind, PipelineError};
pub use pipeline::DocumentPipeline;

pub use kpdf_layout as layout;
pub use kpdf_render_core as render;
pub use kpdf_storage as storage;
pub use kpdf_types as types;
