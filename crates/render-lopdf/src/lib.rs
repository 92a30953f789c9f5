//! PDF renderer for kpdf documents using lopdf.
//!
//! The whole document is assembled in memory as a `lopdf::Document` and serialized
//! once in [`LopdfRenderer::finish`](kpdf_render_core::DocumentRenderer::finish).
//! Text is set in the faces of a [`FontSet`]: embedded TrueType fonts when one is
//! configured, the standard Helvetica faces otherwise.

mod fonts;
mod images;
mod page;
mod renderer;
mod truetype;

pub use fonts::{FontFace, FontSet};
pub use renderer::LopdfRenderer;
pub use truetype::TrueTypeFont;
