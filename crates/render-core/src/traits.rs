use crate::error::RenderError;
use crate::types::DocumentInfo;
use kpdf_layout::LayoutInstruction;

/// A backend that turns an ordered stream of layout instructions into a finished file.
///
/// Instructions are drawn top to bottom in the order received; the renderer owns
/// pagination. `finish` consumes the renderer and returns the encoded document.
pub trait DocumentRenderer {
    fn begin_document(&mut self, info: &DocumentInfo) -> Result<(), RenderError>;

    fn render_instruction(&mut self, instruction: &LayoutInstruction) -> Result<(), RenderError>;

    /// Pages emitted so far, including the one in progress.
    fn page_count(&self) -> usize;

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError>;
}
