pub mod fixtures;
pub mod pdf_assertions;

use kpdf::DocumentComposer;
use kpdf::types::DocumentRequest;
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    pub fn text(&self) -> String {
        pdf_assertions::extract_text(&self.doc)
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Render a request with the given composer and load the result back
pub fn render_with(
    composer: &DocumentComposer,
    request: &DocumentRequest,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let artifact = composer.render(request)?;
    GeneratedPdf::from_bytes(artifact.into_bytes())
}

/// Render a request with the default composer
pub fn render(request: &DocumentRequest) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    render_with(&DocumentComposer::new(), request)
}
