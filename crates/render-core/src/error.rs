use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("Font not found: {0}")]
    NotFound(String),

    #[error("Failed to load font '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid font data: {0}")]
    InvalidData(String),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Image embedding error: {0}")]
    Image(String),
    #[error("Font error: {0}")]
    Font(#[from] FontError),
    #[error("Renderer used out of order: {0}")]
    InvalidState(&'static str),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = RenderError::InvalidState("document not started");
        assert_eq!(err.to_string(), "Renderer used out of order: document not started");
        let err: RenderError = "boom".into();
        assert!(matches!(err, RenderError::Other(ref m) if m == "boom"));

        let err: RenderError = FontError::LoadFailed {
            path: "fonts/missing.ttf".into(),
            message: "No such file".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Font error: Failed to load font 'fonts/missing.ttf': No such file"
        );
    }
}
