pub mod color;
pub mod document;
pub mod geometry;
pub mod request;
pub mod style;

pub use color::{Color, HexColor};
pub use document::DocumentArtifact;
pub use geometry::{Rect, Size};
pub use request::{
    DocumentRequest, ExecutorParam, ExecutorParameters, Logo, LogoText, PresentationParameters,
    StyleTemplate,
};
pub use style::TextStyle;
