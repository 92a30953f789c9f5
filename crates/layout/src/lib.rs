//! Layout primitives for kpdf documents.
//!
//! The composer describes a document as an ordered list of [`LayoutInstruction`]s.
//! This crate owns that vocabulary plus the two pieces of geometry/decoding logic the
//! composer relies on: [`TableLayout`] for fixed-width cell placement and
//! [`decode_image`] for embedded base64 rasters.

pub mod image;
pub mod instruction;
pub mod table;
pub mod units;

pub use self::image::{DecodedImage, ImageFormat, ImageSkip, decode_image};
pub use self::instruction::{
    Heading, HeadingLevel, ImageBlock, InstructionKind, LabeledField, LayoutInstruction, StyledRun,
};
pub use self::table::{CellKind, CellPlacement, TableBlock, TableLayout};
pub use self::units::{PT_PER_MM, mm};

// Re-export shared types so renderers need a single import path
pub use kpdf_types::{Color, Rect, Size, TextStyle};
