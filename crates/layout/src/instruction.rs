//! The drawing vocabulary shared by the composer and the renderers.

use crate::image::DecodedImage;
use crate::table::TableBlock;
use kpdf_types::{Color, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// The document title, drawn once at the top of the first page.
    Title,
    /// A section caption inside the body.
    Section,
}

impl HeadingLevel {
    pub fn font_size(self) -> f32 {
        match self {
            HeadingLevel::Title => 18.0,
            HeadingLevel::Section => 14.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub text: String,
    pub level: HeadingLevel,
    pub color: Color,
}

impl Heading {
    pub fn title(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            level: HeadingLevel::Title,
            color,
        }
    }

    pub fn section(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: HeadingLevel::Section,
            color: Color::BLACK,
        }
    }
}

/// A single `label: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledField {
    pub label: String,
    pub value: String,
}

impl LabeledField {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

/// A line of text drawn with explicit emphasis.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub style: TextStyle,
    pub font_size: f32,
}

impl StyledRun {
    pub const DEFAULT_FONT_SIZE: f32 = 12.0;

    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            font_size: Self::DEFAULT_FONT_SIZE,
        }
    }
}

/// An embedded raster, scaled to a fixed height, with a caption underneath.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub image: DecodedImage,
    pub caption: String,
    /// Display height in points; the width follows the raster's aspect ratio.
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutInstruction {
    Heading(Heading),
    LabeledField(LabeledField),
    StyledRun(StyledRun),
    Image(ImageBlock),
    Table(TableBlock),
}

/// Payload-free tag of a [`LayoutInstruction`], handy for assertions and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Heading,
    LabeledField,
    StyledRun,
    Image,
    Table,
}

impl LayoutInstruction {
    pub fn kind(&self) -> InstructionKind {
        match self {
            LayoutInstruction::Heading(_) => InstructionKind::Heading,
            LayoutInstruction::LabeledField(_) => InstructionKind::LabeledField,
            LayoutInstruction::StyledRun(_) => InstructionKind::StyledRun,
            LayoutInstruction::Image(_) => InstructionKind::Image,
            LayoutInstruction::Table(_) => InstructionKind::Table,
        }
    }
}

impl From<Heading> for LayoutInstruction {
    fn from(value: Heading) -> Self {
        LayoutInstruction::Heading(value)
    }
}

impl From<LabeledField> for LayoutInstruction {
    fn from(value: LabeledField) -> Self {
        LayoutInstruction::LabeledField(value)
    }
}

impl From<StyledRun> for LayoutInstruction {
    fn from(value: StyledRun) -> Self {
        LayoutInstruction::StyledRun(value)
    }
}

impl From<ImageBlock> for LayoutInstruction {
    fn from(value: ImageBlock) -> Self {
        LayoutInstruction::Image(value)
    }
}

impl From<TableBlock> for LayoutInstruction {
    fn from(value: TableBlock) -> Self {
        LayoutInstruction::Table(value)
    }
}
