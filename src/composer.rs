//! Turns a [`DocumentRequest`] into layout instructions and drives a renderer over them.

use kpdf_layout::{
    Heading, ImageBlock, ImageSkip, InstructionKind, LabeledField, LayoutInstruction, StyledRun,
    TableLayout, decode_image, mm,
};
use kpdf_render_core::{DocumentInfo, DocumentRenderer, FontError, PageSetup, RenderError};
use kpdf_render_lopdf::{FontSet, LopdfRenderer};
use kpdf_types::{
    Color, DocumentArtifact, DocumentRequest, ExecutorParam, HexColor, TextStyle,
};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_TITLE: &str = "Commercial Proposal";
const LOGO_HEIGHT_MM: f32 = 30.0;

/// Which executor variants get a parameters section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorVariants {
    /// Only the `first` variant.
    #[default]
    First,
    /// Only the `all` variant.
    All,
    /// Only the `last` variant.
    Last,
    /// `first`, `all` and `last`, in that order.
    Every,
}

/// How the parameter sections are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Bordered two-column tables with a shaded header.
    #[default]
    Tables,
    /// A section heading followed by `label: value` lines.
    Fields,
}

/// Where the fonts for document text come from.
///
/// A `regular` file takes precedence; otherwise the first installed family out of
/// `system_families` is used. With neither, text is set in Helvetica, which only
/// covers Latin-1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
    pub italic: Option<PathBuf>,
    pub bold_italic: Option<PathBuf>,
    pub system_families: Vec<String>,
}

impl FontSettings {
    /// Loads the configured faces.
    ///
    /// Unreadable font files are an error. Failing to find any of the system
    /// families only logs a warning and falls back to Helvetica.
    pub fn load(&self) -> Result<FontSet, FontError> {
        if let Some(regular) = &self.regular {
            return FontSet::from_files(
                regular,
                self.bold.as_deref(),
                self.italic.as_deref(),
                self.bold_italic.as_deref(),
            );
        }
        if self.system_families.is_empty() {
            return Ok(FontSet::standard());
        }
        FontSet::from_system(&self.system_families).or_else(|e| {
            log::warn!("{}; falling back to Helvetica, text outside Latin-1 will be lost", e);
            Ok(FontSet::standard())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ComposerSettings {
    pub title: String,
    pub executor_variants: ExecutorVariants,
    pub layout_mode: LayoutMode,
    pub fonts: FontSettings,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            executor_variants: ExecutorVariants::default(),
            layout_mode: LayoutMode::default(),
            fonts: FontSettings::default(),
        }
    }
}

/// The instruction list for one request, in drawing order.
#[derive(Debug, Clone)]
pub struct Composition {
    pub cart_id: i64,
    pub title: String,
    pub instructions: Vec<LayoutInstruction>,
    /// Logo images left out because their payload could not be used.
    pub skipped_images: Vec<ImageSkip>,
}

impl Composition {
    pub fn kinds(&self) -> Vec<InstructionKind> {
        self.instructions.iter().map(LayoutInstruction::kind).collect()
    }
}

/// One titled block of `label -> value` rows.
struct Section {
    title: String,
    header: [&'static str; 2],
    rows: Vec<(&'static str, String)>,
}

pub struct DocumentComposer {
    settings: ComposerSettings,
    table_layout: TableLayout,
    page_setup: PageSetup,
    fonts: FontSet,
}

impl Default for DocumentComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentComposer {
    /// Default settings, with text in the standard Helvetica faces.
    pub fn new() -> Self {
        Self {
            settings: ComposerSettings::default(),
            table_layout: TableLayout::default(),
            page_setup: PageSetup::a4(),
            fonts: FontSet::standard(),
        }
    }

    /// Applies `settings`, loading the fonts they name.
    pub fn from_settings(settings: ComposerSettings) -> Result<Self, FontError> {
        let fonts = settings.fonts.load()?;
        Ok(Self {
            settings,
            fonts,
            ..Self::new()
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.settings.title = title.into();
        self
    }

    pub fn with_executor_variants(mut self, variants: ExecutorVariants) -> Self {
        self.settings.executor_variants = variants;
        self
    }

    pub fn with_layout_mode(mut self, mode: LayoutMode) -> Self {
        self.settings.layout_mode = mode;
        self
    }

    pub fn with_table_layout(mut self, layout: TableLayout) -> Self {
        self.table_layout = layout;
        self
    }

    pub fn with_page_setup(mut self, setup: PageSetup) -> Self {
        self.page_setup = setup;
        self
    }

    pub fn with_fonts(mut self, fonts: FontSet) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn settings(&self) -> &ComposerSettings {
        &self.settings
    }

    /// Builds the ordered instruction list. Pure over the request.
    pub fn compose(&self, request: &DocumentRequest) -> Composition {
        let mut instructions = Vec::new();
        let mut skipped_images = Vec::new();

        instructions.push(Heading::title(&self.settings.title, title_color(request)).into());

        self.push_section(&mut instructions, information_section(request));

        let logo = &request.logo;
        if !logo.text.value.is_empty() {
            let style = TextStyle::from_flags(logo.text.bold, logo.text.italic, logo.text.underline);
            instructions.push(StyledRun::new(&logo.text.value, style).into());

            for (payload, caption) in [
                (&logo.square, "Square logo"),
                (&logo.rectangle, "Rectangular logo"),
            ] {
                if payload.is_empty() {
                    continue;
                }
                match decode_image(payload) {
                    Ok(image) => instructions.push(
                        ImageBlock {
                            image,
                            caption: caption.to_string(),
                            height: mm(LOGO_HEIGHT_MM),
                        }
                        .into(),
                    ),
                    Err(skip) => {
                        log::warn!("Cart {}: skipping {}: {}", request.cart_id, caption, skip);
                        skipped_images.push(skip);
                    }
                }
            }
        }

        for (variant, params) in self.executor_variants(request) {
            let title = match variant {
                Some(name) => format!("Executor Parameters ({name})"),
                None => "Executor Parameters".to_string(),
            };
            self.push_section(&mut instructions, executor_section(title, params));
        }

        self.push_section(&mut instructions, presentation_section(request));
        self.push_section(&mut instructions, style_section(request));

        log::debug!(
            "Composed {} instructions for cart {}",
            instructions.len(),
            request.cart_id
        );
        Composition {
            cart_id: request.cart_id,
            title: self.settings.title.clone(),
            instructions,
            skipped_images,
        }
    }

    /// Composes and renders with the built-in lopdf backend.
    pub fn render(&self, request: &DocumentRequest) -> Result<DocumentArtifact, RenderError> {
        let renderer = LopdfRenderer::new(self.page_setup).with_fonts(self.fonts.clone());
        self.render_with(request, Box::new(renderer))
    }

    pub fn render_with(
        &self,
        request: &DocumentRequest,
        mut renderer: Box<dyn DocumentRenderer>,
    ) -> Result<DocumentArtifact, RenderError> {
        let composition = self.compose(request);
        renderer.begin_document(&DocumentInfo::new(&composition.title))?;
        for instruction in &composition.instructions {
            renderer.render_instruction(instruction)?;
        }
        let pages = renderer.page_count();
        let bytes = renderer.finish()?;
        log::info!(
            "Rendered document for cart {}: {} page(s), {} bytes",
            composition.cart_id,
            pages,
            bytes.len()
        );
        Ok(DocumentArtifact::new(composition.cart_id, bytes))
    }

    /// Selected variants. The label is `None` when only the default variant is shown.
    fn executor_variants<'a>(
        &self,
        request: &'a DocumentRequest,
    ) -> Vec<(Option<&'static str>, &'a ExecutorParam)> {
        let params = &request.executor_parameters;
        match self.settings.executor_variants {
            ExecutorVariants::First => vec![(None, &params.first)],
            ExecutorVariants::All => vec![(Some("all"), &params.all)],
            ExecutorVariants::Last => vec![(Some("last"), &params.last)],
            ExecutorVariants::Every => vec![
                (Some("first"), &params.first),
                (Some("all"), &params.all),
                (Some("last"), &params.last),
            ],
        }
    }

    fn push_section(&self, instructions: &mut Vec<LayoutInstruction>, section: Section) {
        match self.settings.layout_mode {
            LayoutMode::Tables => {
                let rows: Vec<Vec<String>> = section
                    .rows
                    .into_iter()
                    .map(|(label, value)| vec![label.to_string(), value])
                    .collect();
                let table = self
                    .table_layout
                    .layout(&section.header, &rows)
                    .with_title(section.title);
                instructions.push(table.into());
            }
            LayoutMode::Fields => {
                instructions.push(Heading::section(section.title).into());
                for (label, value) in section.rows {
                    instructions.push(LabeledField::new(label, value).into());
                }
            }
        }
    }
}

fn title_color(request: &DocumentRequest) -> Color {
    let parsed = HexColor::parse(&request.style_template.color);
    if parsed == HexColor::Malformed {
        log::debug!(
            "Ignoring malformed style color {:?} for cart {}",
            request.style_template.color,
            request.cart_id
        );
    }
    parsed.color().unwrap_or(Color::BLACK)
}

fn information_section(request: &DocumentRequest) -> Section {
    Section {
        title: "Information".to_string(),
        header: ["Field", "Value"],
        rows: vec![
            ("User ID", request.user_id.to_string()),
            ("Cart ID", request.cart_id.to_string()),
            ("Publication ID", request.publication_id.to_string()),
            ("Count", request.count.to_string()),
        ],
    }
}

fn executor_section(title: String, params: &ExecutorParam) -> Section {
    Section {
        title,
        header: ["Parameter", "Value"],
        rows: vec![
            ("Show logo", params.show_logo.to_string()),
            ("Show name", params.show_name.clone()),
            ("Show contacts", params.show_contacts.clone()),
        ],
    }
}

fn presentation_section(request: &DocumentRequest) -> Section {
    let params = &request.presentation_parameters;
    Section {
        title: "Presentation Parameters".to_string(),
        header: ["Parameter", "Value"],
        rows: vec![
            ("List", params.list.to_string()),
            ("One by one", params.one_by_one.to_string()),
            ("Sum", params.sum.to_string()),
            ("Price", params.price.to_string()),
        ],
    }
}

fn style_section(request: &DocumentRequest) -> Section {
    let template = &request.style_template;
    let mut rows = vec![("Template ID", template.template_id.clone())];
    if !template.color.is_empty() {
        rows.push(("Color", template.color.clone()));
    }
    Section {
        title: "Style Template".to_string(),
        header: ["Parameter", "Value"],
        rows,
    }
}
