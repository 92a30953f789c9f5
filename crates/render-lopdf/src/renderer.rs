use crate::fonts::{FontFace, FontSet, FontUsage};
use crate::images::{embed_image, flate_compress};
use crate::page::PageContext;
use kpdf_layout::{
    Heading, HeadingLevel, ImageBlock, LabeledField, LayoutInstruction, Size, StyledRun,
    TableBlock, mm,
};
use kpdf_render_core::utils::to_pdf_text_string;
use kpdf_render_core::{DocumentInfo, DocumentRenderer, PageSetup, RenderError};
use kpdf_types::Color;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

const BODY_FONT_SIZE: f32 = 10.0;
/// Baseline offset below the vertical centre of a line, as a fraction of the font size.
const BASELINE_SHIFT: f32 = 0.35;

/// Renders layout instructions into an in-memory `lopdf::Document`.
///
/// Content flows top to bottom from the top margin; whenever the next block would
/// cross the bottom break line a new page is started. Tables break between rows.
pub struct LopdfRenderer {
    document: Document,
    setup: PageSetup,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    xobjects: Dictionary,
    fonts: FontSet,
    font_usage: FontUsage,
    page: Option<PageContext>,
    cursor_y: f32,
    started: bool,
}

impl Default for LopdfRenderer {
    fn default() -> Self {
        Self::new(PageSetup::a4())
    }
}

impl LopdfRenderer {
    pub fn new(setup: PageSetup) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();

        Self {
            document,
            setup,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            xobjects: Dictionary::new(),
            fonts: FontSet::standard(),
            font_usage: FontUsage::default(),
            page: None,
            cursor_y: setup.margin_top,
            started: false,
        }
    }

    /// Draws text with `fonts` instead of the standard Helvetica faces.
    pub fn with_fonts(mut self, fonts: FontSet) -> Self {
        self.fonts = fonts;
        self
    }

    fn page_mut(&mut self) -> Result<&mut PageContext, RenderError> {
        self.page
            .as_mut()
            .ok_or(RenderError::InvalidState("document not started"))
    }

    fn start_page(&mut self) -> Result<(), RenderError> {
        self.flush_page()?;
        self.page = Some(PageContext::new(self.setup.height));
        self.cursor_y = self.setup.margin_top;
        log::trace!("Started page {}", self.page_ids.len() + 1);
        Ok(())
    }

    fn flush_page(&mut self) -> Result<(), RenderError> {
        let Some(page) = self.page.take() else {
            return Ok(());
        };

        let content = page.finish();
        let compressed = flate_compress(&content.encode()?)?;
        let content_stream = Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed);
        let content_id = self.document.add_object(content_stream);

        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.setup.width.into(), self.setup.height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Breaks to a new page unless `height` still fits above the break line.
    ///
    /// A block taller than a whole page is placed at the top of a fresh page and
    /// allowed to overflow rather than looping forever.
    fn ensure_space(&mut self, height: f32) -> Result<(), RenderError> {
        let at_top = self.cursor_y <= self.setup.margin_top;
        if !at_top && self.cursor_y + height > self.setup.break_line() {
            self.start_page()?;
        }
        Ok(())
    }

    fn draw_line(
        &mut self,
        text: &str,
        x: f32,
        line_height: f32,
        face: FontFace,
        size: f32,
        color: Color,
    ) -> Result<f32, RenderError> {
        let baseline = self.cursor_y + line_height / 2.0 + size * BASELINE_SHIFT;
        if !text.trim().is_empty() {
            let encoded = self.fonts.encode(text, face, &mut self.font_usage);
            self.page_mut()?.draw_text(encoded, x, baseline, size, color);
        }
        Ok(baseline)
    }

    fn render_heading(&mut self, heading: &Heading) -> Result<(), RenderError> {
        let size = heading.level.font_size();
        let line_height = match heading.level {
            HeadingLevel::Title => mm(10.0),
            HeadingLevel::Section => mm(8.0),
        };
        self.ensure_space(line_height)?;
        let x = self.setup.margin_left;
        self.draw_line(
            &heading.text,
            x,
            line_height,
            FontFace::Bold,
            size,
            heading.color,
        )?;
        self.cursor_y += line_height + mm(2.0);
        Ok(())
    }

    fn render_labeled_field(&mut self, field: &LabeledField) -> Result<(), RenderError> {
        let line_height = mm(6.0);
        self.ensure_space(line_height)?;

        let label = format!("{}:", field.label);
        let x = self.setup.margin_left;
        self.draw_line(
            &label,
            x,
            line_height,
            FontFace::Bold,
            BODY_FONT_SIZE,
            Color::BLACK,
        )?;
        let value_x = x
            + self.fonts.text_width(&label, FontFace::Bold, BODY_FONT_SIZE)
            + self.fonts.text_width(" ", FontFace::Regular, BODY_FONT_SIZE);
        self.draw_line(
            &field.value,
            value_x,
            line_height,
            FontFace::Regular,
            BODY_FONT_SIZE,
            Color::BLACK,
        )?;
        self.cursor_y += line_height;
        Ok(())
    }

    fn render_styled_run(&mut self, run: &StyledRun) -> Result<(), RenderError> {
        let face = FontFace::for_style(run.style);
        let line_height = run.font_size * 1.5;
        self.ensure_space(line_height)?;

        let x = self.setup.margin_left;
        let baseline = self.draw_line(&run.text, x, line_height, face, run.font_size, Color::BLACK)?;
        if run.style.is_underline() {
            let width = self.fonts.text_width(&run.text, face, run.font_size);
            self.page_mut()?
                .draw_underline(x, baseline, width, run.font_size, Color::BLACK);
        }
        self.cursor_y += line_height + mm(2.0);
        Ok(())
    }

    fn render_image(&mut self, block: &ImageBlock) -> Result<(), RenderError> {
        let embedded = match embed_image(&mut self.document, &block.image) {
            Ok(embedded) => embedded,
            Err(e) => {
                log::warn!("Skipping image '{}': {}", block.caption, e);
                return Ok(());
            }
        };

        let mut size = Size::new(embedded.width as f32, embedded.height as f32).fit_height(block.height);
        let max_width = self.setup.content_width();
        if size.width > max_width {
            size = Size::new(max_width, size.height * max_width / size.width);
        }
        let caption_height = if block.caption.trim().is_empty() { 0.0 } else { mm(6.0) };
        self.ensure_space(size.height + caption_height)?;

        let name = format!("Im{}", self.xobjects.len() + 1);
        self.xobjects.set(name.clone(), Object::Reference(embedded.id));

        let (x, y) = (self.setup.margin_left, self.cursor_y);
        self.page_mut()?.draw_image(&name, x, y, size.width, size.height);
        self.cursor_y += size.height;

        if caption_height > 0.0 {
            self.draw_line(
                &block.caption,
                x,
                caption_height,
                FontFace::Regular,
                BODY_FONT_SIZE,
                Color::BLACK,
            )?;
            self.cursor_y += caption_height;
        }
        self.cursor_y += mm(2.0);
        Ok(())
    }

    fn render_table(&mut self, table: &TableBlock) -> Result<(), RenderError> {
        let first_row_height = table.cells.first().map(|c| c.rect.height).unwrap_or(0.0);

        if let Some(title) = &table.title {
            let line_height = mm(8.0);
            // keep the caption on the same page as the header row
            self.ensure_space(line_height + first_row_height)?;
            let x = self.setup.margin_left;
            self.draw_line(
                title,
                x,
                line_height,
                FontFace::Bold,
                HeadingLevel::Section.font_size(),
                Color::BLACK,
            )?;
            self.cursor_y += line_height;
        }

        for row in table.rows() {
            let Some(first) = row.first() else {
                continue;
            };
            let row_height = first.rect.height;
            self.ensure_space(row_height)?;

            let top = self.cursor_y;
            let origin_x = self.setup.margin_left;
            let page = self
                .page
                .as_mut()
                .ok_or(RenderError::InvalidState("document not started"))?;
            for cell in row {
                let x = origin_x + cell.rect.x;
                if let Some(fill) = cell.kind.fill() {
                    page.fill_rect(x, top, cell.rect.width, row_height, fill);
                }
                page.stroke_rect(x, top, cell.rect.width, row_height, Color::BLACK);
                if cell.text.trim().is_empty() {
                    continue;
                }
                let baseline = top + row_height / 2.0 + BODY_FONT_SIZE * BASELINE_SHIFT;
                let face = FontFace::for_style(cell.kind.text_style());
                let encoded = self.fonts.encode(&cell.text, face, &mut self.font_usage);
                page.draw_text(encoded, x + mm(1.0), baseline, BODY_FONT_SIZE, Color::BLACK);
            }
            self.cursor_y += row_height;
        }

        self.cursor_y += mm(4.0);
        Ok(())
    }

}

impl DocumentRenderer for LopdfRenderer {
    fn begin_document(&mut self, info: &DocumentInfo) -> Result<(), RenderError> {
        if self.started {
            return Err(RenderError::InvalidState("document already started"));
        }
        self.started = true;

        let info_id = self.document.add_object(dictionary! {
            "Title" => Object::String(to_pdf_text_string(&info.title), StringFormat::Literal),
            "Producer" => Object::String(to_pdf_text_string(&info.producer), StringFormat::Literal),
        });
        self.document.trailer.set("Info", info_id);

        self.start_page()
    }

    fn render_instruction(&mut self, instruction: &LayoutInstruction) -> Result<(), RenderError> {
        if !self.started {
            return Err(RenderError::InvalidState("document not started"));
        }
        match instruction {
            LayoutInstruction::Heading(heading) => self.render_heading(heading),
            LayoutInstruction::LabeledField(field) => self.render_labeled_field(field),
            LayoutInstruction::StyledRun(run) => self.render_styled_run(run),
            LayoutInstruction::Image(block) => self.render_image(block),
            LayoutInstruction::Table(table) => self.render_table(table),
        }
    }

    fn page_count(&self) -> usize {
        self.page_ids.len() + usize::from(self.page.is_some())
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        let mut renderer = *self;
        if !renderer.started {
            return Err(RenderError::InvalidState(
                "document was never started with begin_document",
            ));
        }
        renderer.flush_page()?;

        let fonts = renderer
            .fonts
            .write_resources(&mut renderer.document, &renderer.font_usage)?;
        let mut resources = dictionary! { "Font" => fonts };
        if !renderer.xobjects.is_empty() {
            resources.set("XObject", std::mem::take(&mut renderer.xobjects));
        }
        renderer
            .document
            .objects
            .insert(renderer.resources_id, Object::Dictionary(resources));

        let kids: Vec<Object> = renderer.page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => renderer.page_ids.len() as i64,
        };
        renderer
            .document
            .objects
            .insert(renderer.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = renderer.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => renderer.pages_id,
        });
        renderer.document.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        renderer.document.save_to(&mut buffer)?;
        log::debug!(
            "Rendered {} page(s), {} bytes",
            renderer.page_ids.len(),
            buffer.len()
        );
        Ok(buffer)
    }
}
