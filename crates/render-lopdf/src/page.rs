//! Content-stream builder for a single page.
//!
//! Callers work in top-down layout coordinates; the flip to PDF's bottom-up
//! space happens here.

use crate::fonts::EncodedText;
use kpdf_render_core::utils::flip_y;
use kpdf_types::Color;
use lopdf::Object;
use lopdf::content::{Content, Operation};

#[derive(Debug, Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<&'static str>,
    font_size: f32,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

pub(crate) struct PageContext {
    page_height: f32,
    content: Content,
    state: PageRenderState,
}

impl PageContext {
    pub(crate) fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
        }
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, op: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(op, operands));
    }

    fn set_font(&mut self, resource: &'static str, size: f32) {
        if self.state.font != Some(resource) || self.state.font_size != size {
            self.push(
                "Tf",
                vec![Object::Name(resource.as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some(resource);
            self.state.font_size = size;
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        if self.state.stroke_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke_color = Some(color);
        }
        if self.state.line_width != Some(width) {
            self.push("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
    }

    pub(crate) fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.set_fill_color(color);
        let pdf_y = flip_y(y + height, self.page_height);
        self.push("re", vec![x.into(), pdf_y.into(), width.into(), height.into()]);
        self.push("f", vec![]);
    }

    pub(crate) fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.set_stroke(color, 0.5);
        let pdf_y = flip_y(y + height, self.page_height);
        self.push("re", vec![x.into(), pdf_y.into(), width.into(), height.into()]);
        self.push("S", vec![]);
    }

    /// Draws one line of text whose baseline sits at `baseline_y`.
    pub(crate) fn draw_text(
        &mut self,
        text: EncodedText,
        x: f32,
        baseline_y: f32,
        size: f32,
        color: Color,
    ) {
        if text.bytes.is_empty() {
            return;
        }
        self.push("BT", vec![]);
        self.set_font(text.resource, size);
        self.set_fill_color(color);
        let pdf_y = flip_y(baseline_y, self.page_height);
        self.push("Td", vec![x.into(), pdf_y.into()]);
        self.push("Tj", vec![Object::String(text.bytes, text.format)]);
        self.push("ET", vec![]);
    }

    /// Rule of `width` under a run of text, at the Helvetica underline position and thickness.
    pub(crate) fn draw_underline(
        &mut self,
        x: f32,
        baseline_y: f32,
        width: f32,
        size: f32,
        color: Color,
    ) {
        if width <= 0.0 {
            return;
        }
        let line_y = flip_y(baseline_y + size * 0.1, self.page_height);
        self.set_stroke(color, size * 0.05);
        self.push("m", vec![x.into(), line_y.into()]);
        self.push("l", vec![(x + width).into(), line_y.into()]);
        self.push("S", vec![]);
    }

    /// Paints an image XObject into the box whose top-left corner is (`x`, `y`).
    pub(crate) fn draw_image(&mut self, name: &str, x: f32, y: f32, width: f32, height: f32) {
        let pdf_y = flip_y(y + height, self.page_height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                width.into(),
                0.into(),
                0.into(),
                height.into(),
                x.into(),
                pdf_y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }
}
