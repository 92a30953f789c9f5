//! Font faces for document text.
//!
//! Text is drawn in one of four emphasis slots. A [`FontSet`] backs the slots with
//! embedded TrueType faces when one is configured; otherwise the standard Helvetica
//! faces are used, which only cover Latin-1.

use crate::truetype::{GlyphUsage, TrueTypeFont, encode_glyph_ids};
use kpdf_render_core::utils::{get_styled_font_name, to_win_ansi};
use kpdf_render_core::{FontError, RenderError};
use kpdf_types::TextStyle;
use lopdf::{Dictionary, Document, StringFormat, dictionary};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

const STANDARD_FAMILY: &str = "Helvetica";

/// Emphasis slot a run of text is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
    BoldOblique,
}

static FACES_BY_STANDARD_NAME: Lazy<HashMap<&'static str, FontFace>> = Lazy::new(|| {
    FontFace::ALL
        .iter()
        .map(|face| (face.standard_name(), *face))
        .collect()
});

impl FontFace {
    pub const ALL: [FontFace; 4] = [
        FontFace::Regular,
        FontFace::Bold,
        FontFace::Oblique,
        FontFace::BoldOblique,
    ];

    pub fn for_style(style: TextStyle) -> Self {
        let name = get_styled_font_name(STANDARD_FAMILY, style);
        FACES_BY_STANDARD_NAME
            .get(name.as_str())
            .copied()
            .unwrap_or(FontFace::Regular)
    }

    /// PostScript name of the standard-14 face used when no TrueType face backs the slot.
    pub fn standard_name(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Oblique => "Helvetica-Oblique",
            FontFace::BoldOblique => "Helvetica-BoldOblique",
        }
    }

    /// Key of this slot in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Oblique => "F3",
            FontFace::BoldOblique => "F4",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Slots whose embedded face stands in when this one has none, nearest first.
    fn fallbacks(self) -> &'static [FontFace] {
        match self {
            FontFace::Regular => &[],
            FontFace::Bold | FontFace::Oblique => &[FontFace::Regular],
            FontFace::BoldOblique => &[FontFace::Bold, FontFace::Oblique, FontFace::Regular],
        }
    }

    fn is_bold(self) -> bool {
        matches!(self, FontFace::Bold | FontFace::BoldOblique)
    }

    /// Helvetica advance width in 1/1000 em. Oblique faces share the upright metrics.
    fn standard_char_width(self, c: char) -> u16 {
        let table = if self.is_bold() {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };
        match c as u32 {
            code @ 32..=126 => table[(code - 32) as usize],
            _ => DEFAULT_WIDTH,
        }
    }
}

/// A string ready for `Tj`, with the font resource it must be shown in.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EncodedText {
    pub resource: &'static str,
    pub bytes: Vec<u8>,
    pub format: StringFormat,
}

/// What each embedded slot has drawn over the life of one document.
#[derive(Debug, Default)]
pub(crate) struct FontUsage {
    glyphs: [GlyphUsage; 4],
    drawn: [bool; 4],
}

/// The faces a document is drawn with.
///
/// An empty set draws everything in Helvetica. Once a slot has a TrueType face,
/// slots without one borrow the nearest embedded face instead of dropping to
/// Helvetica, so text outside Latin-1 is never replaced.
#[derive(Debug, Clone, Default)]
pub struct FontSet {
    faces: [Option<Arc<TrueTypeFont>>; 4],
}

impl FontSet {
    /// Standard Helvetica faces only; nothing is embedded.
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn new(regular: TrueTypeFont) -> Self {
        Self::standard().with_face(FontFace::Regular, regular)
    }

    pub fn with_face(mut self, face: FontFace, font: TrueTypeFont) -> Self {
        self.faces[face.index()] = Some(Arc::new(font));
        self
    }

    pub fn is_standard(&self) -> bool {
        self.faces.iter().all(Option::is_none)
    }

    /// Loads the regular face and whichever emphasis faces are given.
    pub fn from_files(
        regular: &Path,
        bold: Option<&Path>,
        italic: Option<&Path>,
        bold_italic: Option<&Path>,
    ) -> Result<Self, FontError> {
        let mut set = FontSet::new(TrueTypeFont::from_file(regular)?);
        for (face, path) in [
            (FontFace::Bold, bold),
            (FontFace::Oblique, italic),
            (FontFace::BoldOblique, bold_italic),
        ] {
            if let Some(path) = path {
                set = set.with_face(face, TrueTypeFont::from_file(path)?);
            }
        }
        Ok(set)
    }

    /// Takes the first installed family out of `families`, with its bold, italic and
    /// bold-italic faces where the family has them.
    pub fn from_system(families: &[String]) -> Result<Self, FontError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("fontdb loaded {} system face(s)", db.len());
        Self::from_database(&db, families)
    }

    fn from_database(db: &fontdb::Database, families: &[String]) -> Result<Self, FontError> {
        let names: Vec<fontdb::Family<'_>> = families
            .iter()
            .map(|family| fontdb::Family::Name(family.as_str()))
            .collect();
        let query = |weight, style| {
            db.query(&fontdb::Query {
                families: &names,
                weight,
                stretch: fontdb::Stretch::Normal,
                style,
            })
        };
        let load = |id: fontdb::ID| {
            db.with_face_data(id, |data, index| TrueTypeFont::from_bytes(data.to_vec(), index))
                .unwrap_or_else(|| Err(FontError::NotFound(format!("face {id:?}"))))
        };

        let regular_id = query(fontdb::Weight::NORMAL, fontdb::Style::Normal)
            .ok_or_else(|| FontError::NotFound(families.join(", ")))?;
        let mut set = FontSet::new(load(regular_id)?);
        let mut loaded = vec![regular_id];

        for (face, weight, style) in [
            (FontFace::Bold, fontdb::Weight::BOLD, fontdb::Style::Normal),
            (FontFace::Oblique, fontdb::Weight::NORMAL, fontdb::Style::Italic),
            (FontFace::BoldOblique, fontdb::Weight::BOLD, fontdb::Style::Italic),
        ] {
            // closest-match hits on a face already loaded are left to the fallback chain
            let Some(id) = query(weight, style).filter(|id| !loaded.contains(id)) else {
                continue;
            };
            match load(id) {
                Ok(font) => {
                    loaded.push(id);
                    set = set.with_face(face, font);
                }
                Err(e) => log::warn!("Skipping {:?} face: {}", face, e),
            }
        }

        if let Some(font) = set.faces[FontFace::Regular.index()].as_deref() {
            log::info!("Using system font {}", font.postscript_name());
        }
        Ok(set)
    }

    /// The embedded face `face` is drawn with, and the slot that owns it.
    fn embedded(&self, face: FontFace) -> Option<(FontFace, &TrueTypeFont)> {
        std::iter::once(face)
            .chain(face.fallbacks().iter().copied())
            .find_map(|slot| self.faces[slot.index()].as_deref().map(|font| (slot, font)))
    }

    /// Width of `text` in points when set in `face` at `size`.
    pub fn text_width(&self, text: &str, face: FontFace, size: f32) -> f32 {
        match self.embedded(face) {
            Some((_, font)) => font.text_width(text, size),
            None => {
                let units: u32 = text.chars().map(|c| face.standard_char_width(c) as u32).sum();
                units as f32 * size / 1000.0
            }
        }
    }

    pub(crate) fn encode(&self, text: &str, face: FontFace, usage: &mut FontUsage) -> EncodedText {
        let Some((slot, font)) = self.embedded(face) else {
            return EncodedText {
                resource: face.resource_name(),
                bytes: to_win_ansi(text),
                format: StringFormat::Literal,
            };
        };

        let glyphs = font.glyphs(text);
        let used = &mut usage.glyphs[slot.index()];
        for &(c, gid, _) in &glyphs {
            if gid == 0 {
                log::warn!("{} has no glyph for {:?}", font.postscript_name(), c);
            } else {
                used.entry(gid).or_insert(c);
            }
        }
        usage.drawn[slot.index()] = true;

        EncodedText {
            resource: slot.resource_name(),
            bytes: encode_glyph_ids(&glyphs),
            format: StringFormat::Hexadecimal,
        }
    }

    /// Adds the font objects to `doc` and returns the `/Font` resource dictionary.
    ///
    /// Slots drawn in Helvetica are always listed; embedded faces only once
    /// something has been drawn with them.
    pub(crate) fn write_resources(
        &self,
        doc: &mut Document,
        usage: &FontUsage,
    ) -> Result<Dictionary, RenderError> {
        let mut fonts = Dictionary::new();
        for face in FontFace::ALL {
            match self.faces[face.index()].as_deref() {
                Some(font) if usage.drawn[face.index()] => {
                    let font_id = font.embed(doc, &usage.glyphs[face.index()])?;
                    fonts.set(face.resource_name(), font_id);
                }
                Some(_) => {}
                None if self.embedded(face).is_none() => {
                    let font_id = doc.add_object(dictionary! {
                        "Type" => "Font",
                        "Subtype" => "Type1",
                        "BaseFont" => face.standard_name(),
                        "Encoding" => "WinAnsiEncoding",
                    });
                    fonts.set(face.resource_name(), font_id);
                }
                None => {}
            }
        }
        Ok(fonts)
    }
}

const DEFAULT_WIDTH: u16 = 556;

// AFM advance widths for codes 32..=126.
#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];
