//! TrueType faces embedded as Type0/CIDFontType2 fonts with Identity-H encoding.
//!
//! Text drawn with an embedded face is written as big-endian glyph ids. A ToUnicode
//! CMap built from the glyphs actually drawn maps them back to characters, so the
//! text stays searchable and extractable.

use crate::images::flate_compress;
use kpdf_render_core::{FontError, RenderError};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Glyphs drawn with one embedded face, keyed by glyph id.
pub(crate) type GlyphUsage = BTreeMap<u16, char>;

const PDF_GLYPH_UNITS: f32 = 1000.0;

/// A parsed TrueType/OpenType (glyf) face and the metrics needed to embed it.
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    data: Arc<Vec<u8>>,
    index: u32,
    postscript_name: String,
    units_per_em: u16,
    ascent: i16,
    descent: i16,
    cap_height: i16,
    italic_angle: f32,
    bbox: [i16; 4],
    fixed_pitch: bool,
}

impl TrueTypeFont {
    /// Parses face `index` of a font file already in memory.
    pub fn from_bytes(data: Vec<u8>, index: u32) -> Result<Self, FontError> {
        let data = Arc::new(data);
        let face = ttf_parser::Face::parse(&data, index)
            .map_err(|e| FontError::InvalidData(e.to_string()))?;
        if face.tables().glyf.is_none() {
            return Err(FontError::InvalidData(
                "only TrueType outlines (glyf) can be embedded".to_string(),
            ));
        }

        let postscript_name = face
            .names()
            .into_iter()
            .find(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
            .map(|name| sanitize_font_name(&name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "EmbeddedFont".to_string());

        let bbox = face.global_bounding_box();
        Ok(Self {
            data: Arc::clone(&data),
            index,
            postscript_name,
            units_per_em: face.units_per_em(),
            ascent: face.ascender(),
            descent: face.descender(),
            cap_height: face.capital_height().unwrap_or_else(|| face.ascender()),
            italic_angle: face.italic_angle(),
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
            fixed_pitch: face.is_monospaced(),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| FontError::LoadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::debug!("Loaded font file {} ({} bytes)", path.display(), data.len());
        Self::from_bytes(data, 0)
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index).ok()
    }

    fn to_pdf_units(&self, value: f32) -> f32 {
        value * PDF_GLYPH_UNITS / self.units_per_em.max(1) as f32
    }

    /// Glyph id and advance (in 1/1000 em) for each character; `.notdef` for gaps.
    pub(crate) fn glyphs(&self, text: &str) -> Vec<(char, u16, f32)> {
        let Some(face) = self.face() else {
            return Vec::new();
        };
        text.chars()
            .map(|c| {
                let glyph = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
                let advance = face.glyph_hor_advance(glyph).unwrap_or(0);
                (c, glyph.0, self.to_pdf_units(advance as f32))
            })
            .collect()
    }

    pub(crate) fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: f32 = self.glyphs(text).iter().map(|(_, _, advance)| advance).sum();
        units * size / PDF_GLYPH_UNITS
    }

    /// Writes the font program, descriptor, CID font, ToUnicode CMap and the Type0
    /// font into `doc`, returning the id of the Type0 dictionary.
    pub(crate) fn embed(&self, doc: &mut Document, usage: &GlyphUsage) -> Result<ObjectId, RenderError> {
        // TODO: subset the font program to the glyphs in `usage` before embedding.
        let font_file = Stream::new(
            dictionary! {
                "Length1" => self.data.len() as i64,
                "Filter" => "FlateDecode",
            },
            flate_compress(&self.data)?,
        );
        let font_file_id = doc.add_object(font_file);

        let mut flags = 32;
        if self.fixed_pitch {
            flags |= 1;
        }
        let [x_min, y_min, x_max, y_max] = self.bbox.map(|v| self.to_pdf_units(v as f32).round() as i64);
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => self.postscript_name.as_str(),
            "Flags" => flags,
            "FontBBox" => vec![x_min.into(), y_min.into(), x_max.into(), y_max.into()],
            "ItalicAngle" => self.italic_angle,
            "Ascent" => self.to_pdf_units(self.ascent as f32).round() as i64,
            "Descent" => self.to_pdf_units(self.descent as f32).round() as i64,
            "CapHeight" => self.to_pdf_units(self.cap_height as f32).round() as i64,
            "StemV" => 80,
            "FontFile2" => font_file_id,
        });

        let widths = self.width_array(usage);
        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => self.postscript_name.as_str(),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0,
            },
            "FontDescriptor" => descriptor_id,
            "W" => widths,
            "CIDToGIDMap" => "Identity",
        });

        let to_unicode_id = doc.add_object(Stream::new(
            Dictionary::new(),
            to_unicode_cmap(usage).into_bytes(),
        ));

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => self.postscript_name.as_str(),
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(cid_font_id)],
            "ToUnicode" => to_unicode_id,
        });
        log::debug!(
            "Embedded {} with {} distinct glyph(s)",
            self.postscript_name,
            usage.len()
        );
        Ok(font_id)
    }

    /// `/W` entries of the form `gid [width]` for the glyphs in use.
    fn width_array(&self, usage: &GlyphUsage) -> Vec<Object> {
        let Some(face) = self.face() else {
            return Vec::new();
        };
        usage
            .keys()
            .flat_map(|&gid| {
                let advance = face.glyph_hor_advance(ttf_parser::GlyphId(gid)).unwrap_or(0);
                let width = self.to_pdf_units(advance as f32).round() as i64;
                [Object::Integer(gid as i64), Object::Array(vec![width.into()])]
            })
            .collect()
    }
}

/// Big-endian two-byte glyph ids, as Identity-H expects.
pub(crate) fn encode_glyph_ids(glyphs: &[(char, u16, f32)]) -> Vec<u8> {
    glyphs.iter().flat_map(|(_, gid, _)| gid.to_be_bytes()).collect()
}

fn sanitize_font_name(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '-' => Some(c),
            ' ' => Some('-'),
            _ => None,
        })
        .collect()
}

fn to_unicode_cmap(usage: &GlyphUsage) -> String {
    let mut out = String::new();
    out.push_str("/CIDInit /ProcSet findresource begin\n");
    out.push_str("12 dict begin\n");
    out.push_str("begincmap\n");
    out.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
    out.push_str("/CMapName /Adobe-Identity-UCS def\n");
    out.push_str("/CMapType 2 def\n");
    out.push_str("1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");

    let entries: Vec<(&u16, &char)> = usage.iter().collect();
    // bfchar blocks hold at most 100 entries
    for chunk in entries.chunks(100) {
        out.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (gid, c) in chunk {
            let mut units = [0u16; 2];
            let target: String = c
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{unit:04X}"))
                .collect();
            out.push_str(&format!("<{gid:04X}> <{target}>\n"));
        }
        out.push_str("endbfchar\n");
    }

    out.push_str("endcmap\n");
    out.push_str("CMapName currentdict /CMap defineresource pop\n");
    out.push_str("end\nend\n");
    out
}
