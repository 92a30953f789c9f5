use lopdf::Document as LopdfDocument;
use lopdf::content::{Content, Operation};
use std::collections::BTreeSet;

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Decoded content stream operations of one page (1-based)
pub fn page_operations(doc: &LopdfDocument, page_num: u32) -> Vec<Operation> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page_num) else {
        return Vec::new();
    };
    doc.get_page_content(*page_id)
        .ok()
        .and_then(|bytes| Content::decode(&bytes).ok())
        .map(|content| content.operations)
        .unwrap_or_default()
}

/// Operations of every page, in page order
pub fn all_operations(doc: &LopdfDocument) -> Vec<Operation> {
    (1..=doc.get_pages().len() as u32)
        .flat_map(|page| page_operations(doc, page))
        .collect()
}

/// Number of image XObjects in the file (soft masks excluded)
pub fn image_count(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            let is_image = stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false);
            let is_mask = stream
                .dict
                .get(b"ColorSpace")
                .and_then(|s| s.as_name())
                .map(|name| name == b"DeviceGray")
                .unwrap_or(false);
            is_image && !is_mask
        })
        .count()
}

/// Base font names referenced by the shared font resources
pub fn font_names(doc: &LopdfDocument) -> BTreeSet<String> {
    doc.objects
        .values()
        .filter_map(|object| object.as_dict().ok())
        .filter(|dict| {
            dict.get(b"Type")
                .and_then(|t| t.as_name())
                .map(|name| name == b"Font")
                .unwrap_or(false)
        })
        .filter_map(|dict| dict.get(b"BaseFont").and_then(|b| b.as_name()).ok())
        .map(|name| String::from_utf8_lossy(name).to_string())
        .collect()
}

/// Number of font descriptors that carry an embedded font program
pub fn embedded_font_count(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter_map(|object| object.as_dict().ok())
        .filter(|dict| {
            dict.get(b"Type")
                .and_then(|t| t.as_name())
                .map(|name| name == b"FontDescriptor")
                .unwrap_or(false)
        })
        .filter(|dict| dict.has(b"FontFile") || dict.has(b"FontFile2") || dict.has(b"FontFile3"))
        .count()
}

/// True if some `rg` operation sets exactly this 8-bit color
pub fn uses_fill_color(operations: &[Operation], r: u8, g: u8, b: u8) -> bool {
    let expected = [r, g, b].map(|c| c as f32 / 255.0);
    operations.iter().any(|op| {
        op.operator == "rg"
            && op.operands.len() == 3
            && op
                .operands
                .iter()
                .zip(expected)
                .all(|(operand, want)| {
                    operand
                        .as_float()
                        .map(|got| (got - want).abs() < 0.005)
                        .unwrap_or(false)
                })
    })
}
