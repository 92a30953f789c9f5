use kpdf_types::TextStyle;

/// PostScript name of a standard-14 face for the given emphasis.
///
/// Only bold and italic select a face; underline is drawn separately.
pub fn get_styled_font_name(base_name: &str, style: TextStyle) -> String {
    let mut name = base_name.to_string();
    if style.is_bold() || style.is_italic() {
        name.push('-');
        if style.is_bold() {
            name.push_str("Bold");
        }
        if style.is_italic() {
            name.push_str("Oblique");
        }
    }
    name
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Encodes text for the standard WinAnsi faces.
///
/// Only the Latin-1 range has a code here; anything else becomes `?`. Text that may
/// leave that range belongs in an embedded TrueType face.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c as u32 <= 255 { c as u8 } else { b'?' })
        .collect()
}

/// Encodes a PDF text string (Info entries and the like).
///
/// ASCII is written as is; anything else is UTF-16BE behind a byte order mark.
pub fn to_pdf_text_string(s: &str) -> Vec<u8> {
    if s.is_ascii() {
        return s.as_bytes().to_vec();
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in s.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}
