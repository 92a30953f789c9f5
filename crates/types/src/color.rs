use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// Components scaled to the 0.0..=1.0 range used by PDF color operators.
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Outcome of reading a user supplied `RRGGBB` string.
///
/// Parsing never fails: anything that is not a six digit hex triple comes back as
/// [`HexColor::Malformed`] and callers fall back to their default color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexColor {
    /// The input was empty.
    Unspecified,
    /// The input was present but not a six digit hex color.
    Malformed,
    Rgb(Color),
}

impl HexColor {
    /// Parses `RRGGBB`, optionally preceded by a single marker character such as `#`.
    ///
    /// Surrounding whitespace is ignored. The marker may be any character that is not
    /// itself a hex digit, so `#112233` and `$112233` both parse while `a112233` does not.
    pub fn parse(input: &str) -> HexColor {
        let s = input.trim();
        if s.is_empty() {
            return HexColor::Unspecified;
        }

        let mut chars = s.chars();
        let hex = match chars.next() {
            Some(marker) if !marker.is_ascii_hexdigit() => chars.as_str(),
            _ => s,
        };

        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return HexColor::Malformed;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
        match (channel(0..2), channel(2..4), channel(4..6)) {
            (Ok(r), Ok(g), Ok(b)) => HexColor::Rgb(Color { r, g, b }),
            _ => HexColor::Malformed,
        }
    }

    pub fn color(self) -> Option<Color> {
        match self {
            HexColor::Rgb(color) => Some(color),
            HexColor::Unspecified | HexColor::Malformed => None,
        }
    }
}
