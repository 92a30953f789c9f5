use std::ops::{BitOr, BitOrAssign};

/// Text emphasis flags, combined as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextStyle(u8);

impl TextStyle {
    pub const REGULAR: TextStyle = TextStyle(0);
    pub const BOLD: TextStyle = TextStyle(1);
    pub const ITALIC: TextStyle = TextStyle(1 << 1);
    pub const UNDERLINE: TextStyle = TextStyle(1 << 2);

    /// Builds a style from the three independent emphasis switches.
    pub fn from_flags(bold: bool, italic: bool, underline: bool) -> Self {
        let mut style = TextStyle::REGULAR;
        if bold {
            style |= TextStyle::BOLD;
        }
        if italic {
            style |= TextStyle::ITALIC;
        }
        if underline {
            style |= TextStyle::UNDERLINE;
        }
        style
    }

    pub fn contains(self, other: TextStyle) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_bold(self) -> bool {
        self.contains(TextStyle::BOLD)
    }

    pub fn is_italic(self) -> bool {
        self.contains(TextStyle::ITALIC)
    }

    pub fn is_underline(self) -> bool {
        self.contains(TextStyle::UNDERLINE)
    }
}

impl BitOr for TextStyle {
    type Output = TextStyle;

    fn bitor(self, rhs: TextStyle) -> TextStyle {
        TextStyle(self.0 | rhs.0)
    }
}

impl BitOrAssign for TextStyle {
    fn bitor_assign(&mut self, rhs: TextStyle) {
        self.0 |= rhs.0;
    }
}
