use kpdf_layout::mm;

/// Page size and printable area, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    /// Distance from the bottom edge at which content breaks to a new page.
    pub margin_bottom: f32,
}

impl PageSetup {
    /// Portrait A4 with 10 mm margins and a 20 mm bottom break.
    pub fn a4() -> Self {
        Self {
            width: mm(210.0),
            height: mm(297.0),
            margin_left: mm(10.0),
            margin_top: mm(10.0),
            margin_right: mm(10.0),
            margin_bottom: mm(20.0),
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest y (top-down) content may reach before a page break.
    pub fn break_line(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}

/// Metadata written to the document information dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
}

impl DocumentInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            producer: concat!("kpdf ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_geometry() {
        let page = PageSetup::a4();
        assert!((page.width - 595.2756).abs() < 0.01);
        assert!((page.height - 841.8898).abs() < 0.01);
        assert!((page.content_width() - mm(190.0)).abs() < 0.01);
        assert!((page.break_line() - mm(277.0)).abs() < 0.01);
    }
}
