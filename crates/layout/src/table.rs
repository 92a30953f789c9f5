//! Fixed-geometry table placement.
//!
//! Every column has the same width and every row the same height. Nothing wraps or
//! auto-sizes: text wider than its cell simply overflows, which keeps the placement a
//! pure function of the cell counts.

use crate::units::mm;
use kpdf_types::{Color, Rect, Size, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Header,
    Body,
}

impl CellKind {
    pub fn is_shaded(self) -> bool {
        matches!(self, CellKind::Header)
    }

    /// Background fill, if any.
    pub fn fill(self) -> Option<Color> {
        match self {
            CellKind::Header => Some(Color::gray(240)),
            CellKind::Body => None,
        }
    }

    pub fn text_style(self) -> TextStyle {
        match self {
            CellKind::Header => TextStyle::BOLD,
            CellKind::Body => TextStyle::REGULAR,
        }
    }
}

/// One placed cell. `rect` is relative to the table origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPlacement {
    pub rect: Rect,
    pub text: String,
    pub kind: CellKind,
    /// 0 for the header row, body rows count from 1.
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    /// Optional section caption drawn above the table.
    pub title: Option<String>,
    pub columns: usize,
    /// Header cells first, then body cells in row-major order.
    pub cells: Vec<CellPlacement>,
    pub size: Size,
}

impl TableBlock {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn header_cells(&self) -> impl Iterator<Item = &CellPlacement> {
        self.cells.iter().filter(|c| c.kind == CellKind::Header)
    }

    pub fn body_cells(&self) -> impl Iterator<Item = &CellPlacement> {
        self.cells.iter().filter(|c| c.kind == CellKind::Body)
    }

    /// Number of rows including the header.
    pub fn row_count(&self) -> usize {
        self.cells.last().map(|c| c.row + 1).unwrap_or(0)
    }

    /// Cells grouped by row, header first.
    pub fn rows(&self) -> impl Iterator<Item = &[CellPlacement]> {
        self.cells.chunks(self.columns.max(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableLayout {
    pub column_width: f32,
    pub header_height: f32,
    pub row_height: f32,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            column_width: mm(80.0),
            header_height: mm(7.0),
            row_height: mm(6.0),
        }
    }
}

impl TableLayout {
    /// Places a header row followed by the body rows.
    ///
    /// The header defines the column count; body rows are truncated or padded with
    /// empty cells to match it.
    pub fn layout<H, R>(&self, header: &[H], rows: &[R]) -> TableBlock
    where
        H: AsRef<str>,
        R: AsRef<[String]>,
    {
        let columns = header.len();
        if columns == 0 {
            return TableBlock {
                title: None,
                columns: 0,
                cells: Vec::new(),
                size: Size::zero(),
            };
        }

        let mut cells = Vec::with_capacity(columns * (rows.len() + 1));
        for (column, text) in header.iter().enumerate() {
            cells.push(CellPlacement {
                rect: Rect::new(
                    column as f32 * self.column_width,
                    0.0,
                    self.column_width,
                    self.header_height,
                ),
                text: text.as_ref().to_string(),
                kind: CellKind::Header,
                row: 0,
                column,
            });
        }

        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let y = self.header_height + index as f32 * self.row_height;
            for column in 0..columns {
                cells.push(CellPlacement {
                    rect: Rect::new(
                        column as f32 * self.column_width,
                        y,
                        self.column_width,
                        self.row_height,
                    ),
                    text: row.get(column).cloned().unwrap_or_default(),
                    kind: CellKind::Body,
                    row: index + 1,
                    column,
                });
            }
        }

        TableBlock {
            title: None,
            columns,
            cells,
            size: Size::new(
                columns as f32 * self.column_width,
                self.header_height + rows.len() as f32 * self.row_height,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn emits_header_then_body_in_row_major_order() {
        let table = TableLayout::default().layout(
            &["Field", "Value"],
            &[row(&["User ID", "1"]), row(&["Cart ID", "2"]), row(&["Count", "5"])],
        );

        assert_eq!(table.cells.len(), 2 + 2 * 3);
        assert_eq!(table.row_count(), 4);
        let order: Vec<(usize, usize)> = table.cells.iter().map(|c| (c.row, c.column)).collect();
        assert_eq!(
            order,
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1), (3, 0), (3, 1)]
        );
        assert!(table.cells[..2].iter().all(|c| c.kind == CellKind::Header));
        assert!(table.cells[2..].iter().all(|c| c.kind == CellKind::Body));
        assert_eq!(table.cells[4].text, "Cart ID");
        assert_eq!(table.cells[5].text, "2");
    }

    #[test]
    fn header_is_shaded_and_bold_body_is_plain() {
        assert!(CellKind::Header.is_shaded());
        assert_eq!(CellKind::Header.fill(), Some(Color::new(240, 240, 240)));
        assert!(CellKind::Header.text_style().is_bold());
        assert!(!CellKind::Body.is_shaded());
        assert_eq!(CellKind::Body.fill(), None);
        assert_eq!(CellKind::Body.text_style(), TextStyle::REGULAR);
    }

    #[test]
    fn geometry_uses_fixed_sizes() {
        let layout = TableLayout::default();
        let table = layout.layout(&["A", "B"], &[row(&["1", "2"]), row(&["3", "4"])]);

        let last = table.cells.last().unwrap();
        assert_eq!(last.rect.x, layout.column_width);
        assert!((last.rect.y - (layout.header_height + layout.row_height)).abs() < 1e-4);
        assert!((table.size.width - mm(160.0)).abs() < 1e-3);
        assert!((table.size.height - mm(19.0)).abs() < 1e-3);
    }

    #[test]
    fn rows_are_truncated_or_padded_to_header_width() {
        let table = TableLayout::default().layout(
            &["A", "B"],
            &[row(&["only"]), row(&["x", "y", "overflow"])],
        );
        let texts: Vec<&str> = table.body_cells().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["only", "", "x", "y"]);
    }

    #[test]
    fn empty_header_yields_empty_table() {
        let table = TableLayout::default().layout::<&str, Vec<String>>(&[], &[row(&["x"])]);
        assert!(table.cells.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.size, Size::zero());
    }

    #[test]
    fn rows_group_cells_by_line() {
        let table = TableLayout::default()
            .layout(&["A", "B"], &[row(&["1", "2"])])
            .with_title("Section");
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1].text, "2");
        assert_eq!(table.title.as_deref(), Some("Section"));
    }
}
