// ABOUTME: Normalized pane rectangles for a row-based grid of terminal panes.
// ABOUTME: Combines row heights and per-row column widths into screen-space fractions.

use crate::panel::{PanelLayout, MAX_GRID_DIMENSION};

/// Rectangle in normalized coordinates (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn full() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }

    /// Scale into a pixel viewport of the given size
    pub fn to_pixels(&self, viewport_width: f32, viewport_height: f32) -> Rect {
        Rect {
            x: self.x * viewport_width,
            y: self.y * viewport_height,
            width: self.width * viewport_width,
            height: self.height * viewport_height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// A pane's position in the grid and the area it covers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneRect {
    pub row: usize,
    pub column: usize,
    pub rect: Rect,
}

/// Lay out every pane, row by row. `columns_per_row[i]` is the pane count of row `i`.
pub fn pane_rects(layout: &PanelLayout, columns_per_row: &[usize]) -> Vec<PaneRect> {
    let heights = layout.row_heights(columns_per_row.len());
    let capacity = columns_per_row
        .iter()
        .map(|&count| count.min(MAX_GRID_DIMENSION))
        .sum();
    let mut result = Vec::with_capacity(capacity);

    let mut y = 0.0;
    for (row, (&column_count, &height)) in columns_per_row.iter().zip(&heights).enumerate() {
        let mut x = 0.0;
        for (column, width) in layout.column_widths(row, column_count).into_iter().enumerate() {
            result.push(PaneRect {
                row,
                column,
                rect: Rect {
                    x,
                    y,
                    width,
                    height,
                },
            });
            x += width;
        }
        y += height;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pane_fills_window() {
        let rects = pane_rects(&PanelLayout::default(), &[1]);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].rect, Rect::full());
    }

    #[test]
    fn two_by_two_uses_splits() {
        let mut layout = PanelLayout::default();
        layout.horizontal_split = 0.6;
        layout.vertical_splits = vec![0.25, 0.5];

        let rects = pane_rects(&layout, &[2, 2]);
        assert_eq!(rects.len(), 4);

        let top_right = rects[1];
        assert_eq!((top_right.row, top_right.column), (0, 1));
        assert!((top_right.rect.x - 0.25).abs() < 0.001);
        assert!((top_right.rect.width - 0.75).abs() < 0.001);
        assert!((top_right.rect.height - 0.6).abs() < 0.001);

        let bottom_left = rects[2];
        assert!((bottom_left.rect.y - 0.6).abs() < 0.001);
        assert!((bottom_left.rect.width - 0.5).abs() < 0.001);
    }

    #[test]
    fn panes_tile_without_gaps() {
        let mut layout = PanelLayout::default();
        layout.multi_column_splits.insert(1, vec![0.3, 0.6]);

        let rects = pane_rects(&layout, &[2, 3]);
        let area: f32 = rects.iter().map(|p| p.rect.width * p.rect.height).sum();
        assert!((area - 1.0).abs() < 0.001);
    }

    #[test]
    fn oversized_rows_produce_no_panes() {
        let layout = PanelLayout::default();
        let rects = pane_rects(&layout, &[1, usize::MAX]);
        assert_eq!(rects.len(), 1);
        assert_eq!((rects[0].row, rects[0].column), (0, 0));

        let too_many_rows = vec![1; MAX_GRID_DIMENSION + 1];
        assert!(pane_rects(&layout, &too_many_rows).is_empty());
    }

    #[test]
    fn pixel_conversion() {
        let rect = Rect {
            x: 0.5,
            y: 0.25,
            width: 0.5,
            height: 0.75,
        }
        .to_pixels(800.0, 400.0);
        assert_eq!(rect.x, 400.0);
        assert_eq!(rect.height, 300.0);
        assert!(rect.contains(500.0, 200.0));
        assert!(!rect.contains(100.0, 200.0));
    }
}
