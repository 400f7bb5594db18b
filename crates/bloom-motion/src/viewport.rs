//! Mapping between animation pixels and terminal cells.

use ratatui::layout::Rect;

/// Horizontal pixels represented by one terminal column.
pub const PX_PER_COL: f32 = 8.0;
/// Vertical pixels represented by one terminal row.
pub const PX_PER_ROW: f32 = 16.0;

/// A drawing surface measured in animation pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub width_px: f32,
    pub height_px: f32,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            width_px: f32::from(area.width) * PX_PER_COL,
            height_px: f32::from(area.height) * PX_PER_ROW,
        }
    }

    /// Cell containing the pixel `(x, y)` relative to the viewport origin,
    /// or `None` if it falls outside.
    pub fn cell_at(&self, x_px: f32, y_px: f32) -> Option<(u16, u16)> {
        if !(0.0..self.width_px).contains(&x_px) || !(0.0..self.height_px).contains(&y_px) {
            return None;
        }
        let col = (x_px / PX_PER_COL) as u16;
        let row = (y_px / PX_PER_ROW) as u16;
        Some((self.area.x + col, self.area.y + row))
    }

    /// Pixel at the centre of the cell `(col, row)` relative to the area.
    pub fn cell_center(col: u16, row: u16) -> (f32, f32) {
        (
            (f32::from(col) + 0.5) * PX_PER_COL,
            (f32::from(row) + 0.5) * PX_PER_ROW,
        )
    }
}

/// Convert a pixel distance to whole rows, rounding to nearest.
pub fn px_to_rows(px: f32) -> i32 {
    (px / PX_PER_ROW).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_mapping() {
        let viewport = Viewport::new(Rect::new(2, 1, 10, 5));
        assert_eq!(viewport.width_px, 80.0);
        assert_eq!(viewport.height_px, 80.0);
        assert_eq!(viewport.cell_at(0.0, 0.0), Some((2, 1)));
        assert_eq!(viewport.cell_at(79.0, 79.0), Some((11, 5)));
        assert_eq!(viewport.cell_at(80.0, 0.0), None);
        assert_eq!(viewport.cell_at(-0.5, 10.0), None);
        assert_eq!(viewport.cell_at(10.0, -60.0), None);
    }

    #[test]
    fn test_px_to_rows() {
        assert_eq!(px_to_rows(30.0), 2);
        assert_eq!(px_to_rows(-20.0), -1);
        assert_eq!(px_to_rows(0.0), 0);
    }
}
