use macroquad::prelude::*;

use crate::domain::CellsView;
use crate::input::{BORDER, SurfaceGeometry};

pub const GRID_COLOR: Color = Color::new(0.8, 0.8, 0.8, 1.0);
pub const DEAD_COLOR: Color = WHITE;
pub const ALIVE_COLOR: Color = BLACK;

/// Blank surface sized for the grid, filled with the grid-line colour.
///
/// `None` when the surface would not fit a texture.
pub fn blank_surface(width: u32, height: u32, cell_size: u32) -> Option<Image> {
    let (pw, ph) = SurfaceGeometry::pixels_for_grid(width, height, cell_size)?;
    let pw = u16::try_from(pw).ok()?;
    let ph = u16::try_from(ph).ok()?;
    Some(Image::gen_image_color(pw, ph, GRID_COLOR))
}

/// Decode the packed cells into `image`.
///
/// Cells sit on a `cell_size + 1` pixel pitch; the 1 pixel lines between
/// them are left untouched. Nothing is painted unless `image` is at least as
/// large as [`blank_surface`] would make it.
pub fn paint_cells(cells: CellsView<'_>, cell_size: u32, image: &mut Image) {
    let Some((pw, ph)) =
        SurfaceGeometry::pixels_for_grid(cells.width(), cells.height(), cell_size)
    else {
        return;
    };
    if pw as usize > image.width() || ph as usize > image.height() {
        return;
    }
    let pitch = cell_size + BORDER;
    let width = cells.width() as usize;
    for idx in 0..width * cells.height() as usize {
        let (row, col) = ((idx / width) as u32, (idx % width) as u32);
        let color = if cells.is_set(idx) { ALIVE_COLOR } else { DEAD_COLOR };
        let (x0, y0) = (col * pitch + BORDER, row * pitch + BORDER);
        for y in y0..y0 + cell_size {
            for x in x0..x0 + cell_size {
                image.set_pixel(x, y, color);
            }
        }
    }
}

/// One-line status below the grid.
pub fn draw_status(text: &str, x: f32, y: f32) {
    draw_text(text, x, y, 18.0, LIGHTGRAY);
}

/// Format large numbers with K/M suffixes.
pub fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BitGrid, Initial};

    #[test]
    fn test_paint_cells_layout() {
        let grid = BitGrid::new(3, 2, &Initial::Pattern(vec![(1, 2)])).unwrap();
        let mut image = blank_surface(3, 2, 2).unwrap();
        assert_eq!((image.width(), image.height()), (10, 7));

        paint_cells(grid.view(), 2, &mut image);

        // live cell (1, 2) covers x 7..9, y 4..6
        assert_eq!(image.get_pixel(7, 4), ALIVE_COLOR);
        assert_eq!(image.get_pixel(8, 5), ALIVE_COLOR);
        assert_eq!(image.get_pixel(1, 1), DEAD_COLOR);
        // grid lines
        assert_eq!(image.get_pixel(0, 0), GRID_COLOR);
        assert_eq!(image.get_pixel(3, 1), GRID_COLOR);
        assert_eq!(image.get_pixel(9, 6), GRID_COLOR);
    }

    #[test]
    fn test_oversized_surface_rejected() {
        assert!(blank_surface(20_000, 10, 5).is_none());
        assert!(blank_surface(u32::MAX, 1, 5).is_none());
        assert!(blank_surface(1, 1, u32::MAX).is_none());
    }

    #[test]
    fn test_paint_skips_undersized_image() {
        let grid = BitGrid::new(4, 4, &Initial::Pattern(vec![(3, 3)])).unwrap();
        let mut image = blank_surface(2, 2, 2).unwrap();
        paint_cells(grid.view(), 2, &mut image);
        for y in 0..7 {
            for x in 0..7 {
                assert_eq!(image.get_pixel(x, y), GRID_COLOR, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(4096), "4.1K");
        assert_eq!(format_number(2_500_000), "2.5M");
    }
}
