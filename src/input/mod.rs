//! Pointer to cell mapping.
//!
//! Cells are drawn `cell_size` pixels wide with a 1 pixel border, so the
//! surface repeats every `cell_size + 1` pixels in both directions.

use crate::domain::Automaton;

/// Width of the grid line between cells, in surface pixels.
pub const BORDER: u32 = 1;

/// Where a pointer event landed, in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of the drawing surface plus its backing pixel size.
///
/// The two differ when the surface is scaled by layout or a DPI factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    pub left: f64,
    pub top: f64,
    pub rect_width: f64,
    pub rect_height: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl SurfaceGeometry {
    /// Backing size needed to draw a `width` x `height` grid, including the
    /// outer border. `None` if either side overflows `u32`.
    pub fn pixels_for_grid(width: u32, height: u32, cell_size: u32) -> Option<(u32, u32)> {
        let pitch = cell_size.checked_add(BORDER)?;
        let side = |cells: u32| pitch.checked_mul(cells)?.checked_add(BORDER);
        Some((side(width)?, side(height)?))
    }

    /// Surface placed at `(left, top)` and shown at its backing size.
    pub fn unscaled(left: f64, top: f64, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            left,
            top,
            rect_width: pixel_width as f64,
            rect_height: pixel_height as f64,
            pixel_width,
            pixel_height,
        }
    }
}

/// Maps pointer positions to `(row, col)` and issues toggles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputAdapter {
    cell_size: u32,
}

impl InputAdapter {
    pub const fn new(cell_size: u32) -> Self {
        Self { cell_size }
    }

    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Cell under the pointer on a `width` x `height` grid.
    ///
    /// Clicks on the far border clamp to the last row/column; clicks left of
    /// or above the surface clamp to the first. `None` when the surface has
    /// no usable size.
    pub fn cell_at(
        &self,
        pointer: Pointer,
        surface: &SurfaceGeometry,
        width: u32,
        height: u32,
    ) -> Option<(u32, u32)> {
        if width == 0 || height == 0 {
            return None;
        }
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(surface.rect_width) || !usable(surface.rect_height) {
            return None;
        }

        let scale_x = surface.pixel_width as f64 / surface.rect_width;
        let scale_y = surface.pixel_height as f64 / surface.rect_height;
        let surface_x = (pointer.x - surface.left) * scale_x;
        let surface_y = (pointer.y - surface.top) * scale_y;
        if !surface_x.is_finite() || !surface_y.is_finite() {
            return None;
        }

        let pitch = f64::from(self.cell_size) + f64::from(BORDER);
        // float to int `as` saturates, negatives land on 0
        let row = ((surface_y / pitch).floor() as u32).min(height - 1);
        let col = ((surface_x / pitch).floor() as u32).min(width - 1);
        Some((row, col))
    }

    /// Map the pointer and flip the cell under it.
    pub fn toggle(
        &self,
        automaton: &mut Automaton,
        pointer: Pointer,
        surface: &SurfaceGeometry,
    ) -> Option<(u32, u32)> {
        let (row, col) = self.cell_at(pointer, surface, automaton.width(), automaton.height())?;
        automaton.toggle_cell(row as i64, col as i64);
        Some((row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Initial;

    const CELL: u32 = 5;

    fn surface_for(width: u32, height: u32) -> SurfaceGeometry {
        let (pw, ph) = SurfaceGeometry::pixels_for_grid(width, height, CELL).unwrap();
        SurfaceGeometry::unscaled(10.0, 20.0, pw, ph)
    }

    #[test]
    fn test_pixels_for_grid() {
        assert_eq!(SurfaceGeometry::pixels_for_grid(64, 64, 5), Some((385, 385)));
        assert_eq!(SurfaceGeometry::pixels_for_grid(3, 2, 9), Some((31, 21)));
    }

    #[test]
    fn test_pixels_for_grid_overflow() {
        assert_eq!(SurfaceGeometry::pixels_for_grid(1_000_000_000, 64, 5), None);
        assert_eq!(SurfaceGeometry::pixels_for_grid(64, u32::MAX, 5), None);
        assert_eq!(SurfaceGeometry::pixels_for_grid(1, 1, u32::MAX), None);
        // 2 * (cell + 1) + 1 is exactly u32::MAX
        let cell = u32::MAX / 2 - 1;
        assert_eq!(
            SurfaceGeometry::pixels_for_grid(2, 1, cell),
            Some((u32::MAX, cell + 2))
        );
    }

    #[test]
    fn test_huge_cell_size_maps_without_overflow() {
        let adapter = InputAdapter::new(u32::MAX);
        let surface = SurfaceGeometry::unscaled(0.0, 0.0, 1000, 1000);
        assert_eq!(adapter.cell_at(Pointer::new(999.0, 999.0), &surface, 4, 4), Some((0, 0)));
    }

    #[test]
    fn test_unscaled_mapping() {
        let adapter = InputAdapter::new(CELL);
        let surface = surface_for(10, 10);
        assert_eq!(adapter.cell_at(Pointer::new(10.0, 20.0), &surface, 10, 10), Some((0, 0)));
        // x = 10 + 6*2 + 1 -> col 2, y = 20 + 6*3 + 5 -> row 3
        assert_eq!(adapter.cell_at(Pointer::new(23.0, 43.0), &surface, 10, 10), Some((3, 2)));
    }

    #[test]
    fn test_scaled_surface() {
        let adapter = InputAdapter::new(CELL);
        // Backing 61x61 pixels shown at half size.
        let surface = SurfaceGeometry {
            left: 0.0,
            top: 0.0,
            rect_width: 30.5,
            rect_height: 30.5,
            pixel_width: 61,
            pixel_height: 61,
        };
        // 15.5 * 2 = 31 surface px -> cell 5
        assert_eq!(adapter.cell_at(Pointer::new(15.5, 3.5), &surface, 10, 10), Some((1, 5)));
    }

    #[test]
    fn test_far_border_clamps_to_last_cell() {
        let adapter = InputAdapter::new(CELL);
        let surface = surface_for(4, 3);
        let (pw, ph) = (surface.pixel_width as f64, surface.pixel_height as f64);
        let far = Pointer::new(surface.left + pw, surface.top + ph);
        assert_eq!(adapter.cell_at(far, &surface, 4, 3), Some((2, 3)));
        let way_out = Pointer::new(1e9, 1e9);
        assert_eq!(adapter.cell_at(way_out, &surface, 4, 3), Some((2, 3)));
    }

    #[test]
    fn test_before_origin_clamps_to_first_cell() {
        let adapter = InputAdapter::new(CELL);
        let surface = surface_for(4, 3);
        assert_eq!(adapter.cell_at(Pointer::new(-50.0, 0.0), &surface, 4, 3), Some((0, 0)));
    }

    #[test]
    fn test_degenerate_surface() {
        let adapter = InputAdapter::new(CELL);
        let mut surface = surface_for(4, 4);
        surface.rect_width = 0.0;
        assert_eq!(adapter.cell_at(Pointer::new(12.0, 22.0), &surface, 4, 4), None);
        surface.rect_width = f64::NAN;
        assert_eq!(adapter.cell_at(Pointer::new(12.0, 22.0), &surface, 4, 4), None);
        let surface = surface_for(4, 4);
        assert_eq!(adapter.cell_at(Pointer::new(f64::NAN, 22.0), &surface, 4, 4), None);
    }

    #[test]
    fn test_toggle_flips_mapped_cell() {
        let adapter = InputAdapter::new(CELL);
        let mut life = Automaton::new(8, 8, Initial::Dead).unwrap();
        let surface = surface_for(8, 8);
        let pointer = Pointer::new(10.0 + 6.0 * 7.0 + 2.0, 20.0 + 6.0 + 2.0);

        assert_eq!(adapter.toggle(&mut life, pointer, &surface), Some((1, 7)));
        assert!(life.is_alive(1, 7));
        assert_eq!(adapter.toggle(&mut life, pointer, &surface), Some((1, 7)));
        assert!(!life.is_alive(1, 7));
        assert_eq!(life.generation(), 0);
    }
}
