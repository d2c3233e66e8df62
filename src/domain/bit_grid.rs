//! Bit-packed toroidal grid.
//!
//! Cell `idx = row * width + col` lives in byte `idx / 8` at bit `idx % 8`,
//! least significant bit first. Renderers decode with
//! `(byte >> (idx % 8)) & 1`, so this layout must not change.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Cell, LifeError};

/// How a freshly allocated grid is filled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Initial {
    /// Every cell dead.
    Dead,
    /// Each cell alive with probability 0.5, reproducible from `seed`.
    Random { seed: u64 },
    /// The listed `(row, col)` cells alive. Coordinates wrap.
    Pattern(Vec<(i64, i64)>),
    /// Cell `i` alive iff `i % 2 == 0 || i % 7 == 0`.
    Interleaved,
}

/// Read-only view of the packed cells handed to renderers.
///
/// Borrowing the grid keeps the view valid only until the next mutation.
#[derive(Clone, Copy, Debug)]
pub struct CellsView<'a> {
    width: u32,
    height: u32,
    bytes: &'a [u8],
}

impl<'a> CellsView<'a> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The packed buffer.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Decode one logical index. Indices past the grid read as dead.
    #[inline]
    pub fn is_set(&self, idx: usize) -> bool {
        if idx >= self.width as usize * self.height as usize {
            return false;
        }
        (self.bytes[idx / 8] >> (idx % 8)) & 1 == 1
    }

    /// Decode `(row, col)` without wrapping.
    #[inline]
    pub fn is_alive(&self, row: u32, col: u32) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        self.is_set(row as usize * self.width as usize + col as usize)
    }

    /// Iterate the `(row, col)` of every live cell in row-major order.
    pub fn live_cells(self) -> impl Iterator<Item = (u32, u32)> + 'a {
        let width = self.width as usize;
        (0..width * self.height as usize)
            .filter(move |&idx| self.is_set(idx))
            .map(move |idx| ((idx / width) as u32, (idx % width) as u32))
    }
}

/// Fixed-size boolean field packed eight cells per byte.
#[derive(Clone, PartialEq, Eq)]
pub struct BitGrid {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

/// Number of bytes needed for `width * height` cells.
pub(crate) fn packed_len(width: u32, height: u32) -> Result<usize, LifeError> {
    if width == 0 || height == 0 {
        return Err(LifeError::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .map(|cells| cells.div_ceil(8))
        .ok_or(LifeError::InvalidDimension { width, height })
}

impl BitGrid {
    /// Allocate a grid and fill it according to `initial`.
    pub fn new(width: u32, height: u32, initial: &Initial) -> Result<Self, LifeError> {
        let mut grid = Self {
            width,
            height,
            bytes: vec![0; packed_len(width, height)?],
        };
        grid.fill(initial);
        Ok(grid)
    }

    /// Clear and refill in place.
    pub fn fill(&mut self, initial: &Initial) {
        self.clear();
        let cells = self.cell_count();
        match initial {
            Initial::Dead => {}
            Initial::Random { seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                for idx in 0..cells {
                    if rng.random_bool(0.5) {
                        self.set_bit(idx, true);
                    }
                }
            }
            Initial::Pattern(points) => {
                for &(row, col) in points {
                    self.set(row, col, true);
                }
            }
            Initial::Interleaved => {
                for idx in 0..cells {
                    if idx % 2 == 0 || idx % 7 == 0 {
                        self.set_bit(idx, true);
                    }
                }
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Logical cell count, `width * height`.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Wrap a signed coordinate onto the torus and return its flat index.
    #[inline]
    fn wrapped_index(&self, row: i64, col: i64) -> usize {
        let row = row.rem_euclid(self.height as i64) as usize;
        let col = col.rem_euclid(self.width as i64) as usize;
        row * self.width as usize + col
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    #[inline]
    pub(crate) fn bit(&self, idx: usize) -> bool {
        (self.bytes[idx / 8] >> (idx % 8)) & 1 == 1
    }

    #[inline]
    pub(crate) fn set_bit(&mut self, idx: usize, alive: bool) {
        let mask = 1u8 << (idx % 8);
        if alive {
            self.bytes[idx / 8] |= mask;
        } else {
            self.bytes[idx / 8] &= !mask;
        }
    }

    /// Cell state with toroidal wrapping. Never panics.
    pub fn is_alive(&self, row: i64, col: i64) -> bool {
        self.bit(self.wrapped_index(row, col))
    }

    /// Write a cell with toroidal wrapping.
    pub fn set(&mut self, row: i64, col: i64, alive: bool) {
        let idx = self.wrapped_index(row, col);
        self.set_bit(idx, alive);
    }

    /// Flip a cell with toroidal wrapping.
    pub fn toggle(&mut self, row: i64, col: i64) {
        let idx = self.wrapped_index(row, col);
        self.bytes[idx / 8] ^= 1u8 << (idx % 8);
    }

    /// Live cells among the 8 Moore neighbors of an in-range cell.
    ///
    /// On a grid one cell wide or tall the wrapped neighbors coincide;
    /// each of the 8 offsets still counts once.
    pub fn live_neighbors(&self, row: u32, col: u32) -> u8 {
        debug_assert!(row < self.height && col < self.width);

        let north = if row == 0 { self.height - 1 } else { row - 1 };
        let south = if row == self.height - 1 { 0 } else { row + 1 };
        let west = if col == 0 { self.width - 1 } else { col - 1 };
        let east = if col == self.width - 1 { 0 } else { col + 1 };

        [
            (north, west),
            (north, col),
            (north, east),
            (row, west),
            (row, east),
            (south, west),
            (south, col),
            (south, east),
        ]
        .into_iter()
        .map(|(r, c)| self.bit(self.index(r, c)) as u8)
        .sum()
    }

    /// The packed buffer, LSB-first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn view(&self) -> CellsView<'_> {
        CellsView {
            width: self.width,
            height: self.height,
            bytes: &self.bytes,
        }
    }

    /// Count of live cells.
    pub fn population(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Check the buffer still matches the declared dimensions.
    pub(crate) fn check_layout(&self) -> Result<(), LifeError> {
        let expected = packed_len(self.width, self.height)?;
        if self.bytes.len() != expected {
            return Err(LifeError::CorruptState {
                expected,
                found: self.bytes.len(),
            });
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn bytes_mut(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }
}

impl fmt::Display for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = Cell::from_bit(self.bit(self.index(row, col)));
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("population", &self.population())
            .finish()
    }
}
