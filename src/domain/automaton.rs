use std::fmt;

use tracing::{debug, error, info, trace, trace_span};

use super::{BitGrid, Cell, CellsView, Initial, LifeError};

/// Conway's Game of Life on a torus.
///
/// Owns two equally sized grids. `tick` reads only `current`, writes every
/// cell of `next`, then swaps them, so no cell observes a neighbor's new
/// state within the same generation.
pub struct Automaton {
    current: BitGrid,
    next: BitGrid,
    generation: u64,
    poisoned: Option<LifeError>,
}

impl Automaton {
    pub fn new(width: u32, height: u32, initial: Initial) -> Result<Self, LifeError> {
        let current = BitGrid::new(width, height, &initial)?;
        let next = BitGrid::new(width, height, &Initial::Dead)?;
        info!(
            width,
            height,
            population = current.population(),
            "automaton created"
        );
        Ok(Self {
            current,
            next,
            generation: 0,
            poisoned: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.current.width()
    }

    pub fn height(&self) -> u32 {
        self.current.height()
    }

    /// Ticks since construction or the last reset. Saturates at `u64::MAX`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.current.population()
    }

    pub fn is_alive(&self, row: i64, col: i64) -> bool {
        self.current.is_alive(row, col)
    }

    /// Packed cells of the current generation. Invalidated by any mutation.
    pub fn cells_view(&self) -> CellsView<'_> {
        self.current.view()
    }

    pub fn grid(&self) -> &BitGrid {
        &self.current
    }

    /// Advance one generation.
    pub fn tick(&mut self) -> Result<(), LifeError> {
        if let Some(err) = &self.poisoned {
            return Err(err.clone());
        }
        if let Err(err) = self
            .current
            .check_layout()
            .and_then(|()| self.next.check_layout())
        {
            error!(%err, generation = self.generation, "refusing to tick");
            self.poisoned = Some(err.clone());
            return Err(err);
        }

        let _span = trace_span!("tick", generation = self.generation).entered();

        let width = self.current.width();
        for row in 0..self.current.height() {
            let base = row as usize * width as usize;
            for col in 0..width {
                let idx = base + col as usize;
                let cell = Cell::from_bit(self.current.bit(idx));
                let neighbors = self.current.live_neighbors(row, col);
                self.next.set_bit(idx, cell.evolve(neighbors).is_alive());
            }
        }
        std::mem::swap(&mut self.current, &mut self.next);

        self.generation = self.generation.saturating_add(1);
        trace!(
            generation = self.generation,
            population = self.current.population(),
            "generation computed"
        );
        Ok(())
    }

    /// Advance `n` generations, stopping at the first failure.
    pub fn step(&mut self, n: u64) -> Result<(), LifeError> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    /// Flip one cell. Coordinates wrap. The generation is unchanged.
    pub fn toggle_cell(&mut self, row: i64, col: i64) {
        self.current.toggle(row, col);
        trace!(row, col, alive = self.current.is_alive(row, col), "cell toggled");
    }

    /// Refill the grid and restart the generation count.
    pub fn reset(&mut self, initial: Initial) -> Result<(), LifeError> {
        if let Some(err) = &self.poisoned {
            return Err(err.clone());
        }
        self.current.check_layout()?;
        self.current.fill(&initial);
        self.generation = 0;
        debug!(population = self.current.population(), "automaton reset");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut BitGrid {
        &mut self.current
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.current, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_cells(width: u32, height: u32, cells: &[(i64, i64)]) -> Automaton {
        Automaton::new(width, height, Initial::Pattern(cells.to_vec())).unwrap()
    }

    fn live(automaton: &Automaton) -> Vec<(u32, u32)> {
        automaton.cells_view().live_cells().collect()
    }

    #[test]
    fn test_invalid_dimension() {
        assert!(matches!(
            Automaton::new(0, 0, Initial::Dead),
            Err(LifeError::InvalidDimension { width: 0, height: 0 })
        ));
    }

    #[test]
    fn test_plus_on_three_by_three() {
        // .#.
        // ###
        // .#.
        let mut life = with_cells(3, 3, &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]);
        life.tick().unwrap();

        // On a 3x3 torus every cell sees the other 8 cells.
        // Live cells see 4 live neighbors and die, dead corners see 5 and stay dead.
        assert_eq!(life.population(), 0);
        assert_eq!(life.cells_view().bytes(), &[0, 0]);
    }

    #[test]
    fn test_plus_on_larger_torus() {
        let mut life = with_cells(5, 5, &[(1, 2), (2, 1), (2, 2), (2, 3), (3, 2)]);
        life.tick().unwrap();

        // Center has 4 neighbors and dies, arms keep 3, diagonals see 3 and
        // are born. Cells beyond the arm tips see only 1.
        let expected = vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)];
        assert_eq!(live(&life), expected);
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut life = with_cells(6, 6, &[(3, 3)]);
        life.tick().unwrap();
        assert_eq!(life.population(), 0);
    }

    #[test]
    fn test_overpopulated_cell_dies() {
        let mut life = with_cells(8, 8, &[(4, 4), (3, 4), (5, 4), (4, 3), (4, 5)]);
        assert_eq!(life.grid().live_neighbors(4, 4), 4);
        life.tick().unwrap();
        assert!(!life.is_alive(4, 4));
    }

    #[test]
    fn test_dead_cell_with_three_is_born() {
        let mut life = with_cells(8, 8, &[(2, 2), (2, 4), (4, 3)]);
        assert!(!life.is_alive(3, 3));
        life.tick().unwrap();
        assert!(life.is_alive(3, 3));
    }

    #[test]
    fn test_block_is_still() {
        let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
        let mut life = with_cells(4, 4, &block);
        let before = life.cells_view().bytes().to_vec();
        for _ in 0..25 {
            life.tick().unwrap();
            assert_eq!(life.cells_view().bytes(), before.as_slice());
        }
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut life = with_cells(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        life.tick().unwrap();
        assert_eq!(live(&life), vec![(1, 2), (2, 2), (3, 2)]);
        life.tick().unwrap();
        assert_eq!(live(&life), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_glider_wraps_back_home() {
        let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
        let mut life = with_cells(8, 8, &glider);
        let start = life.cells_view().bytes().to_vec();
        // A glider moves one cell diagonally every 4 generations.
        life.step(4 * 8).unwrap();
        assert_eq!(life.cells_view().bytes(), start.as_slice());
        assert_eq!(life.generation(), 32);
    }

    #[test]
    fn test_generation_counts_ticks_since_reset() {
        let mut life = Automaton::new(10, 10, Initial::Random { seed: 3 }).unwrap();
        assert_eq!(life.generation(), 0);
        life.step(7).unwrap();
        assert_eq!(life.generation(), 7);
        life.toggle_cell(0, 0);
        assert_eq!(life.generation(), 7);
        life.reset(Initial::Dead).unwrap();
        assert_eq!(life.generation(), 0);
        assert_eq!(life.population(), 0);
        life.step(3).unwrap();
        assert_eq!(life.generation(), 3);
    }

    #[test]
    fn test_generation_saturates() {
        let mut life = Automaton::new(4, 4, Initial::Dead).unwrap();
        life.generation = u64::MAX - 1;
        life.tick().unwrap();
        life.tick().unwrap();
        assert_eq!(life.generation(), u64::MAX);
    }

    #[test]
    fn test_toggle_visible_in_view() {
        let mut life = Automaton::new(4, 4, Initial::Dead).unwrap();
        life.toggle_cell(-1, 4);
        assert!(life.cells_view().is_alive(3, 0));
    }

    #[test]
    fn test_corrupt_buffer_poisons_instance() {
        let mut life = Automaton::new(4, 4, Initial::Dead).unwrap();
        life.grid_mut().bytes_mut().push(0);

        let err = life.tick().unwrap_err();
        assert_eq!(err, LifeError::CorruptState { expected: 2, found: 3 });

        life.grid_mut().bytes_mut().pop();
        assert_eq!(life.tick(), Err(err.clone()));
        assert_eq!(life.reset(Initial::Dead), Err(err));
        assert_eq!(life.generation(), 0);
    }

    #[test]
    fn test_display_matches_grid() {
        let life = with_cells(2, 2, &[(0, 0)]);
        assert_eq!(life.to_string(), "◼◻\n◻◻\n");
    }
}
