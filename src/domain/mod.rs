mod automaton;
mod bit_grid;
mod cell;
mod error;
mod patterns;

pub use automaton::Automaton;
pub use bit_grid::{BitGrid, CellsView, Initial};
pub use cell::Cell;
pub use error::LifeError;
pub use patterns::{Pattern, presets};
