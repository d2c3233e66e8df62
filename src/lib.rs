// Simulation core: grid, rule, generation counter
pub mod domain;

// Frame scheduling and play/pause
pub mod application;

// Pointer mapping
pub mod input;

// Host-side pieces: macroquad drawing, settings, log setup
pub mod rendering;
pub mod config;
pub mod logging;

pub use domain::{Automaton, BitGrid, Cell, CellsView, Initial, LifeError, Pattern, presets};
pub use application::{FrameHandle, FrameHost, FrameOutcome, FrameQueue, LoopState, RenderLoop, ScheduleError};
pub use input::{InputAdapter, Pointer, SurfaceGeometry};
pub use config::LifeConfig;
