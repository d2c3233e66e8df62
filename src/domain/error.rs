use thiserror::Error;

/// Errors raised by the simulation core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// A grid needs at least one row and one column.
    #[error("invalid grid dimension {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// A packed buffer no longer matches its declared dimensions.
    /// The automaton that reports this refuses to tick again.
    #[error("corrupt grid state: expected {expected} bytes, found {found}")]
    CorruptState { expected: usize, found: usize },
}
