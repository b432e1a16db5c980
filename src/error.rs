//! Errors returned while building or drawing a weighted graph.

/// Everything that can go wrong between a raw weight matrix and a finished drawing.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("weight matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("weight matrix entry ({row}, {col}) is not a finite number")]
    NonFinite { row: usize, col: usize },

    /// Normalizing divides by the largest entry, so at least one positive
    /// off-diagonal weight has to survive the cutoff.
    #[error("no positive off-diagonal weight left to normalize against")]
    NoPositiveWeight,

    #[error("expected {expected} node positions, got {found}")]
    PositionCount { expected: usize, found: usize },

    #[error("layout did not place node {0}")]
    MissingPosition(usize),

    #[error("arrow scale must be a positive finite number, got {0}")]
    InvalidScale(f32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
