use thiserror::Error;

/// Convenient result alias for the maze library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A maze needs at least one row and one column.
    #[error("maze dimensions must be at least 1x1, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Raised when a coordinate handed to the maze lies outside the grid.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Raised when a generator or solver name is not registered.
    #[error("unknown {kind} algorithm: {name}")]
    UnknownAlgorithm { kind: &'static str, name: String },

    /// Raised when `dequeue` is called on an empty priority queue.
    #[error("dequeue called on an empty priority queue")]
    EmptyQueue,

    /// Raised when a run observes its cancel flag at a step boundary.
    #[error("run was cancelled")]
    Cancelled,

    /// Raised when an exported maze document cannot be turned back into a maze.
    #[error("invalid maze export: {reason}")]
    InvalidExport { reason: String },

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
