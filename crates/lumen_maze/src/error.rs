//! Maze generation errors

use thiserror::Error;

/// Errors raised while validating a maze configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MazeError {
    /// Width or height is zero
    #[error("Invalid maze dimensions {width}x{height}: both must be greater than 0")]
    InvalidDimensions { width: usize, height: usize },

    /// Width times height exceeds [`MAX_CELLS`](crate::config::MAX_CELLS)
    #[error("Maze dimensions {width}x{height} exceed the limit of {max} cells")]
    TooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    /// Serialized grid cells do not match its dimensions
    #[error("Grid of {width}x{height} needs {expected} cells, found {actual}")]
    CellCountMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Room size is zero
    #[error("Invalid room size {0}: must be greater than 0")]
    InvalidRoomSize(usize),

    /// A probability is outside [0, 1]
    #[error("Invalid probability for {name}: {value} is not within [0, 1]")]
    InvalidProbability { name: &'static str, value: f32 },

    /// Cell footprint or wall height is not a positive number
    #[error("Invalid footprint for {name}: {value} must be positive")]
    InvalidFootprint { name: &'static str, value: f32 },
}

/// Result type for maze operations
pub type MazeResult<T> = Result<T, MazeError>;
