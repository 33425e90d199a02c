use thiserror::Error;

use crate::maze::CellPos;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        reason: &'static str,
    },

    #[error("Invalid start or end cell {pos:?}: {reason}")]
    InvalidStartOrEnd {
        pos: Option<CellPos>,
        reason: &'static str,
    },

    #[error("Invalid grid: {reason}")]
    InvalidGrid { reason: String },

    /// The observer's cancellation check asked the running operation to stop.
    #[error("Operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, MazeError>;
