//! Error types for the board model

use thiserror::Error;

use crate::types::GamePosition;

/// Result type alias using the board model Error
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid piece position ({x}, {y}): coordinates must be within 0-7")]
    OutOfBounds { x: i32, y: i32 },

    #[error("invalid jump move {from} -> {to}: captured piece position is missing")]
    MalformedJump { from: GamePosition, to: GamePosition },

    #[error("captured board has {actual} cells, expected {expected}")]
    BadCaptureLength { actual: usize, expected: usize },
}
