//! Crate-level error type.

use thiserror::Error;

use crate::position::{FenError, IllegalMoveError, MoveParseError, SquareError};

/// Any failure the library can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid position: {0}")]
    InvalidPositionEncoding(#[from] FenError),
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMoveError),
    #[error("bad move text: {0}")]
    MoveParse(#[from] MoveParseError),
    #[error("bad square: {0}")]
    Square(#[from] SquareError),
}
