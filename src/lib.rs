//! Legal move generation and perft for standard chess.
//!
//! # Example
//! ```
//! use chess_perft::{perft, Position};
//!
//! let mut position = Position::new();
//! assert_eq!(perft(&mut position, 3), 8902);
//! ```

pub mod cli;
pub mod error;
pub mod perft;
pub mod position;
mod zobrist;

pub use error::Error;
pub use perft::{perft, perft_collect, perft_divide, perft_parallel, perft_report, PerftReport};
pub use position::{
    Bitboard, CastlingRights, Color, FenError, IllegalMoveError, Move, MoveList, MoveParseError,
    Piece, Position, PositionBuilder, Square, SquareError, UndoRecord,
};
