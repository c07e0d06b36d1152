//! Chess position representation and rules.
//!
//! Uses bitboards for move generation. Supports the full rules needed for
//! move-tree enumeration: castling, en passant and promotions.
//!
//! # Example
//! ```
//! use chess_perft::Position;
//!
//! let mut position = Position::new();
//! let moves = position.legal_moves();
//! assert_eq!(moves.len(), 20);
//! ```

mod attack_tables;
mod builder;
mod error;
mod fen;
mod make_unmake;
mod movegen;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use builder::PositionBuilder;
pub use error::{FenError, IllegalMoveError, MoveParseError, SquareError};
pub use state::{Position, UndoRecord};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece,
    Square,
};

pub(crate) use types::{pop_lsb, PROMOTION_PIECES};
