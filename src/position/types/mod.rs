//! Core chess types.
//!
//! - `Piece` and `Color` - piece kinds and colors
//! - `Square` - compact board square (u8 index)
//! - `Bitboard` - 64-bit square set
//! - `Move` and `MoveList` - move representation
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveList, MoveListIntoIter};
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use bitboard::pop_lsb;
pub(crate) use piece::PROMOTION_PIECES;
