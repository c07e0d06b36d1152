//! Position module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move-tree node counts against published results
//! - `make_unmake.rs` - Apply/undo correctness
//! - `edge_cases.rs` - Special positions and rule corner cases
//! - `proptest.rs` - Property-based tests over random games

mod make_unmake;

use super::{Move, Piece, Position, Square};

pub(super) fn sq(notation: &str) -> Square {
    notation.parse().expect("valid square")
}

pub(super) fn find_move(
    position: &mut Position,
    from: &str,
    to: &str,
    promotion: Option<Piece>,
) -> Move {
    let (from, to) = (sq(from), sq(to));
    position
        .legal_moves()
        .into_iter()
        .find(|m| m.from() == from && m.to() == to && m.promotion() == promotion)
        .expect("Expected move not found")
}
