use super::super::attack_tables::KNIGHT_ATTACKS;
use super::super::{Bitboard, MoveList, Position, Square};

impl Position {
    pub(crate) fn generate_knight_moves(&self, from: Square, moves: &mut MoveList) {
        let targets = Bitboard(KNIGHT_ATTACKS[from.index()]);
        self.push_targets(from, targets, moves);
    }
}
