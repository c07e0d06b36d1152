use super::super::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use super::super::{Bitboard, MoveList, Position, Square};

/// Type of sliding piece for move generation
#[derive(Clone, Copy, Debug)]
pub(crate) enum SliderType {
    Bishop,
    Rook,
    Queen,
}

impl Position {
    /// Ray moves for a slider; each ray stops at the first blocker, which
    /// is a capture target when it belongs to the opponent.
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        slider: SliderType,
        moves: &mut MoveList,
    ) {
        let occupancy = self.all_occupied.0;
        let idx = from.index();
        let targets = match slider {
            SliderType::Bishop => bishop_attacks(idx, occupancy),
            SliderType::Rook => rook_attacks(idx, occupancy),
            SliderType::Queen => queen_attacks(idx, occupancy),
        };
        self.push_targets(from, Bitboard(targets), moves);
    }
}
