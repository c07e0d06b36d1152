use super::super::attack_tables::{
    bishop_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS,
};
use super::super::{Bitboard, Color, Move, MoveList, Piece, Position, Square};

impl Position {
    /// King steps plus castling.
    ///
    /// Castling is offered when the right is held, the king and rook stand
    /// on their home squares and every square between them is empty. Check
    /// conditions are applied by the legality filter.
    pub(crate) fn generate_king_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.side_to_move;
        self.push_targets(from, Bitboard(KING_ATTACKS[from.index()]), moves);

        let back_rank = color.back_rank();
        if Square::new(back_rank, 4) != Some(from) {
            return;
        }
        let base = back_rank * 8;
        let sq = |file: usize| Square::from_index(base + file);
        let rook = Some(Piece::Rook);

        if self.castling_rights.has(color, true)
            && self.is_empty(sq(5))
            && self.is_empty(sq(6))
            && self.piece_kind_at(color, sq(7)) == rook
        {
            moves.push(Move::castle_kingside(from, sq(6)));
        }
        if self.castling_rights.has(color, false)
            && self.is_empty(sq(1))
            && self.is_empty(sq(2))
            && self.is_empty(sq(3))
            && self.piece_kind_at(color, sq(0)) == rook
        {
            moves.push(Move::castle_queenside(from, sq(2)));
        }
    }

    /// True if any piece of `by_color` attacks `square` in the current position.
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        let idx = square.index();
        let pieces = |piece: Piece| self.pieces(by_color, piece).0;

        // A pawn of `by_color` attacks `square` iff a pawn of the other color
        // on `square` would attack the pawn's square.
        if pieces(Piece::Pawn) & PAWN_ATTACKS[by_color.opponent().index()][idx] != 0 {
            return true;
        }
        if pieces(Piece::Knight) & KNIGHT_ATTACKS[idx] != 0 {
            return true;
        }
        if pieces(Piece::King) & KING_ATTACKS[idx] != 0 {
            return true;
        }

        let queens = pieces(Piece::Queen);
        let occupancy = self.all_occupied.0;
        if rook_attacks(idx, occupancy) & (pieces(Piece::Rook) | queens) != 0 {
            return true;
        }
        bishop_attacks(idx, occupancy) & (pieces(Piece::Bishop) | queens) != 0
    }

    /// True if `color`'s king is attacked by the opponent
    #[must_use]
    pub fn in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, color.opponent()))
    }
}
