use super::super::attack_tables::PAWN_ATTACKS;
use super::super::make_unmake::en_passant_victim;
use super::super::{Bitboard, Move, MoveList, Piece, Position, Square, PROMOTION_PIECES};

impl Position {
    /// Pushes, captures, en passant and promotions for the pawn on `from`,
    /// in ascending target order.
    pub(crate) fn generate_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.side_to_move;
        let opponent = color.opponent();
        let dir = color.pawn_direction();
        let promotion_rank = color.pawn_promotion_rank();
        let enemies = self.occupied_by(opponent);

        let mut targets = Bitboard::EMPTY;
        if let Some(forward) = from.offset(dir, 0).filter(|sq| self.is_empty(*sq)) {
            targets |= Bitboard::from_square(forward);
            if from.rank() == color.pawn_start_rank() {
                if let Some(double) = forward.offset(dir, 0).filter(|sq| self.is_empty(*sq)) {
                    targets |= Bitboard::from_square(double);
                }
            }
        }

        let mut capturable = enemies;
        if let Some(ep) = self.en_passant_target {
            // A stale target with no pawn behind it is not capturable
            if self.piece_kind_at(opponent, en_passant_victim(ep, color)) == Some(Piece::Pawn) {
                capturable |= Bitboard::from_square(ep);
            }
        }
        targets |= Bitboard(PAWN_ATTACKS[color.index()][from.index()]) & capturable;

        for to in targets.iter() {
            let is_push = to.file() == from.file();
            if to.rank() == promotion_rank {
                for promo in PROMOTION_PIECES {
                    moves.push(if is_push {
                        Move::new_promotion(from, to, promo)
                    } else {
                        Move::new_promotion_capture(from, to, promo)
                    });
                }
            } else if is_push {
                if to.rank().abs_diff(from.rank()) == 2 {
                    moves.push(Move::double_pawn_push(from, to));
                } else {
                    moves.push(Move::quiet(from, to));
                }
            } else if enemies.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::en_passant(from, to));
            }
        }
    }
}
