use log::warn;

use crate::zobrist::ZOBRIST;

use super::error::IllegalMoveError;
use super::{Color, Move, Piece, Position, Square, UndoRecord};

/// Rook source and destination for a castling move landing the king on `king_to`
#[inline]
pub(crate) fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    let base = king_to.rank() * 8;
    if king_to.file() == 6 {
        (Square::from_index(base + 7), Square::from_index(base + 5))
    } else {
        (Square::from_index(base), Square::from_index(base + 3))
    }
}

/// Square of the pawn removed by an en passant capture onto `to` by `color`
#[inline]
pub(crate) fn en_passant_victim(to: Square, color: Color) -> Square {
    match color {
        Color::White => Square::from_index(to.index() - 8),
        Color::Black => Square::from_index(to.index() + 8),
    }
}

impl Position {
    /// Apply a move, returning the record that reverses it.
    ///
    /// The move must be pseudo-legal in this position (moves from
    /// [`Position::legal_moves`] always are). Anything else is rejected with
    /// [`IllegalMoveError`] and the position is left untouched.
    pub fn apply(&mut self, mv: Move) -> Result<UndoRecord, IllegalMoveError> {
        if let Err(err) = self.check_pseudo_legal(mv) {
            warn!("rejected move {mv}: {err}");
            return Err(err);
        }
        Ok(self.make_move(mv))
    }

    /// Apply a move known to come from the generator.
    ///
    /// # Panics
    /// Panics if the side to move has no piece on the source square.
    pub(crate) fn make_move(&mut self, mv: Move) -> UndoRecord {
        let color = self.side_to_move;
        let opponent = color.opponent();
        let from = mv.from();
        let to = mv.to();
        let moved = self
            .piece_kind_at(color, from)
            .expect("make_move: source square holds no piece of the side to move");

        let mut hash = self.hash ^ ZOBRIST.castling(self.castling_rights);
        if let Some(ep) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant(ep);
        }

        let mut record = UndoRecord {
            mv,
            moved,
            captured: None,
            previous_castling_rights: self.castling_rights,
            previous_en_passant_target: self.en_passant_target,
            previous_halfmove_clock: self.halfmove_clock,
            previous_fullmove_number: self.fullmove_number,
            previous_hash: self.hash,
        };

        if mv.is_en_passant() {
            let victim_sq = en_passant_victim(to, color);
            self.remove_piece(victim_sq, opponent, Piece::Pawn);
            hash ^= ZOBRIST.piece(opponent, Piece::Pawn, victim_sq);
            record.captured = Some(Piece::Pawn);
        } else if let Some(victim) = self.piece_kind_at(opponent, to) {
            self.remove_piece(to, opponent, victim);
            hash ^= ZOBRIST.piece(opponent, victim, to);
            record.captured = Some(victim);
        }

        self.remove_piece(from, color, moved);
        hash ^= ZOBRIST.piece(color, moved, from);
        let placed = mv.promotion().unwrap_or(moved);
        self.set_piece(to, color, placed);
        hash ^= ZOBRIST.piece(color, placed, to);

        if mv.is_castling() {
            let (rook_from, rook_to) = castle_rook_squares(to);
            self.remove_piece(rook_from, color, Piece::Rook);
            self.set_piece(rook_to, color, Piece::Rook);
            hash ^= ZOBRIST.piece(color, Piece::Rook, rook_from);
            hash ^= ZOBRIST.piece(color, Piece::Rook, rook_to);
        }

        self.en_passant_target = if mv.is_double_pawn_push() {
            let ep = Square::from_index((from.index() + to.index()) / 2);
            hash ^= ZOBRIST.en_passant(ep);
            Some(ep)
        } else {
            None
        };

        if moved == Piece::King {
            self.castling_rights.remove_color(color);
        }
        self.castling_rights.forfeit_for_square(from);
        self.castling_rights.forfeit_for_square(to);
        hash ^= ZOBRIST.castling(self.castling_rights);

        if moved == Piece::Pawn || record.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = opponent;
        self.hash = hash ^ ZOBRIST.side();

        record
    }

    /// Reverse the most recent `apply`, restoring the exact prior position.
    ///
    /// `record` must be the value returned by the last unreversed `apply` on
    /// this position.
    pub fn undo(&mut self, record: UndoRecord) {
        let mv = record.mv;
        let color = self.side_to_move.opponent();
        let from = mv.from();
        let to = mv.to();

        let placed = mv.promotion().unwrap_or(record.moved);
        self.remove_piece(to, color, placed);
        self.set_piece(from, color, record.moved);

        if mv.is_castling() {
            let (rook_from, rook_to) = castle_rook_squares(to);
            self.remove_piece(rook_to, color, Piece::Rook);
            self.set_piece(rook_from, color, Piece::Rook);
        }

        if let Some(captured) = record.captured {
            let victim_sq = if mv.is_en_passant() {
                en_passant_victim(to, color)
            } else {
                to
            };
            self.set_piece(victim_sq, color.opponent(), captured);
        }

        self.side_to_move = color;
        self.castling_rights = record.previous_castling_rights;
        self.en_passant_target = record.previous_en_passant_target;
        self.halfmove_clock = record.previous_halfmove_clock;
        self.fullmove_number = record.previous_fullmove_number;
        self.hash = record.previous_hash;
    }
}
