use crate::zobrist::ZOBRIST;

use super::error::FenError;
use super::types::{Bitboard, CastlingRights, Color, Move, Piece, Square};

/// Everything `undo` needs to reverse one `apply`.
///
/// Board squares are rebuilt from the move and the two piece kinds; every
/// scalar field apply can change is stored verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndoRecord {
    pub(crate) mv: Move,
    pub(crate) moved: Piece,
    pub(crate) captured: Option<Piece>,
    pub(crate) previous_castling_rights: CastlingRights,
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_fullmove_number: u32,
    pub(crate) previous_hash: u64,
}

impl UndoRecord {
    /// The move this record reverses
    #[must_use]
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// The piece kind captured by the move, if any
    #[must_use]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

/// A chess position: piece placement, side to move, castling rights,
/// en passant target and move counters.
///
/// Equality compares every field, so two positions are equal exactly when
/// they are the same board state with the same history-dependent flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
}

impl Position {
    /// FEN of the standard starting position
    pub const STARTING_FEN: &'static str =
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// The standard starting position
    #[must_use]
    pub fn new() -> Self {
        let mut position = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.into_iter().enumerate() {
            position.set_piece(Square::from_index(file), Color::White, piece);
            position.set_piece(Square::from_index(56 + file), Color::Black, piece);
            position.set_piece(Square::from_index(8 + file), Color::White, Piece::Pawn);
            position.set_piece(Square::from_index(48 + file), Color::Black, Piece::Pawn);
        }
        position.castling_rights = CastlingRights::all();
        position.hash = position.compute_hash();
        position
    }

    pub(crate) fn empty() -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Zobrist hash of the position
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Squares occupied by `color`
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    /// Squares holding `piece` of `color`
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.all_occupied |= bit;
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let keep = !Bitboard::from_square(sq);
        let pieces = &mut self.pieces[color.index()][piece.index()];
        *pieces = *pieces & keep;
        self.occupied[color.index()] = self.occupied[color.index()] & keep;
        self.all_occupied = self.all_occupied & keep;
    }

    /// The piece standing on `sq`, if any
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if !self.all_occupied.contains(sq) {
            return None;
        }
        let color = if self.occupied[Color::White.index()].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        self.piece_kind_at(color, sq).map(|piece| (color, piece))
    }

    /// Kind of `color`'s piece on `sq`, if one stands there
    pub(crate) fn piece_kind_at(&self, color: Color, sq: Square) -> Option<Piece> {
        if !self.occupied[color.index()].contains(sq) {
            return None;
        }
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()].contains(sq))
    }

    pub(crate) fn is_empty(&self, sq: Square) -> bool {
        !self.all_occupied.contains(sq)
    }

    /// Square of `color`'s king, if it has one
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).lsb()
    }

    /// Recompute the Zobrist hash from scratch
    pub(crate) fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces(color, piece).iter() {
                    hash ^= ZOBRIST.piece(color, piece, sq);
                }
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side();
        }
        hash ^= ZOBRIST.castling(self.castling_rights);
        if let Some(ep) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant(ep);
        }
        hash
    }

    /// Check the structural invariants: exactly one king per side, and the
    /// side that just moved is not left in check.
    pub(crate) fn validate(&self) -> Result<(), FenError> {
        for color in Color::BOTH {
            let count = self.pieces(color, Piece::King).popcount();
            if count != 1 {
                return Err(FenError::KingCount { color, count });
            }
        }
        let waiting = self.side_to_move.opponent();
        if self.in_check(waiting) {
            return Err(FenError::OpponentInCheck { color: waiting });
        }
        Ok(())
    }

    /// True when the derived occupancy masks agree with the per-piece
    /// bitboards and no square holds two pieces.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = Bitboard::EMPTY;
        for color in Color::BOTH {
            let mut union = Bitboard::EMPTY;
            for piece in Piece::ALL {
                let bb = self.pieces(color, piece);
                if !(seen & bb).is_empty() {
                    return false;
                }
                seen |= bb;
                union |= bb;
            }
            if union != self.occupied_by(color) {
                return false;
            }
        }
        seen == self.all_occupied && self.hash == self.compute_hash()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_layout() {
        let position = Position::new();
        assert_eq!(position.all_occupied.popcount(), 32);
        assert_eq!(position.king_square(Color::White), Some(Square::E1));
        assert_eq!(position.king_square(Color::Black), Some(Square::E8));
        assert_eq!(position.piece_at(Square::D8), Some((Color::Black, Piece::Queen)));
        assert_eq!(position.piece_at("e4".parse().unwrap()), None);
        assert_eq!(position.castling_rights(), CastlingRights::all());
        assert_eq!(position.fullmove_number(), 1);
        assert!(position.is_consistent());
        assert!(position.validate().is_ok());
    }

    #[test]
    fn test_set_and_remove_keep_masks_in_step() {
        let mut position = Position::empty();
        let sq: Square = "d4".parse().unwrap();
        position.set_piece(sq, Color::Black, Piece::Knight);
        assert_eq!(position.piece_at(sq), Some((Color::Black, Piece::Knight)));
        assert!(position.occupied_by(Color::Black).contains(sq));
        position.remove_piece(sq, Color::Black, Piece::Knight);
        assert!(position.is_empty(sq));
        assert!(position.all_occupied.is_empty());
    }

    #[test]
    fn test_validate_rejects_missing_king() {
        let mut position = Position::empty();
        position.set_piece(Square::E1, Color::White, Piece::King);
        assert_eq!(
            position.validate(),
            Err(FenError::KingCount {
                color: Color::Black,
                count: 0
            })
        );
    }
}
