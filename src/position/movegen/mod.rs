//! Legal move generation.
//!
//! Pseudo-legal moves are produced per piece kind and then filtered by
//! applying each one and checking whether the mover's king is attacked.
//! Generation order is fixed (pawns, knights, bishops, rooks, queens, king;
//! ascending source square; ascending target square) so traversals are
//! reproducible.

mod kings;
mod knights;
mod pawns;
mod sliders;

use sliders::SliderType;

use super::error::IllegalMoveError;
use super::{pop_lsb, Bitboard, Move, MoveList, Piece, Position, Square};

impl Position {
    /// Push a quiet move or capture for every target not holding an own piece
    #[inline]
    fn push_targets(&self, from: Square, targets: Bitboard, moves: &mut MoveList) {
        let color = self.side_to_move;
        let enemies = self.occupied_by(color.opponent());
        let targets = targets & !self.occupied_by(color);
        for to in targets.iter() {
            if enemies.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }

    fn generate_piece_moves(&self, from: Square, piece: Piece, moves: &mut MoveList) {
        match piece {
            Piece::Pawn => self.generate_pawn_moves(from, moves),
            Piece::Knight => self.generate_knight_moves(from, moves),
            Piece::Bishop => self.generate_slider_moves(from, SliderType::Bishop, moves),
            Piece::Rook => self.generate_slider_moves(from, SliderType::Rook, moves),
            Piece::Queen => self.generate_slider_moves(from, SliderType::Queen, moves),
            Piece::King => self.generate_king_moves(from, moves),
        }
    }

    pub(crate) fn generate_pseudo_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let color = self.side_to_move;
        for piece in Piece::ALL {
            let mut bb = self.pieces(color, piece);
            while !bb.is_empty() {
                let from = pop_lsb(&mut bb);
                self.generate_piece_moves(from, piece, &mut moves);
            }
        }
        moves
    }

    /// Confirm `mv` is one of the pseudo-legal moves of the piece it moves.
    pub(crate) fn check_pseudo_legal(&self, mv: Move) -> Result<(), IllegalMoveError> {
        let square = mv.from();
        let Some((owner, piece)) = self.piece_at(square) else {
            return Err(IllegalMoveError::EmptySource { mv, square });
        };
        if owner != self.side_to_move {
            return Err(IllegalMoveError::WrongColor { mv, square, owner });
        }
        let mut moves = MoveList::new();
        self.generate_piece_moves(square, piece, &mut moves);
        if moves.contains(mv) {
            Ok(())
        } else {
            Err(IllegalMoveError::NotPseudoLegal { mv })
        }
    }

    /// All legal moves for the side to move.
    ///
    /// An empty list means the game is over: checkmate if the side to move is
    /// in check, stalemate otherwise.
    pub fn legal_moves(&mut self) -> MoveList {
        let color = self.side_to_move;
        let opponent = color.opponent();
        let pseudo_moves = self.generate_pseudo_moves();
        let mut legal_moves = MoveList::new();

        for &mv in pseudo_moves.iter() {
            if mv.is_castling() {
                // The king may not castle out of, or through, check; the
                // landing square is covered by the filter below.
                let crossed = Square::from_index((mv.from().index() + mv.to().index()) / 2);
                if self.is_square_attacked(mv.from(), opponent)
                    || self.is_square_attacked(crossed, opponent)
                {
                    continue;
                }
            }

            let undo = self.make_move(mv);
            let leaves_king_safe = !self.in_check(color);
            self.undo(undo);
            if leaves_king_safe {
                legal_moves.push(mv);
            }
        }
        legal_moves
    }

    /// Side to move is in check and has no legal move
    pub fn is_checkmate(&mut self) -> bool {
        self.in_check(self.side_to_move) && self.legal_moves().is_empty()
    }

    /// Side to move is not in check and has no legal move
    pub fn is_stalemate(&mut self) -> bool {
        !self.in_check(self.side_to_move) && self.legal_moves().is_empty()
    }
}
