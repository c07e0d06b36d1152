use std::fmt::Write as _;
use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{CastlingRights, Color, Move, Piece, Position, Square, UndoRecord};

impl Position {
    /// Parse a position from FEN notation.
    ///
    /// The halfmove clock and fullmove number may be omitted and default to
    /// 0 and 1. Nothing is returned unless the whole string is valid and each
    /// side has exactly one king.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&parts.len()) {
            return Err(FenError::WrongFieldCount { found: parts.len() });
        }

        let mut position = Position::empty();

        // Piece placement, rank 8 first
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let square = Square::new(rank, file).ok_or(FenError::WrongFileCount {
                        rank: rank + 1,
                        files: file + 1,
                    })?;
                    position.set_piece(square, color, piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::WrongFileCount {
                        rank: rank + 1,
                        files: file,
                    });
                }
            }
            if file != 8 {
                return Err(FenError::WrongFileCount {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        position.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        if parts[2] != "-" {
            let mut rights = CastlingRights::none();
            for c in parts[2].chars() {
                match c {
                    'K' => rights.set(Color::White, true),
                    'Q' => rights.set(Color::White, false),
                    'k' => rights.set(Color::Black, true),
                    'q' => rights.set(Color::Black, false),
                    _ => return Err(FenError::InvalidCastling { char: c }),
                }
            }
            position.castling_rights = rights;
        }

        if parts[3] != "-" {
            let invalid = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let square: Square = parts[3].parse().map_err(|_| invalid())?;
            // The target sits behind a pawn the opponent just pushed two squares
            let expected_rank = match position.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if square.rank() != expected_rank {
                return Err(invalid());
            }
            position.en_passant_target = Some(square);
        }

        if let Some(halfmove) = parts.get(4) {
            position.halfmove_clock = halfmove.parse().map_err(|_| FenError::InvalidCounter {
                found: (*halfmove).to_string(),
            })?;
        }
        if let Some(fullmove) = parts.get(5) {
            position.fullmove_number = fullmove
                .parse()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| FenError::InvalidCounter {
                    found: (*fullmove).to_string(),
                })?;
        }

        position.validate()?;
        position.hash = position.compute_hash();
        Ok(position)
    }

    /// Convert the position to six-field FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let piece = Square::new(rank, file).and_then(|sq| self.piece_at(sq));
                if let Some((color, piece)) = piece {
                    if empty > 0 {
                        fen.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    fen.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        let active = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let ep = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        // Writing into a String cannot fail
        let _ = write!(
            fen,
            " {active} {} {ep} {} {}",
            self.castling_rights, self.halfmove_clock, self.fullmove_number
        );
        fen
    }

    /// Parse a move in coordinate notation (e.g. "e2e4", "e7e8q").
    ///
    /// Returns the matching legal move, or an error describing why it does
    /// not name one.
    ///
    /// # Example
    /// ```
    /// use chess_perft::Position;
    ///
    /// let mut position = Position::new();
    /// let mv = position.parse_move("e2e4").unwrap();
    /// assert!(mv.is_double_pawn_push());
    /// ```
    pub fn parse_move(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        if !(4..=5).contains(&uci.len()) {
            return Err(MoveParseError::InvalidLength { len: uci.len() });
        }
        let invalid_square = || MoveParseError::InvalidSquare {
            notation: uci.to_string(),
        };
        if !uci.is_ascii() {
            return Err(invalid_square());
        }
        let from: Square = uci[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = uci[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match uci[4..].chars().next() {
            None => None,
            Some(c) => match Piece::from_char(c) {
                Some(piece @ (Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen))
                    if c.is_ascii_lowercase() =>
                {
                    Some(piece)
                }
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        self.legal_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }

    /// Parse a coordinate-notation move and apply it.
    ///
    /// # Example
    /// ```
    /// use chess_perft::Position;
    ///
    /// let mut position = Position::new();
    /// position.apply_uci("e2e4").unwrap();
    /// position.apply_uci("e7e5").unwrap();
    /// assert_eq!(position.fullmove_number(), 2);
    /// ```
    pub fn apply_uci(&mut self, uci: &str) -> Result<UndoRecord, MoveParseError> {
        let mv = self.parse_move(uci)?;
        Ok(self.make_move(mv))
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_fen_matches_constructor() {
        let position = Position::from_fen(Position::STARTING_FEN).unwrap();
        assert_eq!(position, Position::new());
        assert_eq!(position.to_fen(), Position::STARTING_FEN);
    }

    #[test]
    fn test_fen_round_trip_keeps_all_fields() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b Kq e3 7 42";
        let position = Position::from_fen(fen).unwrap();
        assert_eq!(position.to_fen(), fen);
        assert_eq!(position.side_to_move(), Color::Black);
        assert_eq!(position.en_passant_target(), Some("e3".parse().unwrap()));
        assert_eq!(position.halfmove_clock(), 7);
        assert_eq!(position.fullmove_number(), 42);
    }

    #[test]
    fn test_counters_default_when_omitted() {
        let position = Position::from_fen("8/8/8/8/8/8/8/K1k5 w - -").unwrap();
        assert_eq!(position.halfmove_clock(), 0);
        assert_eq!(position.fullmove_number(), 1);
    }

    #[test]
    fn test_fen_error_wrong_field_count() {
        let result = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert!(matches!(result, Err(FenError::WrongFieldCount { found: 2 })));
        let result = Position::from_fen(&format!("{} extra", Position::STARTING_FEN));
        assert!(matches!(result, Err(FenError::WrongFieldCount { found: 7 })));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let result = Position::from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { char: 'x' })));
    }

    #[test]
    fn test_fen_error_rank_shape() {
        let short = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(short, Err(FenError::WrongRankCount { found: 7 })));
        let narrow = Position::from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(narrow, Err(FenError::WrongFileCount { rank: 7, files: 7 })));
        let wide = Position::from_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(wide, Err(FenError::InvalidPiece { char: '9' })));
        let overflow = Position::from_fen("rnbqkbnr/pppppppp/71p/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(overflow, Err(FenError::WrongFileCount { .. })));
    }

    #[test]
    fn test_fen_error_invalid_side_to_move() {
        let result = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
    }

    #[test]
    fn test_fen_error_invalid_castling() {
        let result = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidCastling { char: 'X' })));
    }

    #[test]
    fn test_fen_error_invalid_en_passant() {
        let bad_square =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1");
        assert!(matches!(bad_square, Err(FenError::InvalidEnPassant { .. })));
        // White to move needs a target on rank 6
        let wrong_rank =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1");
        assert!(matches!(wrong_rank, Err(FenError::InvalidEnPassant { .. })));
    }

    #[test]
    fn test_fen_error_invalid_counters() {
        let result = Position::from_fen("8/8/8/8/8/8/8/K1k5 w - - x 1");
        assert!(matches!(result, Err(FenError::InvalidCounter { .. })));
        let result = Position::from_fen("8/8/8/8/8/8/8/K1k5 w - - 0 0");
        assert!(matches!(result, Err(FenError::InvalidCounter { .. })));
    }

    #[test]
    fn test_fen_error_king_count() {
        let result = Position::from_fen("8/8/8/8/8/8/8/K7 w - - 0 1");
        assert!(matches!(
            result,
            Err(FenError::KingCount {
                color: Color::Black,
                count: 0
            })
        ));
        let result = Position::from_fen("k7/8/8/8/8/8/8/KK6 w - - 0 1");
        assert!(matches!(
            result,
            Err(FenError::KingCount {
                color: Color::White,
                count: 2
            })
        ));
    }

    #[test]
    fn test_fen_error_opponent_in_check() {
        // White to move could capture the black king along the back rank
        let result = Position::from_fen("7k/8/8/8/8/8/8/K6R w - - 0 1");
        assert_eq!(
            result,
            Err(FenError::OpponentInCheck {
                color: Color::Black
            })
        );

        let mut position = Position::from_fen("7k/8/8/8/8/8/8/K6R b - - 0 1").unwrap();
        assert!(position.in_check(Color::Black));
        let targets: Vec<String> = position
            .legal_moves()
            .iter()
            .map(|m| m.to().to_string())
            .collect();
        assert_eq!(targets, ["g7", "g8"]);
    }

    #[test]
    fn test_from_str_trait() {
        let position: Position = Position::STARTING_FEN.parse().unwrap();
        assert_eq!(position.side_to_move(), Color::White);
    }

    #[test]
    fn test_parse_move_promotion() {
        let mut position = Position::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        let mv = position.parse_move("a7a8q").unwrap();
        assert_eq!(mv.promotion(), Some(Piece::Queen));
        let mv = position.parse_move("a7a8n").unwrap();
        assert_eq!(mv.promotion(), Some(Piece::Knight));
    }

    #[test]
    fn test_parse_move_errors() {
        let mut position = Position::new();
        assert!(matches!(
            position.parse_move("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        ));
        assert!(matches!(
            position.parse_move("z9z9"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            position.parse_move("e2e5"),
            Err(MoveParseError::IllegalMove { .. })
        ));
        assert!(matches!(
            position.parse_move("e2e4k"),
            Err(MoveParseError::InvalidPromotion { char: 'k' })
        ));
    }

    #[test]
    fn test_apply_uci_sequence() {
        let mut position = Position::new();
        for mv in ["e2e4", "c7c5", "g1f3"] {
            position.apply_uci(mv).unwrap();
        }
        assert_eq!(
            position.to_fen(),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
    }
}
