//! Error types for position operations.

use thiserror::Error;

use super::types::{Color, Move, Square};

/// Malformed position encoding (FEN)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    /// FEN string has the wrong number of fields (needs 4 to 6)
    #[error("FEN must have 4 to 6 fields, found {found}")]
    WrongFieldCount { found: usize },
    /// Invalid piece character in position string
    #[error("Invalid piece character '{char}' in FEN")]
    InvalidPiece { char: char },
    /// Board field does not have exactly 8 ranks
    #[error("FEN board must have 8 ranks, found {found}")]
    WrongRankCount { found: usize },
    /// A rank does not describe exactly 8 files
    #[error("Rank {rank} describes {files} files, expected 8")]
    WrongFileCount { rank: usize, files: usize },
    /// Invalid side to move (must be 'w' or 'b')
    #[error("Invalid side to move '{found}', expected 'w' or 'b'")]
    InvalidSideToMove { found: String },
    /// Invalid castling character
    #[error("Invalid castling character '{char}' in FEN")]
    InvalidCastling { char: char },
    /// Invalid en passant square
    #[error("Invalid en passant square '{found}'")]
    InvalidEnPassant { found: String },
    /// Halfmove clock or fullmove number is not a valid number
    #[error("Invalid move counter '{found}'")]
    InvalidCounter { found: String },
    /// A side does not have exactly one king
    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: u32 },
    /// The side not to move is in check, so its king could be captured
    #[error("{color} is in check but it is not their turn")]
    OpponentInCheck { color: Color },
}

/// A move handed to `apply` that is not pseudo-legal in the current position
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMoveError {
    /// Nothing stands on the source square
    #[error("No piece on {square} for move {mv}")]
    EmptySource { mv: Move, square: Square },
    /// The piece on the source square belongs to the side not on move
    #[error("Piece on {square} belongs to {owner}, not the side to move")]
    WrongColor { mv: Move, square: Square, owner: Color },
    /// The piece on the source square cannot make this move
    #[error("Move {mv} is not pseudo-legal in this position")]
    NotPseudoLegal { mv: Move },
}

/// Error type for move parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    #[error("Move must be 4-5 characters, found {len}")]
    InvalidLength { len: usize },
    /// Invalid square notation in move
    #[error("Invalid square notation in '{notation}'")]
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    #[error("Invalid promotion piece '{char}'")]
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    #[error("Illegal move '{notation}'")]
    IllegalMove { notation: String },
}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    #[error("Rank {rank} out of bounds (must be 0-7)")]
    RankOutOfBounds { rank: usize },
    #[error("File {file} out of bounds (must be 0-7)")]
    FileOutOfBounds { file: usize },
    #[error("Invalid square notation '{notation}'")]
    InvalidNotation { notation: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_error_messages() {
        let err = FenError::WrongFieldCount { found: 2 };
        assert!(err.to_string().contains('2'));
        let err = FenError::InvalidPiece { char: 'z' };
        assert!(err.to_string().contains("'z'"));
        let err = FenError::KingCount {
            color: Color::Black,
            count: 0,
        };
        assert_eq!(err.to_string(), "Black must have exactly one king, found 0");
    }

    #[test]
    fn test_illegal_move_message_names_move() {
        let mv = Move::quiet(Square::E1, Square::E8);
        let err = IllegalMoveError::NotPseudoLegal { mv };
        assert!(err.to_string().contains("e1e8"));
    }

    #[test]
    fn test_move_parse_error_messages() {
        let err = MoveParseError::InvalidLength { len: 3 };
        assert!(err.to_string().contains('3'));
        let err = MoveParseError::IllegalMove {
            notation: "e2e5".to_string(),
        };
        assert!(err.to_string().contains("e2e5"));
    }

    #[test]
    fn test_square_error_messages() {
        let err = SquareError::FileOutOfBounds { file: 10 };
        assert!(err.to_string().contains("10"));
        let err = SquareError::InvalidNotation {
            notation: "xyz".to_string(),
        };
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_error_clone_eq() {
        let err = FenError::InvalidCastling { char: 'x' };
        assert_eq!(err.clone(), err);
    }
}
