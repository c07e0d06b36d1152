//! Apply/undo tests.

use super::{find_move, sq};
use crate::position::{CastlingRights, Color, IllegalMoveError, Move, Piece, Position};

fn assert_round_trip(fen: &str, from: &str, to: &str, promotion: Option<Piece>) -> Position {
    let mut position = Position::from_fen(fen).unwrap();
    let original = position.clone();
    let mv = find_move(&mut position, from, to, promotion);
    let undo = position.apply(mv).unwrap();
    assert!(position.is_consistent());
    let after = position.clone();
    position.undo(undo);
    assert_eq!(position, original);
    after
}

#[test]
fn test_quiet_move_round_trip() {
    let after = assert_round_trip(Position::STARTING_FEN, "g1", "f3", None);
    assert_eq!(after.piece_at(sq("f3")), Some((Color::White, Piece::Knight)));
    assert_eq!(after.halfmove_clock(), 1);
    assert_eq!(after.fullmove_number(), 1);
    assert_eq!(after.side_to_move(), Color::Black);
}

#[test]
fn test_capture_round_trip() {
    let after = assert_round_trip(
        "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
        "e4",
        "d5",
        None,
    );
    assert_eq!(after.piece_at(sq("d5")), Some((Color::White, Piece::Pawn)));
    assert_eq!(after.occupied_by(Color::Black).popcount(), 15);
    assert_eq!(after.halfmove_clock(), 0);
    assert_eq!(after.en_passant_target(), None);
}

#[test]
fn test_en_passant_round_trip() {
    let after = assert_round_trip(
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "e5",
        "f6",
        None,
    );
    assert_eq!(after.piece_at(sq("f5")), None);
    assert_eq!(after.piece_at(sq("f6")), Some((Color::White, Piece::Pawn)));
}

#[test]
fn test_promotion_round_trip() {
    let after = assert_round_trip("8/P7/8/8/8/8/8/K1k5 w - - 0 1", "a7", "a8", Some(Piece::Queen));
    assert_eq!(after.piece_at(sq("a8")), Some((Color::White, Piece::Queen)));
    assert!(after.pieces(Color::White, Piece::Pawn).is_empty());
}

#[test]
fn test_promotion_capture_round_trip() {
    let after = assert_round_trip(
        "1r5k/P7/8/8/8/8/8/K7 w - - 0 1",
        "a7",
        "b8",
        Some(Piece::Knight),
    );
    assert_eq!(after.piece_at(sq("b8")), Some((Color::White, Piece::Knight)));
    assert!(after.pieces(Color::Black, Piece::Rook).is_empty());
}

#[test]
fn test_castling_round_trip() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    let kingside = assert_round_trip(fen, "e1", "g1", None);
    assert_eq!(kingside.piece_at(sq("f1")), Some((Color::White, Piece::Rook)));
    assert_eq!(kingside.piece_at(sq("h1")), None);
    assert!(!kingside.castling_rights().has(Color::White, true));
    assert!(!kingside.castling_rights().has(Color::White, false));
    assert!(kingside.castling_rights().has(Color::Black, true));

    let queenside = assert_round_trip(fen, "e1", "c1", None);
    assert_eq!(queenside.piece_at(sq("d1")), Some((Color::White, Piece::Rook)));
    assert_eq!(queenside.piece_at(sq("a1")), None);
}

#[test]
fn test_undo_restores_each_field() {
    let mut position =
        Position::from_fen("r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 5 20").unwrap();
    let mv = find_move(&mut position, "a1", "a8", None);
    let undo = position.apply(mv).unwrap();

    assert_eq!(undo.mv(), mv);
    assert_eq!(undo.captured(), Some(Piece::Rook));
    assert_eq!(position.castling_rights(), {
        let mut rights = CastlingRights::all();
        rights.remove(Color::White, false);
        rights.remove(Color::Black, false);
        rights
    });
    assert_eq!(position.en_passant_target(), None);
    assert_eq!(position.halfmove_clock(), 0);
    assert_eq!(position.fullmove_number(), 20);
    assert_eq!(position.side_to_move(), Color::Black);

    position.undo(undo);
    assert_eq!(position.castling_rights(), CastlingRights::all());
    assert_eq!(position.en_passant_target(), Some(sq("d6")));
    assert_eq!(position.halfmove_clock(), 5);
    assert_eq!(position.fullmove_number(), 20);
    assert_eq!(position.side_to_move(), Color::White);
    assert_eq!(position.piece_at(sq("a8")), Some((Color::Black, Piece::Rook)));
    assert_eq!(position.hash(), position.compute_hash());
}

#[test]
fn test_fullmove_increments_after_black() {
    let mut position = Position::new();
    position.apply_uci("e2e4").unwrap();
    assert_eq!(position.fullmove_number(), 1);
    position.apply_uci("e7e5").unwrap();
    assert_eq!(position.fullmove_number(), 2);
}

#[test]
fn test_rook_move_forfeits_one_right() {
    let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
    position.apply_uci("h8h5").unwrap();
    let rights = position.castling_rights();
    assert!(!rights.has(Color::Black, true));
    assert!(rights.has(Color::Black, false));
    assert!(rights.has(Color::White, true));
}

#[test]
fn test_apply_rejects_empty_source() {
    let mut position = Position::new();
    let original = position.clone();
    let mv = Move::quiet(sq("e4"), sq("e5"));
    assert_eq!(
        position.apply(mv),
        Err(IllegalMoveError::EmptySource {
            mv,
            square: sq("e4")
        })
    );
    assert_eq!(position, original);
}

#[test]
fn test_apply_rejects_wrong_color() {
    let mut position = Position::new();
    let original = position.clone();
    let mv = Move::quiet(sq("e7"), sq("e6"));
    assert!(matches!(
        position.apply(mv),
        Err(IllegalMoveError::WrongColor {
            owner: Color::Black,
            ..
        })
    ));
    assert_eq!(position, original);
}

#[test]
fn test_apply_rejects_impossible_move() {
    let mut position = Position::new();
    let original = position.clone();
    for mv in [
        Move::quiet(sq("e2"), sq("e5")),
        Move::quiet(sq("g1"), sq("g3")),
        Move::quiet(sq("a1"), sq("a3")),
        Move::castle_kingside(sq("e1"), sq("g1")),
        Move::en_passant(sq("e2"), sq("d3")),
    ] {
        assert_eq!(
            position.apply(mv),
            Err(IllegalMoveError::NotPseudoLegal { mv })
        );
        assert_eq!(position, original);
    }
}

#[test]
fn test_apply_accepts_pseudo_legal_move_into_check() {
    // The pinned knight may not move legally, but apply only checks
    // piece movement.
    let mut position = Position::from_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    let mv = Move::quiet(sq("e2"), sq("c3"));
    assert!(!position.legal_moves().contains(mv));
    let undo = position.apply(mv).unwrap();
    assert!(position.in_check(Color::White));
    position.undo(undo);
    assert!(!position.in_check(Color::White));
}
