//! End-to-end scenarios played through notation.

use chess_core::{CastlingRights, Color, PieceKind, Square, Wing};
use chess_rules::{Board, MoveError, Movetext, Player, Role, Status};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn replay(text: &str) -> Board {
    Player::new(Movetext::parse(text), Board::new())
        .play()
        .unwrap()
}

#[test]
fn opening_pawn_push() {
    let mut board = Board::new();
    assert_eq!(board.play(Color::White, "e4"), Ok(true));
    assert_eq!(board.piece_at(sq("e4")).unwrap().kind(), PieceKind::Pawn);
    assert!(board.piece_at(sq("e2")).is_none());
    assert_eq!(board.turn(), Color::Black);
}

#[test]
fn knight_twice_in_a_row() {
    let mut board = Board::new();
    assert_eq!(board.play(Color::White, "Nf3"), Ok(true));
    assert_eq!(board.play(Color::White, "Nf3"), Ok(false));
}

#[test]
fn short_castle_from_setup() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    assert_eq!(board.play(Color::White, "O-O"), Ok(true));
    assert_eq!(board.piece_at(Square::G1).unwrap().kind(), PieceKind::King);
    assert_eq!(board.piece_at(Square::F1).unwrap().kind(), PieceKind::Rook);
    assert!(board.castling()[Color::White].castled);
}

#[test]
fn fools_mate() {
    let board = replay("1.f3 e5 2.g4 Qh4#");
    assert!(board.is_check());
    assert!(board.is_mate());
    assert!(board.legal_moves().is_empty());
    assert_eq!(board.status(), Status::Checkmate);
}

#[test]
fn scholars_mate() {
    let board = replay("1.e4 e5 2.Bc4 Nc6 3.Qh5 Nf6 4.Qxf7#");
    assert_eq!(board.status(), Status::Checkmate);
    assert_eq!(board.captures(Color::White).len(), 1);
    assert_eq!(board.movetext(), "1.e4 e5 2.Bc4 Nc6 3.Qh5 Nf6 4.Qxf7#");
}

#[test]
fn promotion_to_queen() {
    let mut board = Board::from_fen("8/4P3/8/8/8/8/8/k3K3 w - - 0 1").unwrap();
    assert_eq!(board.play(Color::White, "e8=Q"), Ok(true));
    let queen = board.piece_at(Square::E8).unwrap();
    assert_eq!(queen.kind(), PieceKind::Queen);
    assert_eq!(queen.color(), Color::White);
}

#[test]
fn castling_rights_lost_after_king_walk() {
    let mut board = replay("1.e4 e5 2.Nf3 Nc6 3.Bc4 Bc5 4.Ke2 Nf6 5.Ke1 d6");
    assert_eq!(board.castling()[Color::White], CastlingRights::NONE);
    assert_eq!(board.play(Color::White, "O-O"), Ok(false));
    assert!(!board.castle(Color::White, Wing::Short));
    assert_eq!(board.play(Color::White, "d3"), Ok(true));
    assert_eq!(board.play(Color::Black, "O-O"), Ok(true));
    assert_eq!(board.castling()[Color::Black], CastlingRights::CASTLED);
}

#[test]
fn captured_home_rook_forfeits_castling() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1").unwrap();
    assert_eq!(board.play(Color::White, "Bxa8"), Ok(true));
    assert!(!board.castling()[Color::Black].long);
    assert!(board.castling()[Color::Black].short);
    assert_eq!(board.play(Color::Black, "O-O-O"), Ok(false));
    assert_eq!(board.play(Color::Black, "O-O"), Ok(true));
}

#[test]
fn en_passant_through_notation() {
    let mut board = replay("1.e4 Nf6 2.e5 d5");
    assert_eq!(board.en_passant_target(), Some(sq("d6")));
    assert_eq!(board.play(Color::White, "exd6"), Ok(true));
    assert!(board.piece_at(sq("d5")).is_none());
    assert_eq!(board.captures(Color::White)[0].captured.square(), sq("d5"));
    assert!(board.undo());
    assert_eq!(board.piece_at(sq("d5")).unwrap().color(), Color::Black);
}

#[test]
fn missing_piece_is_an_error() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(matches!(
        board.play(Color::White, "Qd4"),
        Err(MoveError::NoMatchingPiece { .. })
    ));
}

#[test]
fn promoted_rook_never_castles() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/6p1/R3K3 b Q - 0 1").unwrap();
    assert_eq!(board.play(Color::Black, "g1=R"), Ok(true));
    assert_eq!(board.piece_at(Square::G1).unwrap().role(), Role::Rook(None));
}

#[test]
fn legal_moves_replay_and_undo() {
    let board = replay("1.e4 e5 2.Nf3 Nc6 3.Bc4 Bc5 4.b4 Bxb4 5.c3 Ba5 6.d4 exd4 7.O-O");
    for text in board.legal_moves() {
        let mut branch = board.clone();
        let color = branch.turn();
        assert_eq!(branch.play(color, &text), Ok(true), "{}", text);
        assert!(branch.undo(), "{}", text);
        assert_eq!(branch, board, "{}", text);
    }
}
