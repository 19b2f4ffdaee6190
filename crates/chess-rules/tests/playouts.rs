//! Property tests over random legal playouts.

use chess_core::{Color, PieceKind, Square, Wing};
use chess_rules::Board;
use proptest::prelude::*;

fn assert_structure(board: &Board) {
    for color in Color::ALL {
        let kings = board
            .pieces_of(color)
            .filter(|p| p.kind() == PieceKind::King)
            .count();
        assert_eq!(kings, 1, "{} kings for {}", kings, color);
    }
    for sq in Square::all() {
        if let Some(piece) = board.piece_at(sq) {
            assert_eq!(piece.square(), sq);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_playouts_keep_invariants(choices in proptest::collection::vec(any::<usize>(), 1..40)) {
        let mut board = Board::new();
        for choice in choices {
            let moves = board.legal_moves();
            if moves.is_empty() {
                prop_assert!(board.status().is_over());
                break;
            }
            let text = &moves[choice % moves.len()];
            let before = board.clone();
            let mover = board.turn();

            prop_assert_eq!(board.play(mover, text), Ok(true));
            assert_structure(&board);
            prop_assert!(!board.is_king_attacked(mover));
            prop_assert_eq!(board.turn(), mover.opposite());

            // Lost castling rights never come back.
            for color in Color::ALL {
                for wing in Wing::ALL {
                    if !before.castling()[color].can_castle(wing) {
                        prop_assert!(!board.castling()[color].can_castle(wing));
                    }
                }
            }

            let mut undone = board.clone();
            prop_assert!(undone.undo());
            prop_assert_eq!(&undone, &before);
        }
    }

    #[test]
    fn undo_everything_returns_to_start(choices in proptest::collection::vec(any::<usize>(), 1..30)) {
        let mut board = Board::new();
        for choice in choices {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            let color = board.turn();
            prop_assert_eq!(board.play(color, &moves[choice % moves.len()]), Ok(true));
        }
        while board.undo() {}
        prop_assert_eq!(board, Board::new());
    }
}
