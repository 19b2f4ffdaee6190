//! Castling rights bookkeeping.

use crate::{Piece, Role};
use chess_core::{CastlingTable, Square, Wing};

/// Returns the castling table after `moved` travels to `to`.
///
/// A king move forfeits both wings of a color that has not castled yet, a
/// home rook move forfeits its own wing, and a capture landing on an
/// opponent's home rook square forfeits that wing for the opponent. The
/// `castled` flag is never cleared here.
pub fn on_move(mut rights: CastlingTable, moved: &Piece, to: Square, is_capture: bool) -> CastlingTable {
    let color = moved.color();
    match moved.role() {
        Role::King if !rights[color].castled => rights[color].remove_both(),
        Role::Rook(Some(wing)) => rights[color].remove(wing),
        _ => {}
    }

    if is_capture {
        let opponent = color.opposite();
        if let Some(wing) = Wing::of_rook_home(opponent, to) {
            rights[opponent].remove(wing);
        }
    }

    rights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{CastlingRights, Color, PieceKind};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn king_move_clears_both_wings() {
        let king = Piece::new(Color::White, PieceKind::King, Square::E1);
        let rights = on_move(CastlingTable::INITIAL, &king, sq("e2"), false);
        assert_eq!(rights[Color::White], CastlingRights::NONE);
        assert_eq!(rights[Color::Black], CastlingRights::INITIAL);
    }

    #[test]
    fn castled_king_keeps_castled_flag() {
        let king = Piece::new(Color::White, PieceKind::King, Square::G1);
        let table = CastlingTable::new(CastlingRights::CASTLED, CastlingRights::INITIAL);
        let rights = on_move(table, &king, Square::H1, false);
        assert_eq!(rights[Color::White], CastlingRights::CASTLED);
    }

    #[test]
    fn rook_move_clears_its_wing() {
        let rook = Piece::new(Color::Black, PieceKind::Rook, Square::A8);
        let rights = on_move(CastlingTable::INITIAL, &rook, sq("a5"), false);
        assert!(rights[Color::Black].short);
        assert!(!rights[Color::Black].long);
    }

    #[test]
    fn wingless_rook_changes_nothing() {
        let rook = Piece::new(Color::White, PieceKind::Rook, sq("d4"));
        let rights = on_move(CastlingTable::INITIAL, &rook, sq("d5"), false);
        assert_eq!(rights, CastlingTable::INITIAL);
    }

    #[test]
    fn capture_on_home_rook_square_clears_opponent_wing() {
        let bishop = Piece::new(Color::White, PieceKind::Bishop, sq("b7"));
        let rights = on_move(CastlingTable::INITIAL, &bishop, Square::A8, true);
        assert!(!rights[Color::Black].long);
        assert!(rights[Color::Black].short);
        assert_eq!(rights[Color::White], CastlingRights::INITIAL);
    }

    #[test]
    fn quiet_move_onto_home_square_keeps_rights() {
        let bishop = Piece::new(Color::White, PieceKind::Bishop, sq("b7"));
        let rights = on_move(CastlingTable::INITIAL, &bishop, Square::A8, false);
        assert_eq!(rights, CastlingTable::INITIAL);
    }
}
