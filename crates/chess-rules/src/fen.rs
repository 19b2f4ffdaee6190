//! FEN import and export for [`Board`].

use crate::board::StartState;
use crate::setup::SetupError;
use crate::{Board, Piece};
use chess_core::{Color, Fen, PieceKind, Placement, Square};
use tracing::debug;

impl Board {
    /// Creates a board from a FEN string.
    ///
    /// Rooks on their home squares may castle on their wing if the rights
    /// field allows it. The en passant target is honoured until the first
    /// move is played, and only if an opposing pawn can just have passed it.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let record = Fen::parse(fen)?;
        let en_passant = record.en_passant.filter(|&target| passed_pawn_behind(&record, target));
        if en_passant != record.en_passant {
            debug!(en_passant = ?record.en_passant, "dropped en passant target with no passed pawn");
        }
        let pieces = record
            .placement
            .iter()
            .map(|p| Piece::new(p.color, p.kind, p.square));
        Self::from_pieces_at(
            pieces,
            record.turn,
            record.castling,
            StartState {
                en_passant,
                halfmove_clock: record.halfmove_clock,
                fullmove_number: record.fullmove_number,
            },
        )
    }

    /// Renders the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        Fen {
            placement: self
                .pieces()
                .map(|p| Placement {
                    square: p.square(),
                    kind: p.kind(),
                    color: p.color(),
                })
                .collect(),
            turn: self.turn(),
            castling: self.castling(),
            en_passant: self.en_passant_target(),
            halfmove_clock: self.halfmove_clock(),
            fullmove_number: self.fullmove_number(),
        }
        .to_string()
    }

    /// Plies since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        let mut clock = 0;
        for entry in self.history().iter().rev() {
            if entry.captured || entry.piece.kind() == PieceKind::Pawn {
                return clock;
            }
            clock += 1;
        }
        clock + self.start().halfmove_clock
    }

    /// Move number, incremented after each Black move.
    pub fn fullmove_number(&self) -> u32 {
        let black_moves = self
            .history()
            .iter()
            .filter(|entry| entry.piece.color() == Color::Black)
            .count() as u32;
        self.start().fullmove_number + black_moves
    }
}

/// True if an opposing pawn stands just past `target` and both `target`
/// and the square the pawn started from are empty.
fn passed_pawn_behind(record: &Fen, target: Square) -> bool {
    let mover = record.turn;
    let occupant = |sq: Option<Square>| {
        sq.and_then(|sq| record.placement.iter().find(|p| p.square == sq))
    };
    let pawn = occupant(target.offset(0, -mover.pawn_direction()));
    let passed = matches!(
        pawn,
        Some(p) if p.kind == PieceKind::Pawn && p.color == mover.opposite()
    );
    passed
        && occupant(Some(target)).is_none()
        && occupant(target.offset(0, mover.pawn_direction())).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_fen() {
        assert_eq!(Board::new().to_fen(), Fen::STARTPOS);
        assert_eq!(Board::from_fen(Fen::STARTPOS).unwrap(), Board::new());
    }

    #[test]
    fn fen_after_moves() {
        let mut board = Board::new();
        assert_eq!(board.play(Color::White, "e4"), Ok(true));
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert_eq!(board.play(Color::Black, "Nf6"), Ok(true));
        assert_eq!(board.play(Color::White, "Nc3"), Ok(true));
        assert_eq!(
            board.to_fen(),
            "rnbqkb1r/pppppppp/5n2/8/4P3/2N5/PPPP1PPP/R1BQKBNR b KQkq - 2 2"
        );
    }

    #[test]
    fn castling_field_follows_rights() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(board.play(Color::White, "O-O"), Ok(true));
        assert_eq!(board.play(Color::Black, "Rh7"), Ok(true));
        assert_eq!(board.to_fen(), "r3k3/7r/8/8/8/8/8/R4RK1 w q - 2 2");
    }

    #[test]
    fn clocks_continue_from_fen() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 10 40").unwrap();
        assert_eq!(board.play(Color::Black, "Kd7"), Ok(true));
        assert_eq!(board.halfmove_clock(), 11);
        assert_eq!(board.fullmove_number(), 41);
    }

    #[test]
    fn fen_en_passant_is_honoured() {
        let mut board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(board.play(Color::White, "exd6"), Ok(true));
        assert!(board.piece_at(Square::from_algebraic("d5").unwrap()).is_none());
    }

    #[test]
    fn fen_en_passant_without_passed_pawn_is_dropped() {
        let mut board = Board::from_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(board.en_passant_target(), None);
        assert!(board.to_fen().ends_with(" w - - 0 1"));
        assert_eq!(board.play(Color::White, "exd6"), Ok(false));
        assert!(!board.legal_moves().contains(&"exd6".to_string()));
        assert!(board.history().is_empty());

        // Start square still occupied: the pawn cannot have just left it.
        let board = Board::from_fen("4k3/3p4/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(board.en_passant_target(), None);

        let board = Board::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").unwrap();
        assert_eq!(board.en_passant_target(), Some(Square::from_algebraic("e3").unwrap()));
    }

    #[test]
    fn invalid_fen_is_an_error() {
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(SetupError::KingCount { .. })
        ));
        assert!(matches!(
            Board::from_fen("not a fen"),
            Err(SetupError::Fen(_))
        ));
    }
}
