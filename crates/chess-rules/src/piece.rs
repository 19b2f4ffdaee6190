//! Pieces as placed on a board.

use chess_core::{Color, PieceKind, Square, Wing};
use std::fmt;

/// What a piece is, with the payload some kinds carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    King,
    Queen,
    /// A rook and the wing it may castle on. `None` for rooks that did not
    /// start on a home square, including promoted ones.
    Rook(Option<Wing>),
    Bishop,
    Knight,
    Pawn,
}

impl Role {
    /// Returns the role for a freshly created piece of `kind`.
    ///
    /// Rooks get no wing here; see [`Piece::new`] for home-square inference.
    pub const fn from_kind(kind: PieceKind) -> Role {
        match kind {
            PieceKind::King => Role::King,
            PieceKind::Queen => Role::Queen,
            PieceKind::Rook => Role::Rook(None),
            PieceKind::Bishop => Role::Bishop,
            PieceKind::Knight => Role::Knight,
            PieceKind::Pawn => Role::Pawn,
        }
    }

    /// Returns the kind of this role.
    pub const fn kind(self) -> PieceKind {
        match self {
            Role::King => PieceKind::King,
            Role::Queen => PieceKind::Queen,
            Role::Rook(_) => PieceKind::Rook,
            Role::Bishop => PieceKind::Bishop,
            Role::Knight => PieceKind::Knight,
            Role::Pawn => PieceKind::Pawn,
        }
    }
}

/// A piece standing on a square.
///
/// Pieces are values: moving or promoting yields a new record and the old one
/// stays valid as a snapshot for undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    square: Square,
    role: Role,
}

impl Piece {
    /// Creates a piece of `kind` on `square`.
    ///
    /// A rook standing on one of its color's home rook squares is tagged with
    /// that wing and may castle.
    pub fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        let role = match kind {
            PieceKind::Rook => Role::Rook(Wing::of_rook_home(color, square)),
            other => Role::from_kind(other),
        };
        Piece {
            color,
            square,
            role,
        }
    }

    /// Creates a piece with an explicit role.
    pub const fn with_role(color: Color, role: Role, square: Square) -> Self {
        Piece {
            color,
            square,
            role,
        }
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.role.kind()
    }

    /// Returns the castle wing of a home rook.
    #[inline]
    pub const fn rook_wing(&self) -> Option<Wing> {
        match self.role {
            Role::Rook(wing) => wing,
            _ => None,
        }
    }

    /// Returns this piece relocated to `square`.
    #[inline]
    pub const fn moved_to(self, square: Square) -> Self {
        Piece { square, ..self }
    }

    /// Returns this piece turned into `kind` on the same square.
    ///
    /// A rook created this way has no wing.
    #[inline]
    pub const fn promoted(self, kind: PieceKind) -> Self {
        Piece {
            role: Role::from_kind(kind),
            ..self
        }
    }

    /// Returns the FEN letter of this piece.
    #[inline]
    pub const fn to_fen_char(&self) -> char {
        self.kind().to_fen_char(self.color)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.color, self.kind(), self.square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_rooks_get_their_wing() {
        let rook = Piece::new(Color::White, PieceKind::Rook, Square::H1);
        assert_eq!(rook.role(), Role::Rook(Some(Wing::Short)));
        let rook = Piece::new(Color::Black, PieceKind::Rook, Square::A8);
        assert_eq!(rook.rook_wing(), Some(Wing::Long));
    }

    #[test]
    fn other_rooks_have_no_wing() {
        let rook = Piece::new(Color::White, PieceKind::Rook, Square::H8);
        assert_eq!(rook.role(), Role::Rook(None));
        let rook = Piece::new(Color::Black, PieceKind::Rook, Square::D8);
        assert_eq!(rook.rook_wing(), None);
    }

    #[test]
    fn moving_keeps_role() {
        let rook = Piece::new(Color::White, PieceKind::Rook, Square::A1);
        let moved = rook.moved_to(Square::D1);
        assert_eq!(moved.square(), Square::D1);
        assert_eq!(moved.rook_wing(), Some(Wing::Long));
        assert_eq!(rook.square(), Square::A1);
    }

    #[test]
    fn promoted_rook_cannot_castle() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn, Square::H8);
        let rook = pawn.promoted(PieceKind::Rook);
        assert_eq!(rook.role(), Role::Rook(None));
        assert_eq!(rook.color(), Color::White);
        assert_eq!(rook.square(), Square::H8);
    }

    #[test]
    fn kind_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(Role::from_kind(kind).kind(), kind);
        }
    }
}
