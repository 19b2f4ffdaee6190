//! Declarative board setups loaded from TOML.
//!
//! A setup names the side to move, the pieces and the castling table:
//!
//! ```toml
//! turn = "white"
//!
//! [[pieces]]
//! color = "white"
//! kind = "king"
//! square = "e1"
//!
//! [[pieces]]
//! color = "white"
//! kind = "rook"
//! square = "h1"
//!
//! [[pieces]]
//! color = "black"
//! kind = "king"
//! square = "e8"
//!
//! [castling.white]
//! long = false
//!
//! [castling.black]
//! short = false
//! long = false
//! ```
//!
//! Missing `pieces` means the standard starting placement; missing castling
//! entries mean full rights.

use crate::{Board, Piece, Role};
use chess_core::{CastlingRights, CastlingTable, Color, FenError, PieceKind, Square, Wing};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when building a board from external input.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Failed to read the setup file from disk.
    #[error("failed to read setup file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse the setup file as valid TOML.
    #[error("failed to parse setup: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("only rooks carry a castle wing, found {kind} on {square}")]
    WingOnNonRook { kind: PieceKind, square: Square },

    #[error("two pieces on {0}")]
    DoubleOccupied(Square),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },
}

/// Side names as written in setup files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// Piece kind names as written in setup files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl From<Kind> for PieceKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::King => PieceKind::King,
            Kind::Queen => PieceKind::Queen,
            Kind::Rook => PieceKind::Rook,
            Kind::Bishop => PieceKind::Bishop,
            Kind::Knight => PieceKind::Knight,
            Kind::Pawn => PieceKind::Pawn,
        }
    }
}

/// Castle wing names as written in setup files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WingName {
    Short,
    Long,
}

impl From<WingName> for Wing {
    fn from(wing: WingName) -> Self {
        match wing {
            WingName::Short => Wing::Short,
            WingName::Long => Wing::Long,
        }
    }
}

/// One piece of a setup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PieceSetup {
    pub color: Side,
    pub kind: Kind,
    /// Square in algebraic notation, e.g. "e4".
    pub square: String,
    /// Castle wing of a rook. Defaults to the wing of its home square.
    #[serde(default)]
    pub wing: Option<WingName>,
}

impl PieceSetup {
    fn to_piece(&self) -> Result<Piece, SetupError> {
        let square = Square::from_algebraic(&self.square)
            .ok_or_else(|| SetupError::InvalidSquare(self.square.clone()))?;
        let color = Color::from(self.color);
        let kind = PieceKind::from(self.kind);
        match (kind, self.wing) {
            (_, None) => Ok(Piece::new(color, kind, square)),
            (PieceKind::Rook, Some(wing)) => Ok(Piece::with_role(
                color,
                Role::Rook(Some(wing.into())),
                square,
            )),
            (kind, Some(_)) => Err(SetupError::WingOnNonRook { kind, square }),
        }
    }
}

/// Castling rights of one color as written in setup files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RightsSetup {
    #[serde(default)]
    pub castled: bool,
    #[serde(default = "default_available")]
    pub short: bool,
    #[serde(default = "default_available")]
    pub long: bool,
}

fn default_available() -> bool {
    true
}

impl Default for RightsSetup {
    fn default() -> Self {
        RightsSetup {
            castled: false,
            short: true,
            long: true,
        }
    }
}

impl From<RightsSetup> for CastlingRights {
    fn from(rights: RightsSetup) -> Self {
        CastlingRights {
            castled: rights.castled,
            short: rights.short,
            long: rights.long,
        }
    }
}

/// Castling table of a setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct CastlingSetup {
    #[serde(default)]
    pub white: RightsSetup,
    #[serde(default)]
    pub black: RightsSetup,
}

impl From<CastlingSetup> for CastlingTable {
    fn from(table: CastlingSetup) -> Self {
        CastlingTable::new(table.white.into(), table.black.into())
    }
}

/// A complete board setup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Setup {
    /// Side to move. Defaults to White.
    #[serde(default = "default_turn")]
    pub turn: Side,
    /// Pieces on the board. Defaults to the starting placement.
    #[serde(default)]
    pub pieces: Option<Vec<PieceSetup>>,
    #[serde(default)]
    pub castling: CastlingSetup,
}

fn default_turn() -> Side {
    Side::White
}

impl Setup {
    /// Parses a setup from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, SetupError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a setup from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

impl Board {
    /// Builds a board from a setup.
    pub fn from_setup(setup: &Setup) -> Result<Self, SetupError> {
        let castling = CastlingTable::from(setup.castling);
        let turn = Color::from(setup.turn);
        match &setup.pieces {
            Some(pieces) => {
                let pieces = pieces
                    .iter()
                    .map(PieceSetup::to_piece)
                    .collect::<Result<Vec<_>, _>>()?;
                Board::from_pieces(pieces, turn, castling)
            }
            None => {
                let start = Board::new();
                Board::from_pieces(start.pieces().copied(), turn, castling)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_setup() {
        let toml_content = r#"
turn = "black"

[[pieces]]
color = "white"
kind = "king"
square = "e1"

[[pieces]]
color = "white"
kind = "rook"
square = "h1"

[[pieces]]
color = "black"
kind = "king"
square = "e8"

[castling.white]
long = false

[castling.black]
short = false
long = false
"#;

        let setup = Setup::from_toml(toml_content).unwrap();
        assert_eq!(setup.turn, Side::Black);
        assert_eq!(setup.pieces.as_ref().map(Vec::len), Some(3));

        let board = Board::from_setup(&setup).unwrap();
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.pieces().count(), 3);
        assert_eq!(
            board.piece_at(Square::H1).unwrap().role(),
            Role::Rook(Some(Wing::Short))
        );
        assert!(board.castling()[Color::White].short);
        assert!(!board.castling()[Color::White].long);
        assert_eq!(board.castling()[Color::Black], CastlingRights::NONE);
    }

    #[test]
    fn empty_setup_is_the_starting_position() {
        let setup = Setup::from_toml("").unwrap();
        assert_eq!(setup.turn, Side::White);
        assert_eq!(Board::from_setup(&setup).unwrap(), Board::new());
    }

    #[test]
    fn explicit_wing() {
        let setup = Setup::from_toml(
            r#"
[[pieces]]
color = "white"
kind = "king"
square = "e1"

[[pieces]]
color = "white"
kind = "rook"
square = "a1"
wing = "long"

[[pieces]]
color = "black"
kind = "king"
square = "e8"
"#,
        )
        .unwrap();
        let board = Board::from_setup(&setup).unwrap();
        assert_eq!(board.piece_at(Square::A1).unwrap().rook_wing(), Some(Wing::Long));
    }

    #[test]
    fn wing_on_a_bishop_is_rejected() {
        let setup = Setup::from_toml(
            r#"
[[pieces]]
color = "white"
kind = "bishop"
square = "c1"
wing = "long"
"#,
        )
        .unwrap();
        assert!(matches!(
            Board::from_setup(&setup),
            Err(SetupError::WingOnNonRook { kind: PieceKind::Bishop, .. })
        ));
    }

    #[test]
    fn bad_square_is_rejected() {
        let setup = Setup::from_toml(
            r#"
[[pieces]]
color = "white"
kind = "king"
square = "z9"
"#,
        )
        .unwrap();
        assert!(matches!(
            Board::from_setup(&setup),
            Err(SetupError::InvalidSquare(s)) if s == "z9"
        ));
    }

    #[test]
    fn unknown_kind_fails_to_parse() {
        let result = Setup::from_toml(
            r#"
[[pieces]]
color = "white"
kind = "archbishop"
square = "c1"
"#,
        );
        assert!(matches!(result, Err(SetupError::Parse(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            Setup::load("/nonexistent/setup.toml"),
            Err(SetupError::Read(_))
        ));
    }
}
