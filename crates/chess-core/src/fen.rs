//! FEN (Forsyth-Edwards Notation) decoding and encoding.

use crate::{CastlingTable, Color, File, PieceKind, Rank, Square};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// A piece standing on a square, as listed by a FEN placement field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub square: Square,
    pub kind: PieceKind,
    pub color: Color,
}

/// A decoded FEN record.
///
/// Placement is kept as a flat list in square order; building a playable
/// position from it (and checking king counts) is left to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    pub placement: Vec<Placement>,
    pub turn: Color,
    pub castling: CastlingTable,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let placement = Self::parse_placement(fields[0])?;

        let turn = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = CastlingTable::from_fen(fields[2])
            .ok_or_else(|| FenError::InvalidCastlingRights(fields[2].to_string()))?;

        let en_passant = Self::parse_en_passant(fields[3], turn)?;

        let halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(fields[4].to_string()))?;

        let fullmove_number = fields[5]
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| FenError::InvalidFullmoveNumber(fields[5].to_string()))?;

        Ok(Fen {
            placement,
            turn,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(field: &str) -> Result<Vec<Placement>, FenError> {
        let rows: Vec<&str> = field.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                rows.len()
            )));
        }

        let mut placement = Vec::new();
        // Rows run from rank 8 down to rank 1.
        for (row, rank) in rows.iter().zip(Rank::ALL.iter().rev()) {
            let mut file = 0u8;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as u8;
                    if file > 8 {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "rank {} is too long",
                            rank
                        )));
                    }
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    let f = File::from_index(file).ok_or_else(|| {
                        FenError::InvalidPiecePlacement(format!("rank {} is too long", rank))
                    })?;
                    placement.push(Placement {
                        square: Square::new(f, *rank),
                        kind,
                        color,
                    });
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c, rank
                    )));
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank, file
                )));
            }
        }

        placement.sort_by_key(|p| p.square);
        Ok(placement)
    }

    fn parse_en_passant(field: &str, turn: Color) -> Result<Option<Square>, FenError> {
        if field == "-" {
            return Ok(None);
        }
        // The target sits behind a pawn of the side that just moved.
        let expected = match turn {
            Color::White => Rank::R6,
            Color::Black => Rank::R3,
        };
        Square::from_algebraic(field)
            .filter(|sq| sq.rank() == expected)
            .map(Some)
            .ok_or_else(|| FenError::InvalidEnPassantSquare(field.to_string()))
    }

    /// Encodes a placement list as a FEN placement field.
    pub fn encode_placement(placement: &[Placement]) -> String {
        let mut grid = [None; 64];
        for p in placement {
            grid[p.square.index() as usize] = Some(p.kind.to_fen_char(p.color));
        }

        let mut field = String::new();
        for rank in Rank::ALL.iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match grid[Square::new(file, *rank).index() as usize] {
                    Some(c) => {
                        if empty > 0 {
                            field.push_str(&empty.to_string());
                            empty = 0;
                        }
                        field.push(c);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                field.push_str(&empty.to_string());
            }
            if *rank != Rank::R1 {
                field.push('/');
            }
        }
        field
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            Self::encode_placement(&self.placement),
            self.turn.to_char(),
            self.castling,
            self.en_passant
                .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic()),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}
