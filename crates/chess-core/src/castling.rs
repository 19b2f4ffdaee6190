//! Castling wings, their fixed squares, and the per-color rights table.

use crate::{Color, Square};
use std::fmt;
use std::ops::{Index, IndexMut};

/// The side of the board a castle is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    /// Kingside, `O-O`.
    Short,
    /// Queenside, `O-O-O`.
    Long,
}

impl Wing {
    /// Both wings, kingside first.
    pub const ALL: [Wing; 2] = [Wing::Short, Wing::Long];

    /// Returns the castle notation for this wing.
    pub const fn notation(self) -> &'static str {
        match self {
            Wing::Short => "O-O",
            Wing::Long => "O-O-O",
        }
    }

    /// Returns the fixed squares involved in castling on this wing.
    pub const fn squares(self, color: Color) -> CastleSquares {
        match (color, self) {
            (Color::White, Wing::Short) => CastleSquares {
                king_from: Square::E1,
                king_to: Square::G1,
                rook_from: Square::H1,
                rook_to: Square::F1,
                empty: &[Square::F1, Square::G1],
                king_path: &[Square::F1, Square::G1],
            },
            (Color::White, Wing::Long) => CastleSquares {
                king_from: Square::E1,
                king_to: Square::C1,
                rook_from: Square::A1,
                rook_to: Square::D1,
                empty: &[Square::B1, Square::C1, Square::D1],
                king_path: &[Square::D1, Square::C1],
            },
            (Color::Black, Wing::Short) => CastleSquares {
                king_from: Square::E8,
                king_to: Square::G8,
                rook_from: Square::H8,
                rook_to: Square::F8,
                empty: &[Square::F8, Square::G8],
                king_path: &[Square::F8, Square::G8],
            },
            (Color::Black, Wing::Long) => CastleSquares {
                king_from: Square::E8,
                king_to: Square::C8,
                rook_from: Square::A8,
                rook_to: Square::D8,
                empty: &[Square::B8, Square::C8, Square::D8],
                king_path: &[Square::D8, Square::C8],
            },
        }
    }

    /// Returns the wing whose rook starts on `sq` for `color`, if any.
    pub fn of_rook_home(color: Color, sq: Square) -> Option<Wing> {
        Self::ALL
            .into_iter()
            .find(|wing| wing.squares(color).rook_from == sq)
    }
}

/// Fixed squares of one castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub empty: &'static [Square],
    /// Squares the king crosses or lands on; none may be attacked.
    pub king_path: &'static [Square],
}

/// Castling status of one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    /// The color has already castled.
    pub castled: bool,
    /// Kingside castling is still available.
    pub short: bool,
    /// Queenside castling is still available.
    pub long: bool,
}

impl CastlingRights {
    /// Rights at the start of a standard game.
    pub const INITIAL: CastlingRights = CastlingRights {
        castled: false,
        short: true,
        long: true,
    };

    /// No castling available and none played.
    pub const NONE: CastlingRights = CastlingRights {
        castled: false,
        short: false,
        long: false,
    };

    /// Rights after the color has castled.
    pub const CASTLED: CastlingRights = CastlingRights {
        castled: true,
        short: false,
        long: false,
    };

    /// Returns true if castling on `wing` is still available.
    #[inline]
    pub const fn can_castle(self, wing: Wing) -> bool {
        match wing {
            Wing::Short => self.short,
            Wing::Long => self.long,
        }
    }

    /// Forfeits castling on `wing`.
    #[inline]
    pub fn remove(&mut self, wing: Wing) {
        match wing {
            Wing::Short => self.short = false,
            Wing::Long => self.long = false,
        }
    }

    /// Forfeits castling on both wings.
    #[inline]
    pub fn remove_both(&mut self) {
        self.short = false;
        self.long = false;
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Castling rights of both colors, indexed by [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingTable([CastlingRights; 2]);

impl CastlingTable {
    /// Both colors with full rights.
    pub const INITIAL: CastlingTable = CastlingTable([CastlingRights::INITIAL; 2]);

    /// Neither color may castle.
    pub const NONE: CastlingTable = CastlingTable([CastlingRights::NONE; 2]);

    /// Creates a table from White's and Black's rights.
    pub const fn new(white: CastlingRights, black: CastlingRights) -> Self {
        CastlingTable([white, black])
    }

    /// Parses the FEN castling availability field ("KQkq", "Kq", "-").
    pub fn from_fen(field: &str) -> Option<Self> {
        let mut table = Self::NONE;
        if field == "-" {
            return Some(table);
        }
        for c in field.chars() {
            match c {
                'K' => table[Color::White].short = true,
                'Q' => table[Color::White].long = true,
                'k' => table[Color::Black].short = true,
                'q' => table[Color::Black].long = true,
                _ => return None,
            }
        }
        Some(table)
    }

    /// Renders the availability part of the table as a FEN castling field.
    pub fn to_fen(&self) -> String {
        let mut field = String::new();
        for (color, short, long) in [(Color::White, 'K', 'Q'), (Color::Black, 'k', 'q')] {
            if self[color].short {
                field.push(short);
            }
            if self[color].long {
                field.push(long);
            }
        }
        if field.is_empty() {
            field.push('-');
        }
        field
    }
}

impl Index<Color> for CastlingTable {
    type Output = CastlingRights;

    #[inline]
    fn index(&self, color: Color) -> &Self::Output {
        &self.0[color.index()]
    }
}

impl IndexMut<Color> for CastlingTable {
    #[inline]
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        &mut self.0[color.index()]
    }
}

impl fmt::Display for CastlingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}
