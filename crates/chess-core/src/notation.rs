//! Algebraic move notation parsing.
//!
//! Turns a move text such as `"e4"`, `"Nbd2"`, `"exd8=Q+"` or `"O-O-O"` into a
//! [`MoveDescriptor`]. Parsing never looks at a board: the origin of the move
//! is only known as far as the text says (a file for pawns, an optional
//! file/rank hint for pieces) and is resolved later against the position.

use crate::{Color, File, PieceKind, Rank, Square, Wing};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing move notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty move notation")]
    Empty,

    #[error("invalid move notation: {0}")]
    Invalid(String),
}

/// The notation grammar a move text matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveCategory {
    /// `Ke2`
    King,
    /// `Kxe2`
    KingCaptures,
    /// `O-O`
    CastleShort,
    /// `O-O-O`
    CastleLong,
    /// `Bc4`, `Rad1`, `Q1h5`
    Piece,
    /// `Bxc6`, `Rfxd1`
    PieceCaptures,
    /// `Nf3`, `Nbd2`
    Knight,
    /// `Nxe5`
    KnightCaptures,
    /// `e4`
    Pawn,
    /// `exd5`
    PawnCaptures,
    /// `e8=Q`
    PawnPromotes,
    /// `exd8=N`
    PawnCapturesAndPromotes,
}

impl MoveCategory {
    /// Returns the castle wing for the two castle categories.
    #[inline]
    pub const fn castle_wing(self) -> Option<Wing> {
        match self {
            MoveCategory::CastleShort => Some(Wing::Short),
            MoveCategory::CastleLong => Some(Wing::Long),
            _ => None,
        }
    }

    /// Returns true if moves of this category capture.
    #[inline]
    pub const fn is_capture(self) -> bool {
        matches!(
            self,
            MoveCategory::KingCaptures
                | MoveCategory::PieceCaptures
                | MoveCategory::KnightCaptures
                | MoveCategory::PawnCaptures
                | MoveCategory::PawnCapturesAndPromotes
        )
    }
}

/// What the notation says about the square a move starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OriginHint {
    pub file: Option<File>,
    pub rank: Option<Rank>,
}

impl OriginHint {
    /// No information about the origin.
    pub const NONE: OriginHint = OriginHint {
        file: None,
        rank: None,
    };

    /// Hint pinned to a single square.
    #[inline]
    pub const fn exact(sq: Square) -> Self {
        OriginHint {
            file: Some(sq.file()),
            rank: Some(sq.rank()),
        }
    }

    /// Hint restricted to one file.
    #[inline]
    pub const fn file(file: File) -> Self {
        OriginHint {
            file: Some(file),
            rank: None,
        }
    }

    /// Returns true if `sq` is consistent with this hint.
    #[inline]
    pub fn matches(self, sq: Square) -> bool {
        self.file.map_or(true, |f| f == sq.file()) && self.rank.map_or(true, |r| r == sq.rank())
    }

    /// Returns the origin square when both file and rank are known.
    #[inline]
    pub fn square(self) -> Option<Square> {
        Some(Square::new(self.file?, self.rank?))
    }
}

impl fmt::Display for OriginHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = self.file {
            write!(f, "{}", file)?;
        }
        if let Some(rank) = self.rank {
            write!(f, "{}", rank)?;
        }
        Ok(())
    }
}

/// A move decoded from its notation, not yet resolved against a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveDescriptor {
    /// The notation as given, including any check suffix.
    pub text: String,
    /// The side playing the move.
    pub color: Color,
    pub category: MoveCategory,
    /// Kind of the moving piece (the king for castles).
    pub kind: PieceKind,
    pub is_capture: bool,
    /// The text carried a `+` or `#` suffix. Informational only.
    pub is_check: bool,
    /// Requested promotion piece, if the text named one.
    pub promotion: Option<PieceKind>,
    /// Partial or full origin square.
    pub from: OriginHint,
    /// Destination square (the king's destination for castles).
    pub to: Square,
}

/// Intermediate result of one grammar.
struct Matched {
    category: MoveCategory,
    kind: PieceKind,
    from: OriginHint,
    to: Square,
    promotion: Option<PieceKind>,
}

type Grammar = fn(Color, &str) -> Option<Matched>;

/// Grammars in match priority order.
const GRAMMARS: [Grammar; 12] = [
    castle_long,
    castle_short,
    pawn_captures_and_promotes,
    pawn_promotes,
    pawn_captures,
    pawn,
    king_captures,
    king,
    knight_captures,
    knight,
    piece_captures,
    piece,
];

impl MoveDescriptor {
    /// Parses `text` as a move played by `color`.
    pub fn parse(color: Color, text: &str) -> Result<Self, NotationError> {
        if text.is_empty() {
            return Err(NotationError::Empty);
        }
        if !text.is_ascii() {
            return Err(NotationError::Invalid(text.to_string()));
        }

        let (body, is_check) = match text.strip_suffix(|c: char| c == '+' || c == '#') {
            Some(body) => (body, true),
            None => (text, false),
        };

        let matched = GRAMMARS
            .iter()
            .find_map(|grammar| grammar(color, body))
            .ok_or_else(|| NotationError::Invalid(text.to_string()))?;

        Ok(MoveDescriptor {
            text: text.to_string(),
            color,
            category: matched.category,
            kind: matched.kind,
            is_capture: matched.category.is_capture(),
            is_check,
            promotion: matched.promotion,
            from: matched.from,
            to: matched.to,
        })
    }

    /// Builds the descriptor of a castle on `wing`.
    pub fn castle(color: Color, wing: Wing) -> Self {
        let squares = wing.squares(color);
        MoveDescriptor {
            text: wing.notation().to_string(),
            color,
            category: match wing {
                Wing::Short => MoveCategory::CastleShort,
                Wing::Long => MoveCategory::CastleLong,
            },
            kind: PieceKind::King,
            is_capture: false,
            is_check: false,
            promotion: None,
            from: OriginHint::exact(squares.king_from),
            to: squares.king_to,
        }
    }

    /// Builds a descriptor whose origin is pinned to one square.
    ///
    /// Used when moves are generated from the board rather than read from
    /// text; the text is rendered in long form (`Ng1f3`, `e7xd8=Q`).
    pub fn pinned(
        color: Color,
        kind: PieceKind,
        from: Square,
        to: Square,
        is_capture: bool,
        promotion: Option<PieceKind>,
    ) -> Self {
        let category = match (kind, is_capture, promotion.is_some()) {
            (PieceKind::Pawn, true, true) => MoveCategory::PawnCapturesAndPromotes,
            (PieceKind::Pawn, false, true) => MoveCategory::PawnPromotes,
            (PieceKind::Pawn, true, false) => MoveCategory::PawnCaptures,
            (PieceKind::Pawn, false, false) => MoveCategory::Pawn,
            (PieceKind::King, true, _) => MoveCategory::KingCaptures,
            (PieceKind::King, false, _) => MoveCategory::King,
            (PieceKind::Knight, true, _) => MoveCategory::KnightCaptures,
            (PieceKind::Knight, false, _) => MoveCategory::Knight,
            (_, true, _) => MoveCategory::PieceCaptures,
            (_, false, _) => MoveCategory::Piece,
        };

        let mut text = String::new();
        if kind != PieceKind::Pawn {
            text.push(kind.letter());
        }
        text.push_str(&from.to_algebraic());
        if is_capture {
            text.push('x');
        }
        text.push_str(&to.to_algebraic());
        if let Some(promo) = promotion {
            text.push('=');
            text.push(promo.letter());
        }

        MoveDescriptor {
            text,
            color,
            category,
            kind,
            is_capture,
            is_check: false,
            promotion,
            from: OriginHint::exact(from),
            to,
        }
    }

    /// Returns the castle wing if this descriptor is a castle.
    #[inline]
    pub fn castle_wing(&self) -> Option<Wing> {
        self.category.castle_wing()
    }
}

impl fmt::Display for MoveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Parses `text` as a move played by `color`.
pub fn parse(color: Color, text: &str) -> Result<MoveDescriptor, NotationError> {
    MoveDescriptor::parse(color, text)
}

fn castle_long(color: Color, body: &str) -> Option<Matched> {
    matches!(body, "O-O-O" | "0-0-0").then(|| castle_match(color, Wing::Long))
}

fn castle_short(color: Color, body: &str) -> Option<Matched> {
    matches!(body, "O-O" | "0-0").then(|| castle_match(color, Wing::Short))
}

fn castle_match(color: Color, wing: Wing) -> Matched {
    let castle = MoveDescriptor::castle(color, wing);
    Matched {
        category: castle.category,
        kind: PieceKind::King,
        from: castle.from,
        to: castle.to,
        promotion: None,
    }
}

fn pawn_captures_and_promotes(_: Color, body: &str) -> Option<Matched> {
    let b = body.as_bytes();
    if b.len() != 6 || b[1] != b'x' || b[4] != b'=' {
        return None;
    }
    Some(Matched {
        category: MoveCategory::PawnCapturesAndPromotes,
        kind: PieceKind::Pawn,
        from: OriginHint::file(File::from_char(b[0] as char)?),
        to: Square::from_algebraic(&body[2..4])?,
        promotion: Some(promotion_letter(b[5])?),
    })
}

fn pawn_promotes(_: Color, body: &str) -> Option<Matched> {
    let b = body.as_bytes();
    if b.len() != 4 || b[2] != b'=' {
        return None;
    }
    let to = Square::from_algebraic(&body[..2])?;
    Some(Matched {
        category: MoveCategory::PawnPromotes,
        kind: PieceKind::Pawn,
        from: OriginHint::file(to.file()),
        to,
        promotion: Some(promotion_letter(b[3])?),
    })
}

fn pawn_captures(_: Color, body: &str) -> Option<Matched> {
    let b = body.as_bytes();
    if b.len() != 4 || b[1] != b'x' {
        return None;
    }
    Some(Matched {
        category: MoveCategory::PawnCaptures,
        kind: PieceKind::Pawn,
        from: OriginHint::file(File::from_char(b[0] as char)?),
        to: Square::from_algebraic(&body[2..])?,
        promotion: None,
    })
}

fn pawn(_: Color, body: &str) -> Option<Matched> {
    let to = Square::from_algebraic(body)?;
    Some(Matched {
        category: MoveCategory::Pawn,
        kind: PieceKind::Pawn,
        from: OriginHint::file(to.file()),
        to,
        promotion: None,
    })
}

fn king_captures(_: Color, body: &str) -> Option<Matched> {
    let to = Square::from_algebraic(body.strip_prefix("Kx")?)?;
    Some(Matched {
        category: MoveCategory::KingCaptures,
        kind: PieceKind::King,
        from: OriginHint::NONE,
        to,
        promotion: None,
    })
}

fn king(_: Color, body: &str) -> Option<Matched> {
    let to = Square::from_algebraic(body.strip_prefix('K')?)?;
    Some(Matched {
        category: MoveCategory::King,
        kind: PieceKind::King,
        from: OriginHint::NONE,
        to,
        promotion: None,
    })
}

fn knight_captures(_: Color, body: &str) -> Option<Matched> {
    piece_move(body, b"N", true, MoveCategory::KnightCaptures)
}

fn knight(_: Color, body: &str) -> Option<Matched> {
    piece_move(body, b"N", false, MoveCategory::Knight)
}

fn piece_captures(_: Color, body: &str) -> Option<Matched> {
    piece_move(body, b"BRQ", true, MoveCategory::PieceCaptures)
}

fn piece(_: Color, body: &str) -> Option<Matched> {
    piece_move(body, b"BRQ", false, MoveCategory::Piece)
}

/// `<letter>[file][rank][x]<square>` for knights, bishops, rooks and queens.
fn piece_move(
    body: &str,
    letters: &[u8],
    capture: bool,
    category: MoveCategory,
) -> Option<Matched> {
    let letter = *body.as_bytes().first()?;
    if !letters.contains(&letter) {
        return None;
    }
    let rest = &body[1..];
    let (prefix, dest) = if capture {
        rest.split_once('x')?
    } else {
        if rest.len() < 2 {
            return None;
        }
        rest.split_at(rest.len() - 2)
    };

    Some(Matched {
        category,
        kind: PieceKind::from_letter(letter as char)?,
        from: disambiguation(prefix)?,
        to: Square::from_algebraic(dest)?,
        promotion: None,
    })
}

/// Optional file followed by optional rank, nothing else.
fn disambiguation(prefix: &str) -> Option<OriginHint> {
    let mut chars = prefix.chars().peekable();
    let file = chars.next_if(|c| File::from_char(*c).is_some()).and_then(File::from_char);
    let rank = chars.next_if(|c| Rank::from_char(*c).is_some()).and_then(Rank::from_char);
    if chars.next().is_some() {
        return None;
    }
    Some(OriginHint { file, rank })
}

fn promotion_letter(b: u8) -> Option<PieceKind> {
    PieceKind::from_letter(b as char).filter(|kind| kind.is_promotion_target())
}
