//! Square and attack evaluation.
//!
//! Geometry is computed by walking offsets with [`Square::offset`], which
//! clips at the board edges. [`SquareEvaluation`] is the derived per-position
//! summary the legality checks read: free squares, occupancy per color and
//! the squares each color attacks.

use crate::{Piece, SquareSet};
use chess_core::{Color, PieceKind, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Precomputed knight attack tables.
const KNIGHT_ATTACKS: [SquareSet; 64] = compute_leaper_attacks(&KNIGHT_OFFSETS);

/// Precomputed king attack tables.
const KING_ATTACKS: [SquareSet; 64] = compute_leaper_attacks(&KING_OFFSETS);

const fn compute_leaper_attacks(offsets: &[(i8, i8); 8]) -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    let mut index = 0u8;
    while index < 64 {
        let mut set = SquareSet::EMPTY;
        if let Some(from) = Square::from_index(index) {
            let mut i = 0;
            while i < offsets.len() {
                if let Some(to) = from.offset(offsets[i].0, offsets[i].1) {
                    set = set.with(to);
                }
                i += 1;
            }
        }
        table[index as usize] = set;
        index += 1;
    }
    table
}

/// Returns knight attacks from the given square.
#[inline]
pub fn knight_attacks(sq: Square) -> SquareSet {
    KNIGHT_ATTACKS[sq.index() as usize]
}

/// Returns king attacks from the given square.
#[inline]
pub fn king_attacks(sq: Square) -> SquareSet {
    KING_ATTACKS[sq.index() as usize]
}

/// Returns the diagonal capture squares of a pawn.
#[inline]
pub fn pawn_attacks(sq: Square, color: Color) -> SquareSet {
    let dir = color.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(|df| sq.offset(df, dir))
        .collect()
}

/// Walks each ray until and including the first occupied square.
fn ray_attacks(sq: Square, directions: &[(i8, i8)], occupied: SquareSet) -> SquareSet {
    let mut set = SquareSet::EMPTY;
    for &(df, dr) in directions {
        let mut cursor = sq;
        while let Some(next) = cursor.offset(df, dr) {
            set.insert(next);
            if occupied.contains(next) {
                break;
            }
            cursor = next;
        }
    }
    set
}

/// Returns bishop attacks given the board occupancy.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: SquareSet) -> SquareSet {
    ray_attacks(sq, &BISHOP_DIRECTIONS, occupied)
}

/// Returns rook attacks given the board occupancy.
#[inline]
pub fn rook_attacks(sq: Square, occupied: SquareSet) -> SquareSet {
    ray_attacks(sq, &ROOK_DIRECTIONS, occupied)
}

/// Returns queen attacks given the board occupancy.
#[inline]
pub fn queen_attacks(sq: Square, occupied: SquareSet) -> SquareSet {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

/// Returns the squares `piece` attacks given the board occupancy.
pub fn attacks(piece: &Piece, occupied: SquareSet) -> SquareSet {
    let sq = piece.square();
    match piece.kind() {
        PieceKind::Pawn => pawn_attacks(sq, piece.color()),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::Bishop => bishop_attacks(sq, occupied),
        PieceKind::Rook => rook_attacks(sq, occupied),
        PieceKind::Queen => queen_attacks(sq, occupied),
        PieceKind::King => king_attacks(sq),
    }
}

/// Derived square sets of one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SquareEvaluation {
    /// Squares holding no piece.
    pub free: SquareSet,
    /// Squares holding a piece of each color, indexed by [`Color::index`].
    pub occupied: [SquareSet; 2],
    /// Squares attacked by each color, indexed by [`Color::index`].
    pub attacked: [SquareSet; 2],
}

impl SquareEvaluation {
    /// Evaluates a set of pieces.
    pub fn evaluate<'a>(pieces: impl IntoIterator<Item = &'a Piece> + Clone) -> Self {
        let mut occupied = [SquareSet::EMPTY; 2];
        for piece in pieces.clone() {
            occupied[piece.color().index()].insert(piece.square());
        }
        let all = occupied[0] | occupied[1];

        let mut attacked = [SquareSet::EMPTY; 2];
        for piece in pieces {
            attacked[piece.color().index()] |= attacks(piece, all);
        }

        SquareEvaluation {
            free: !all,
            occupied,
            attacked,
        }
    }

    /// Returns the squares holding a piece of `color`.
    #[inline]
    pub fn occupied_by(&self, color: Color) -> SquareSet {
        self.occupied[color.index()]
    }

    /// Returns the squares attacked by `color`.
    #[inline]
    pub fn attacked_by(&self, color: Color) -> SquareSet {
        self.attacked[color.index()]
    }

    /// Returns the squares holding any piece.
    #[inline]
    pub fn all_occupied(&self) -> SquareSet {
        !self.free
    }

    /// Returns the squares `piece` can move to, ignoring king safety.
    ///
    /// Pawns push one square (two from their start rank) onto free squares
    /// and move diagonally only onto an opponent or the en passant target.
    pub fn reachable(&self, piece: &Piece, en_passant: Option<Square>) -> SquareSet {
        let color = piece.color();
        let sq = piece.square();
        if piece.kind() != PieceKind::Pawn {
            return attacks(piece, self.all_occupied()) - self.occupied_by(color);
        }

        let mut reach = SquareSet::EMPTY;
        let dir = color.pawn_direction();
        if let Some(one) = sq.offset(0, dir).filter(|s| self.free.contains(*s)) {
            reach.insert(one);
            if sq.rank() == color.pawn_rank() {
                if let Some(two) = one.offset(0, dir).filter(|s| self.free.contains(*s)) {
                    reach.insert(two);
                }
            }
        }

        let mut targets = self.occupied_by(color.opposite());
        if let Some(ep) = en_passant {
            targets.insert(ep);
        }
        reach | (pawn_attacks(sq, color) & targets)
    }
}
