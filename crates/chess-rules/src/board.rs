//! The board state machine.
//!
//! [`Board`] owns the placement, the side to move, the castling table, one
//! capture stack per color and the move history. Every mutation ends with
//! [`Board::refresh`], which recomputes the derived [`SquareEvaluation`].

use crate::attacks::SquareEvaluation;
use crate::castling;
use crate::setup::SetupError;
use crate::{Piece, SquareSet};
use chess_core::{CastlingRights, CastlingTable, Color, File, MoveDescriptor, PieceKind, Square, Wing};
use tracing::trace;

/// A capture, kept on the capturing color's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    /// The capturing piece as it stood before the move.
    pub capturing: Piece,
    pub captured: Piece,
}

/// One committed move or castle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The moving piece before the move (the king for castles).
    pub piece: Piece,
    pub mv: MoveDescriptor,
    /// Castling table in force before the move.
    pub castling: CastlingTable,
    /// The move pushed onto the capture stack.
    pub captured: bool,
}

impl HistoryEntry {
    /// Square the move started from.
    #[inline]
    pub fn origin(&self) -> Square {
        self.piece.square()
    }
}

/// State a board was created with that the history cannot reconstruct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StartState {
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for StartState {
    fn default() -> Self {
        StartState {
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A chess board with its full game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    turn: Color,
    castling: CastlingTable,
    captures: [Vec<Capture>; 2],
    history: Vec<HistoryEntry>,
    eval: SquareEvaluation,
    start: StartState,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board in the standard starting position.
    pub fn new() -> Self {
        let mut squares = [None; 64];
        for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
            for color in Color::ALL {
                let back = Square::new(file, color.back_rank());
                squares[back.index() as usize] = Some(Piece::new(color, kind, back));
                let front = Square::new(file, color.pawn_rank());
                squares[front.index() as usize] = Some(Piece::new(color, PieceKind::Pawn, front));
            }
        }
        Self::assemble(squares, Color::White, CastlingTable::INITIAL, StartState::default())
    }

    /// Creates a board from an arbitrary piece list.
    ///
    /// Only structural invariants are checked: one piece per square and
    /// exactly one king per color. Reachability of the position is not.
    pub fn from_pieces(
        pieces: impl IntoIterator<Item = Piece>,
        turn: Color,
        castling: CastlingTable,
    ) -> Result<Self, SetupError> {
        Self::from_pieces_at(pieces, turn, castling, StartState::default())
    }

    pub(crate) fn from_pieces_at(
        pieces: impl IntoIterator<Item = Piece>,
        turn: Color,
        castling: CastlingTable,
        start: StartState,
    ) -> Result<Self, SetupError> {
        let mut squares = [None; 64];
        for piece in pieces {
            let slot = &mut squares[piece.square().index() as usize];
            if slot.is_some() {
                return Err(SetupError::DoubleOccupied(piece.square()));
            }
            *slot = Some(piece);
        }

        for color in Color::ALL {
            let count = squares
                .iter()
                .flatten()
                .filter(|p| p.color() == color && p.kind() == PieceKind::King)
                .count();
            if count != 1 {
                return Err(SetupError::KingCount { color, count });
            }
        }

        Ok(Self::assemble(squares, turn, castling, start))
    }

    fn assemble(
        squares: [Option<Piece>; 64],
        turn: Color,
        castling: CastlingTable,
        start: StartState,
    ) -> Self {
        let mut board = Board {
            squares,
            turn,
            castling,
            captures: [Vec::new(), Vec::new()],
            history: Vec::new(),
            eval: SquareEvaluation::default(),
            start,
        };
        board.refresh();
        board
    }

    /// Returns the side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the castling table.
    #[inline]
    pub fn castling(&self) -> CastlingTable {
        self.castling
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.index() as usize].as_ref()
    }

    /// Iterates over all pieces in square order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + Clone {
        self.squares.iter().flatten()
    }

    /// Iterates over the pieces of `color` in square order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> + Clone {
        self.pieces().filter(move |p| p.color() == color)
    }

    /// Returns the king of `color`.
    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces_of(color).find(|p| p.kind() == PieceKind::King)
    }

    /// Returns the captures made by `color`, oldest first.
    #[inline]
    pub fn captures(&self, color: Color) -> &[Capture] {
        &self.captures[color.index()]
    }

    /// Returns the committed moves, oldest first.
    #[inline]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the derived square sets of the current position.
    #[inline]
    pub fn evaluation(&self) -> &SquareEvaluation {
        &self.eval
    }

    /// Returns the squares attacked by `color`.
    #[inline]
    pub fn attacked_by(&self, color: Color) -> SquareSet {
        self.eval.attacked_by(color)
    }

    pub(crate) fn start(&self) -> StartState {
        self.start
    }

    /// Returns the square a pawn may capture en passant onto.
    ///
    /// That is the square behind a pawn which double-stepped on the last
    /// move, or the target the board was created with if nothing has been
    /// played yet.
    pub fn en_passant_target(&self) -> Option<Square> {
        let last = match self.history.last() {
            Some(entry) => entry,
            None => return self.start.en_passant,
        };
        let from = last.origin();
        let to = last.mv.to;
        let distance = to.rank().index() as i8 - from.rank().index() as i8;
        if last.piece.kind() == PieceKind::Pawn && from.file() == to.file() && distance.abs() == 2 {
            from.offset(0, distance / 2)
        } else {
            None
        }
    }

    /// Recomputes the derived square sets from the placement.
    pub fn refresh(&mut self) {
        self.eval = SquareEvaluation::evaluate(self.squares.iter().flatten());
    }

    fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize].take()
    }

    fn place(&mut self, piece: Piece) {
        self.squares[piece.square().index() as usize] = Some(piece);
    }

    /// Replaces the pawn on `sq` with a piece of `kind`.
    pub(crate) fn promote(&mut self, sq: Square, kind: PieceKind) {
        if let Some(pawn) = self.take(sq) {
            debug_assert_eq!(pawn.kind(), PieceKind::Pawn);
            self.place(pawn.promoted(kind));
        }
    }

    /// Applies a move without any legality check.
    ///
    /// `piece` must stand on its square. A capture onto an empty square takes
    /// the pawn beside the origin (en passant). A pawn reaching its last rank
    /// is promoted to the requested kind, or a queen.
    pub(crate) fn commit_move(&mut self, piece: Piece, mv: &MoveDescriptor) {
        debug_assert_eq!(self.piece_at(piece.square()), Some(&piece));
        let prior = self.castling;
        let color = piece.color();
        let from = piece.square();
        let to = mv.to;

        let mut captured = false;
        if mv.is_capture {
            let target = if self.piece_at(to).is_some() {
                to
            } else {
                Square::new(to.file(), from.rank())
            };
            if let Some(victim) = self.take(target) {
                self.captures[color.index()].push(Capture {
                    capturing: piece,
                    captured: victim,
                });
                captured = true;
            }
        }

        self.take(from);
        self.place(piece.moved_to(to));
        if piece.kind() == PieceKind::Pawn && to.rank() == color.promotion_rank() {
            self.promote(to, mv.promotion.unwrap_or(PieceKind::Queen));
        }

        self.castling = castling::on_move(prior, &piece, to, mv.is_capture);
        self.history.push(HistoryEntry {
            piece,
            mv: mv.clone(),
            castling: prior,
            captured,
        });
        self.turn = color.opposite();
        self.refresh();
        trace!(%piece, %to, captured, "committed move");
    }

    /// Relocates king and rook for a castle without any legality check.
    ///
    /// Returns false, changing nothing, if either piece is missing.
    pub(crate) fn commit_castle(&mut self, wing: Wing, mv: &MoveDescriptor) -> bool {
        let color = mv.color;
        let squares = wing.squares(color);
        let (king, rook) = match (
            self.piece_at(squares.king_from).copied(),
            self.piece_at(squares.rook_from).copied(),
        ) {
            (Some(king), Some(rook)) => (king, rook),
            _ => return false,
        };

        let prior = self.castling;
        self.take(squares.king_from);
        self.take(squares.rook_from);
        self.place(king.moved_to(squares.king_to));
        self.place(rook.moved_to(squares.rook_to));

        self.castling[color] = CastlingRights::CASTLED;
        self.history.push(HistoryEntry {
            piece: king,
            mv: mv.clone(),
            castling: prior,
            captured: false,
        });
        self.turn = color.opposite();
        self.refresh();
        trace!(%color, castle = wing.notation(), "committed castle");
        true
    }

    /// Reverses the last non-castle move and restores `prior` rights.
    pub(crate) fn undo_move(&mut self, prior: CastlingTable) -> bool {
        let entry = match self.history.pop() {
            Some(entry) => entry,
            None => return false,
        };
        debug_assert!(entry.mv.castle_wing().is_none());
        let color = entry.piece.color();

        self.take(entry.mv.to);
        if entry.captured {
            if let Some(capture) = self.captures[color.index()].pop() {
                self.place(capture.captured);
            }
        }
        self.place(entry.piece);

        self.castling = prior;
        self.turn = color;
        self.refresh();
        trace!(piece = %entry.piece, "undid move");
        true
    }

    /// Reverses the last castle and restores `prior` rights.
    pub(crate) fn undo_castle(&mut self, prior: CastlingTable) -> bool {
        let entry = match self.history.pop() {
            Some(entry) => entry,
            None => return false,
        };
        let wing = match entry.mv.castle_wing() {
            Some(wing) => wing,
            None => {
                self.history.push(entry);
                return false;
            }
        };
        let color = entry.piece.color();
        let squares = wing.squares(color);

        let rook = self.take(squares.rook_to);
        self.take(squares.king_to);
        self.place(entry.piece);
        if let Some(rook) = rook {
            self.place(rook.moved_to(squares.rook_from));
        }

        self.castling = prior;
        self.turn = color;
        self.refresh();
        trace!(%color, castle = wing.notation(), "undid castle");
        true
    }

    /// Takes back the most recent move or castle.
    ///
    /// Returns false if nothing has been played.
    pub fn undo(&mut self) -> bool {
        let (prior, is_castle) = match self.history.last() {
            Some(entry) => (entry.castling, entry.mv.castle_wing().is_some()),
            None => return false,
        };
        if is_castle {
            self.undo_castle(prior)
        } else {
            self.undo_move(prior)
        }
    }
}
