//! Move legality: resolving a move against the board and committing it.
//!
//! A move goes through three gates. [`Board::is_valid_move`] checks it
//! against the side to move and the occupancy of the destination.
//! [`Board::pick_pieces`] resolves the candidate pieces in square order.
//! Each candidate must then reach the destination and survive a trial
//! apply that leaves its own king unattacked; the first that does is
//! committed.

use crate::{Board, Piece, Role};
use chess_core::{Color, MoveDescriptor, NotationError, PieceKind, Wing};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that abort playing a move.
///
/// A move that is well formed but not legal is not an error; it is
/// reported as `Ok(false)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("no {color} {kind} can play {text}")]
    NoMatchingPiece {
        color: Color,
        kind: PieceKind,
        text: String,
    },
}

impl Board {
    /// Parses `text` as a move by `color` and plays it if legal.
    ///
    /// Returns `Ok(true)` if the move was committed and `Ok(false)` if it is
    /// not legal in this position, leaving the board untouched.
    pub fn play(&mut self, color: Color, text: &str) -> Result<bool, MoveError> {
        let mv = MoveDescriptor::parse(color, text)?;
        self.play_move(&mv)
    }

    /// Plays an already parsed move if legal.
    pub fn play_move(&mut self, mv: &MoveDescriptor) -> Result<bool, MoveError> {
        if !self.is_valid_move(mv) {
            debug!(color = %mv.color, text = %mv.text, "move not valid in this position");
            return Ok(false);
        }

        let legal = match mv.castle_wing() {
            Some(wing) => self.castle_move(wing, mv),
            None => self.is_legal_move(mv)?,
        };
        if !legal {
            debug!(color = %mv.color, text = %mv.text, "move rejected as illegal");
        }
        Ok(legal)
    }

    /// Checks a move against the side to move and the destination square.
    ///
    /// A capture must land on an opposing piece other than the king, or be a
    /// pawn capturing en passant. A non-capture must land on a free square.
    /// Castles are checked separately by [`Board::can_castle`].
    pub fn is_valid_move(&self, mv: &MoveDescriptor) -> bool {
        if mv.color != self.turn() {
            return false;
        }
        if mv.castle_wing().is_some() {
            return true;
        }
        match self.piece_at(mv.to) {
            Some(target) => {
                mv.is_capture && target.color() != mv.color && target.kind() != PieceKind::King
            }
            None => {
                !mv.is_capture
                    || (mv.kind == PieceKind::Pawn && self.en_passant_target() == Some(mv.to))
            }
        }
    }

    /// Returns the pieces that could be meant by `mv`, in square order.
    pub fn pick_pieces(&self, mv: &MoveDescriptor) -> Result<Vec<Piece>, MoveError> {
        let candidates: Vec<Piece> = self
            .pieces_of(mv.color)
            .filter(|p| p.kind() == mv.kind && mv.from.matches(p.square()))
            .copied()
            .collect();

        if candidates.is_empty() {
            return Err(MoveError::NoMatchingPiece {
                color: mv.color,
                kind: mv.kind,
                text: mv.text.clone(),
            });
        }
        Ok(candidates)
    }

    /// Returns true if `piece` can make `mv` geometrically.
    ///
    /// Pawns capture diagonally only and push straight only; a requested
    /// promotion must land on the last rank.
    pub fn reaches(&self, piece: &Piece, mv: &MoveDescriptor) -> bool {
        let reachable = self
            .evaluation()
            .reachable(piece, self.en_passant_target());
        if !reachable.contains(mv.to) {
            return false;
        }
        if piece.kind() != PieceKind::Pawn {
            return true;
        }

        let diagonal = piece.square().file() != mv.to.file();
        if diagonal != mv.is_capture {
            return false;
        }
        mv.promotion.is_none() || mv.to.rank() == piece.color().promotion_rank()
    }

    /// Trial-applies `mv` with `piece` and reports whether it exposes the
    /// mover's king. The board is restored before returning.
    pub fn leaves_in_check(&mut self, piece: Piece, mv: &MoveDescriptor) -> bool {
        let prior = self.castling();
        self.commit_move(piece, mv);
        let exposed = self.is_king_attacked(piece.color());
        let undone = self.undo_move(prior);
        debug_assert!(undone, "trial move must be undoable");
        trace!(%piece, to = %mv.to, exposed, "probed move");
        exposed
    }

    fn is_legal_move(&mut self, mv: &MoveDescriptor) -> Result<bool, MoveError> {
        for piece in self.pick_pieces(mv)? {
            if !self.reaches(&piece, mv) || self.leaves_in_check(piece, mv) {
                continue;
            }
            self.commit_move(piece, mv);
            return Ok(true);
        }
        Ok(false)
    }

    /// Returns true if `color` may castle on `wing` right now.
    ///
    /// The right must still be held, the king and the wing's home rook must
    /// stand on their squares, the squares between them must be free, and
    /// the king may not be in check nor cross or land on an attacked square.
    pub fn can_castle(&self, color: Color, wing: Wing) -> bool {
        let rights = self.castling()[color];
        if rights.castled || !rights.can_castle(wing) {
            return false;
        }

        let squares = wing.squares(color);
        let king_home = matches!(
            self.piece_at(squares.king_from),
            Some(p) if p.color() == color && p.role() == Role::King
        );
        let rook_home = matches!(
            self.piece_at(squares.rook_from),
            Some(p) if p.color() == color && p.role() == Role::Rook(Some(wing))
        );
        if !king_home || !rook_home {
            return false;
        }

        let free = self.evaluation().free;
        if !squares.empty.iter().all(|sq| free.contains(*sq)) {
            return false;
        }

        let attacked = self.attacked_by(color.opposite());
        !attacked.contains(squares.king_from)
            && !squares.king_path.iter().any(|sq| attacked.contains(*sq))
    }

    /// Castles `color` on `wing` if it is `color`'s turn and castling is
    /// allowed.
    pub fn castle(&mut self, color: Color, wing: Wing) -> bool {
        if color != self.turn() {
            return false;
        }
        let mv = MoveDescriptor::castle(color, wing);
        self.castle_move(wing, &mv)
    }

    fn castle_move(&mut self, wing: Wing, mv: &MoveDescriptor) -> bool {
        if !self.can_castle(mv.color, wing) {
            return false;
        }
        self.commit_castle(wing, mv)
    }
}
