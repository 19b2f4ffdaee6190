//! Check, checkmate and stalemate detection, and legal move enumeration.

use crate::Board;
use chess_core::{Color, MoveDescriptor, PieceKind, Square, Wing};
use std::fmt;

/// Where the game stands for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl Status {
    /// Returns true for checkmate and stalemate.
    pub fn is_over(self) -> bool {
        matches!(self, Status::Checkmate | Status::Stalemate)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ongoing => "ongoing",
            Status::Check => "check",
            Status::Checkmate => "checkmate",
            Status::Stalemate => "stalemate",
        };
        write!(f, "{}", name)
    }
}

impl Board {
    /// Returns true if the king of `color` stands on a square the opponent
    /// attacks.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        self.king(color)
            .map_or(false, |king| self.attacked_by(color.opposite()).contains(king.square()))
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.is_king_attacked(self.turn())
    }

    /// Returns every move the side to move could try, before king safety.
    ///
    /// Pieces are visited in square order and their targets in square
    /// order; promotions are expanded into each promotion kind and castles
    /// still held in the rights table come last.
    pub fn candidate_moves(&self) -> Vec<MoveDescriptor> {
        let turn = self.turn();
        let eval = self.evaluation();
        let en_passant = self.en_passant_target();
        let opponents = eval.occupied_by(turn.opposite());

        let mut moves = Vec::new();
        for piece in self.pieces_of(turn) {
            let from = piece.square();
            let is_pawn = piece.kind() == PieceKind::Pawn;
            for to in eval.reachable(piece, en_passant) {
                let is_capture = opponents.contains(to)
                    || (is_pawn && Some(to) == en_passant && to.file() != from.file());
                if is_pawn && to.rank() == turn.promotion_rank() {
                    for kind in PieceKind::PROMOTIONS {
                        moves.push(MoveDescriptor::pinned(
                            turn,
                            PieceKind::Pawn,
                            from,
                            to,
                            is_capture,
                            Some(kind),
                        ));
                    }
                } else {
                    moves.push(MoveDescriptor::pinned(
                        turn,
                        piece.kind(),
                        from,
                        to,
                        is_capture,
                        None,
                    ));
                }
            }
        }

        for wing in Wing::ALL {
            if self.castling()[turn].can_castle(wing) {
                moves.push(MoveDescriptor::castle(turn, wing));
            }
        }
        moves
    }

    /// Returns true if the side to move has no legal move.
    pub fn is_trapped(&self) -> bool {
        let mut probe = self.clone();
        !self
            .candidate_moves()
            .iter()
            .any(|mv| matches!(probe.play_move(mv), Ok(true)))
    }

    /// Returns true if the side to move is checkmated.
    pub fn is_mate(&self) -> bool {
        self.is_check() && self.is_trapped()
    }

    /// Returns true if the side to move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.is_trapped()
    }

    /// Returns the status of the side to move.
    pub fn status(&self) -> Status {
        match (self.is_check(), self.is_trapped()) {
            (true, true) => Status::Checkmate,
            (false, true) => Status::Stalemate,
            (true, false) => Status::Check,
            (false, false) => Status::Ongoing,
        }
    }

    /// Returns every legal move of the side to move in algebraic notation.
    ///
    /// Each candidate is played on its own copy of the board. Notation uses
    /// the shortest origin hint that tells legal moves apart (file, then
    /// rank, then both) and carries a `+` or `#` suffix when it checks.
    pub fn legal_moves(&self) -> Vec<String> {
        let legal: Vec<(MoveDescriptor, Board)> = self
            .candidate_moves()
            .into_iter()
            .filter_map(|mv| {
                let mut branch = self.clone();
                match branch.play_move(&mv) {
                    Ok(true) => Some((mv, branch)),
                    _ => None,
                }
            })
            .collect();

        legal
            .iter()
            .map(|(mv, branch)| {
                let mut text = notation(mv, &legal);
                if branch.is_check() {
                    text.push(if branch.is_trapped() { '#' } else { '+' });
                }
                text
            })
            .collect()
    }
}

fn notation(mv: &MoveDescriptor, legal: &[(MoveDescriptor, Board)]) -> String {
    if let Some(wing) = mv.castle_wing() {
        return wing.notation().to_string();
    }
    let from = match mv.from.square() {
        Some(from) => from,
        None => return mv.text.clone(),
    };

    let mut text = String::new();
    if mv.kind == PieceKind::Pawn {
        if mv.is_capture {
            text.push(from.file().to_char());
        }
    } else {
        text.push(mv.kind.letter());
        text.push_str(&disambiguation(mv, from, legal));
    }
    if mv.is_capture {
        text.push('x');
    }
    text.push_str(&mv.to.to_algebraic());
    if let Some(kind) = mv.promotion {
        text.push('=');
        text.push(kind.letter());
    }
    text
}

fn disambiguation(mv: &MoveDescriptor, from: Square, legal: &[(MoveDescriptor, Board)]) -> String {
    let rivals: Vec<Square> = legal
        .iter()
        .map(|(other, _)| other)
        .filter(|other| other.kind == mv.kind && other.to == mv.to && other.castle_wing().is_none())
        .filter_map(|other| other.from.square())
        .filter(|sq| *sq != from)
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.file() != from.file()) {
        from.file().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != from.rank()) {
        from.rank().to_string()
    } else {
        from.to_algebraic()
    }
}
