//! Movetext: numbered move sequences such as `1.e4 e5 2.Nf3 Nc6`.

use crate::{Board, MoveError};
use chess_core::Color;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Game result markers that may end a movetext.
const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Errors that stop a movetext replay.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MovetextError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("illegal move {text} at ply {ply}")]
    IllegalMove { ply: usize, text: String },
}

/// The moves of a movetext in ply order, stripped of numbers and results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Movetext {
    plies: Vec<String>,
}

impl Movetext {
    /// Splits a movetext into plies.
    ///
    /// Move numbers (`12.`, `12...`) may be attached to the move or stand
    /// alone; result markers are dropped.
    pub fn parse(text: &str) -> Self {
        let plies = text
            .split_whitespace()
            .map(strip_move_number)
            .filter(|token| !token.is_empty() && !RESULTS.contains(token))
            .map(str::to_string)
            .collect();
        Movetext { plies }
    }

    /// Returns the moves in ply order.
    pub fn plies(&self) -> &[String] {
        &self.plies
    }

    pub fn len(&self) -> usize {
        self.plies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }
}

fn strip_move_number(token: &str) -> &str {
    let digits = token.len() - token.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return token;
    }
    match token[digits..].strip_prefix('.') {
        Some(rest) => rest.trim_start_matches('.'),
        None => token,
    }
}

impl fmt::Display for Movetext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(self.plies.iter().map(String::as_str), Color::White, 1))
    }
}

/// Numbers plies starting with `first` to move at move `number`.
fn render<'a>(plies: impl Iterator<Item = &'a str>, first: Color, number: u32) -> String {
    let mut out = String::new();
    let mut number = number;
    let mut color = first;
    for (i, ply) in plies.enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match color {
            Color::White => out.push_str(&format!("{}.", number)),
            Color::Black if i == 0 => out.push_str(&format!("{}...", number)),
            Color::Black => {}
        }
        out.push_str(ply);
        if color == Color::Black {
            number += 1;
        }
        color = color.opposite();
    }
    out
}

impl Board {
    /// Renders the played moves as numbered movetext.
    pub fn movetext(&self) -> String {
        let first = match self.history().first() {
            Some(entry) => entry.piece.color(),
            None => return String::new(),
        };
        let start = self.fullmove_number()
            - self
                .history()
                .iter()
                .filter(|entry| entry.piece.color() == Color::Black)
                .count() as u32;
        render(
            self.history().iter().map(|entry| entry.mv.text.as_str()),
            first,
            start,
        )
    }
}

/// Replays a movetext on a board.
#[derive(Debug, Clone)]
pub struct Player {
    movetext: Movetext,
    board: Board,
}

impl Player {
    pub fn new(movetext: Movetext, board: Board) -> Self {
        Player { movetext, board }
    }

    /// Plays every ply for the side to move and returns the final board.
    pub fn play(mut self) -> Result<Board, MovetextError> {
        for (i, text) in self.movetext.plies().iter().enumerate() {
            let color = self.board.turn();
            if !self.board.play(color, text)? {
                debug!(ply = i + 1, %text, "movetext replay stopped");
                return Err(MovetextError::IllegalMove {
                    ply: i + 1,
                    text: text.clone(),
                });
            }
        }
        Ok(self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::NotationError;

    #[test]
    fn parse_numbered_movetext() {
        let movetext = Movetext::parse("1.e4 e5 2.Nf3 Nc6 3. Bb5 a6 1-0");
        assert_eq!(movetext.plies(), ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]);
        assert_eq!(movetext.len(), 6);
    }

    #[test]
    fn parse_black_continuation_and_results() {
        let movetext = Movetext::parse("12...Nf6 13.O-O 1/2-1/2");
        assert_eq!(movetext.plies(), ["Nf6", "O-O"]);
        assert!(Movetext::parse("*").is_empty());
        assert!(Movetext::parse("").is_empty());
    }

    #[test]
    fn castles_written_with_zeros_survive() {
        let movetext = Movetext::parse("1.0-0 0-0-0 0-1");
        assert_eq!(movetext.plies(), ["0-0", "0-0-0"]);
    }

    #[test]
    fn display_numbers_pairs() {
        let movetext = Movetext::parse("e4 e5 Nf3");
        assert_eq!(movetext.to_string(), "1.e4 e5 2.Nf3");
    }

    #[test]
    fn replay_game() {
        let movetext = Movetext::parse("1.e4 e5 2.Nf3 Nc6 3.Bb5 a6");
        let board = Player::new(movetext, Board::new()).play().unwrap();
        assert_eq!(board.history().len(), 6);
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.movetext(), "1.e4 e5 2.Nf3 Nc6 3.Bb5 a6");
    }

    #[test]
    fn replay_stops_at_illegal_move() {
        let movetext = Movetext::parse("1.e4 e5 2.Ke3");
        let result = Player::new(movetext, Board::new()).play();
        assert_eq!(
            result.unwrap_err(),
            MovetextError::IllegalMove {
                ply: 3,
                text: "Ke3".to_string()
            }
        );
    }

    #[test]
    fn replay_propagates_notation_errors() {
        let movetext = Movetext::parse("1.e4 e5 2.Zz9");
        let result = Player::new(movetext, Board::new()).play();
        assert!(matches!(
            result,
            Err(MovetextError::Move(MoveError::Notation(NotationError::Invalid(_))))
        ));
    }

    #[test]
    fn movetext_from_black_to_move() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 7").unwrap();
        assert_eq!(board.play(Color::Black, "Kd7"), Ok(true));
        assert_eq!(board.play(Color::White, "Kd2"), Ok(true));
        assert_eq!(board.movetext(), "7...Kd7 8.Kd2");
    }
}
