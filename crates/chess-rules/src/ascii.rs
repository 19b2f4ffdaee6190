//! Plain-text board rendering.

use crate::Board;
use chess_core::{File, Rank, Square};
use std::fmt;

impl Board {
    /// Renders the board as eight lines, rank 8 first.
    ///
    /// Each square is three characters wide: White pieces in uppercase,
    /// Black in lowercase, `.` for an empty square.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(8 * 25);
        for rank in Rank::ALL.iter().rev() {
            for file in File::ALL {
                let c = self
                    .piece_at(Square::new(file, *rank))
                    .map_or('.', |p| p.to_fen_char());
                out.push(' ');
                out.push(c);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii())
    }
}
