//! Chess rules: a board state machine driven by algebraic notation.
//!
//! This crate provides:
//! - [`Board`] - placement, turn, castling rights, capture stacks and history
//! - [`SquareEvaluation`] - free, occupied and attacked squares per position
//! - The legality pipeline behind [`Board::play`]
//! - Check, checkmate and stalemate detection and legal move listing
//! - FEN, ASCII and movetext rendering, TOML setups and movetext replay
//!
//! # Example
//!
//! ```
//! use chess_core::Color;
//! use chess_rules::{Board, Status};
//!
//! let mut board = Board::new();
//! for text in ["f3", "e5", "g4", "Qh4#"] {
//!     let color = board.turn();
//!     assert_eq!(board.play(color, text), Ok(true));
//! }
//! assert_eq!(board.status(), Status::Checkmate);
//! assert_eq!(board.play(Color::White, "e4"), Ok(false));
//! ```

mod ascii;
pub mod attacks;
mod board;
pub mod castling;
mod fen;
mod legality;
mod movetext;
mod piece;
mod setup;
mod square_set;
mod status;

pub use attacks::SquareEvaluation;
pub use board::{Board, Capture, HistoryEntry};
pub use legality::MoveError;
pub use movetext::{Movetext, MovetextError, Player};
pub use piece::{Piece, Role};
pub use setup::{CastlingSetup, Kind, PieceSetup, RightsSetup, Setup, SetupError, Side, WingName};
pub use square_set::{SquareSet, SquareSetIter};
pub use status::Status;
