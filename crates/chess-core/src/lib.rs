//! Core types for chess notation.
//!
//! This crate provides the board-independent vocabulary used by the rules
//! crate:
//! - [`Color`] and [`PieceKind`]
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Wing`] and [`CastlingTable`] for castling squares and rights
//! - [`MoveDescriptor`], parsed from algebraic notation
//! - FEN decoding and encoding

mod castling;
mod color;
mod fen;
pub mod notation;
mod piece;
mod square;

pub use castling::{CastleSquares, CastlingRights, CastlingTable, Wing};
pub use color::Color;
pub use fen::{Fen, FenError, Placement};
pub use notation::{MoveCategory, MoveDescriptor, NotationError, OriginHint};
pub use piece::PieceKind;
pub use square::{File, Rank, Square};
