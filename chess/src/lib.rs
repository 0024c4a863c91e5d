//! Chess rules engine
//!
//! The crate tracks a chess game on an 8x8 board. It generates moves for every kind of piece,
//! detects attacked squares, filters out the moves which leave the own king in check, applies
//! moves with pawn promotion and answers whether a side is in check, checkmated or stalemated.
//!
//! Castling and en passant are not part of the rules implemented here.
//!
//! # Example
//!
//! ```
//! use gambit::{Color, Game, Move, Position};
//! use std::str::FromStr;
//!
//! let mut game = Game::new();
//! let moves = game.legal_moves(Position::from_str("g1").unwrap());
//! assert_eq!(moves.len(), 2);
//!
//! game.make_move(Move::from_str("g1f3").unwrap()).unwrap();
//! assert_eq!(game.turn(), Color::Black);
//! assert!(game.make_move(Move::from_str("f3g5").unwrap()).is_err());
//! assert_eq!(game.outcome(), None);
//! ```

pub mod attack;
pub mod board;
pub mod game;
pub mod legal;
pub mod movegen;
pub mod moves;

pub use gambit_base::{bitboard, geometry, types};

pub use bitboard::Bitboard;
pub use board::Board;
pub use game::{Game, IllegalMove};
pub use movegen::MoveList;
pub use moves::Move;
pub use types::{Color, Outcome, Piece, PieceKind, Position};
