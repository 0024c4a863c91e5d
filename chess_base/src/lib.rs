//! # Base types for gambit
//!
//! This is an auxiliary crate for `gambit`, which contains value types and board geometry shared
//! by the engine. It has no knowledge of move generation or game rules.
//!
//! Normally you don't want to use this crate directly. Use `gambit` instead.

pub mod bitboard;
pub mod geometry;
pub mod types;
