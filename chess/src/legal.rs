//! Filtering of pseudo-legal moves

use crate::attack;
use crate::board::Board;
use crate::movegen::MoveList;
use crate::moves::Move;
use crate::types::{PieceKind, Position};

use log::trace;

/// Checks whether pseudo-legal moves leave the mover's own king safe
///
/// Every candidate is applied to a copy of the board, so the source board is never touched.
pub struct Checker<'a> {
    board: &'a Board,
    king: Option<Position>,
}

impl<'a> Checker<'a> {
    /// Creates a checker for moves on `board`, where the mover's king stands on `king`
    ///
    /// If `king` is `None`, the mover has no king, and every pseudo-legal move is accepted.
    pub fn new(board: &'a Board, king: Option<Position>) -> Self {
        Checker { board, king }
    }

    /// Returns `true` if the pseudo-legal move `mv` doesn't leave the mover's king attacked
    ///
    /// The promotion kind of `mv` is ignored, since it doesn't change whether the king is safe.
    pub fn is_legal(&self, mv: Move) -> bool {
        if !mv.is_in_bounds() {
            return false;
        }
        let mut king = match self.king {
            Some(king) => king,
            None => return true,
        };
        let mut b = self.board.clone();
        let piece = match b.remove(mv.start()) {
            Some(p) => p,
            None => return false,
        };
        b.place(mv.end(), piece);
        if piece.kind == PieceKind::King {
            king = mv.end();
        }
        let legal = !attack::in_danger(&b, king);
        trace!("candidate {} is {}", mv, if legal { "legal" } else { "illegal" });
        legal
    }

    /// Removes the moves which leave the king attacked from `moves`
    pub fn filter(&self, moves: &mut MoveList) {
        moves.retain(|mv| self.is_legal(*mv));
    }
}
