//! Detection of attacked squares

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry::{self, BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRS};
use crate::types::{Color, PieceKind, Position};

/// Returns the first occupied square along the ray from `src` in direction `(dr, dc)`
#[inline]
fn first_blocker(b: &Board, src: Position, (dr, dc): (i8, i8)) -> Option<Position> {
    let mut cur = src.offset(dr, dc);
    while cur.is_in_bounds() {
        if b.has_piece(cur) {
            return Some(cur);
        }
        cur = cur.offset(dr, dc);
    }
    None
}

/// Calls `f` for each square from which a piece of color `by` attacks `pos`
///
/// Iteration stops as soon as `f` returns `true`, in which case `true` is returned.
fn scan_attackers(
    b: &Board,
    pos: Position,
    by: Color,
    mut f: impl FnMut(Position) -> bool,
) -> bool {
    let holds = |p: Position, kinds: &[PieceKind]| {
        matches!(b.get(p), Some(piece) if piece.color == by && kinds.contains(&piece.kind))
    };

    // Pawns of `by` capture towards increasing row for white, so they stand one row behind
    let behind = -geometry::pawn_forward_delta(by);
    for dc in [-1, 1] {
        let src = pos.offset(behind, dc);
        if holds(src, &[PieceKind::Pawn]) && f(src) {
            return true;
        }
    }

    for &(dr, dc) in &KNIGHT_OFFSETS {
        let src = pos.offset(dr, dc);
        if holds(src, &[PieceKind::Knight]) && f(src) {
            return true;
        }
    }

    for &(dr, dc) in &KING_OFFSETS {
        let src = pos.offset(dr, dc);
        if holds(src, &[PieceKind::King]) && f(src) {
            return true;
        }
    }

    for &dir in &BISHOP_DIRS {
        if let Some(src) = first_blocker(b, pos, dir) {
            if holds(src, &[PieceKind::Bishop, PieceKind::Queen]) && f(src) {
                return true;
            }
        }
    }

    for &dir in &ROOK_DIRS {
        if let Some(src) = first_blocker(b, pos, dir) {
            if holds(src, &[PieceKind::Rook, PieceKind::Queen]) && f(src) {
                return true;
            }
        }
    }

    false
}

/// Returns `true` if any piece of color `by` could capture on `pos` with its next move
///
/// The square itself may be empty or hold a piece of any color. Out-of-bounds positions are
/// never attacked.
pub fn is_attacked(b: &Board, pos: Position, by: Color) -> bool {
    if !pos.is_in_bounds() {
        return false;
    }
    scan_attackers(b, pos, by, |_| true)
}

/// Returns `true` if the piece on `pos` is attacked by the opponent of its owner
///
/// Returns `false` if the square is empty.
pub fn in_danger(b: &Board, pos: Position) -> bool {
    match b.get(pos) {
        Some(p) => is_attacked(b, pos, p.color.inv()),
        None => false,
    }
}

/// Returns the squares of all the pieces of color `by` which attack `pos`
pub fn attackers(b: &Board, pos: Position, by: Color) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    if pos.is_in_bounds() {
        scan_attackers(b, pos, by, |src| {
            res.set(src);
            false
        });
    }
    res
}
