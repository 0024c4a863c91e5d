//! Pseudo-legal move generation
//!
//! Generators here follow the movement pattern of each piece and respect blocking pieces, but
//! they don't check whether the move leaves the mover's own king in check. That filter is applied
//! by [`legal`](crate::legal).

use crate::board::Board;
use crate::geometry::{self, BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRS};
use crate::moves::Move;
use crate::types::{Color, PieceKind, Position};

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// Upper bound on the number of pseudo-legal moves of a single piece
///
/// A queen in the center reaches 27 squares, a pawn with two captures on the promotion row
/// produces 12 moves.
pub const MAX_PIECE_MOVES: usize = 32;

/// List of moves of a single piece
///
/// Generators never emit the same move twice, so the list may be treated as a set.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, MAX_PIECE_MOVES>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, MAX_PIECE_MOVES>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, MAX_PIECE_MOVES>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

/// Destination for generated moves
pub trait MovePush {
    fn push(&mut self, m: Move);
}

impl MovePush for MoveList {
    fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        Vec::push(self, m);
    }
}

/// Scans outward from `src` along each of `dirs`, as a piece of color `color` would slide
///
/// Empty squares are recorded and the scan continues. A square with a rival piece is recorded
/// and ends the ray. A square with a friendly piece ends the ray without being recorded.
pub(crate) fn slide_into<P: MovePush>(
    b: &Board,
    src: Position,
    color: Color,
    dirs: &[(i8, i8)],
    dst: &mut P,
) {
    for &(dr, dc) in dirs {
        let mut cur = src.offset(dr, dc);
        while cur.is_in_bounds() {
            match b.get(cur) {
                None => dst.push(Move::new(src, cur)),
                Some(p) => {
                    if p.color != color {
                        dst.push(Move::new(src, cur));
                    }
                    break;
                }
            }
            cur = cur.offset(dr, dc);
        }
    }
}

/// Records each in-bounds square at the given offsets which is empty or holds a rival piece
pub(crate) fn jump_into<P: MovePush>(
    b: &Board,
    src: Position,
    color: Color,
    offsets: &[(i8, i8)],
    dst: &mut P,
) {
    for &(dr, dc) in offsets {
        if let Some(pos) = src.try_offset(dr, dc) {
            if !b.has_piece(pos) || b.has_rival(pos, color) {
                dst.push(Move::new(src, pos));
            }
        }
    }
}

fn push_pawn<P: MovePush>(src: Position, end: Position, color: Color, dst: &mut P) {
    if end.row() == geometry::promotion_row(color) {
        for kind in PieceKind::PROMOTIONS {
            dst.push(Move::with_promotion(src, end, kind));
        }
    } else {
        dst.push(Move::new(src, end));
    }
}

fn pawn_into_impl<P: MovePush>(b: &Board, src: Position, color: Color, dst: &mut P) {
    let fwd = geometry::pawn_forward_delta(color);
    let one = src.offset(fwd, 0);
    if !one.is_in_bounds() {
        return;
    }

    let two = src.offset(2 * fwd, 0);
    if src.row() == geometry::pawn_start_row(color) && !b.has_piece(one) && !b.has_piece(two) {
        dst.push(Move::new(src, two));
    }

    if !b.has_piece(one) {
        push_pawn(src, one, color, dst);
    }

    for dc in [-1, 1] {
        let diag = src.offset(fwd, dc);
        if b.has_rival(diag, color) {
            push_pawn(src, diag, color, dst);
        }
    }
}

fn rook_into_impl<P: MovePush>(b: &Board, src: Position, color: Color, dst: &mut P) {
    slide_into(b, src, color, &ROOK_DIRS, dst);
}

fn bishop_into_impl<P: MovePush>(b: &Board, src: Position, color: Color, dst: &mut P) {
    slide_into(b, src, color, &BISHOP_DIRS, dst);
}

fn queen_into_impl<P: MovePush>(b: &Board, src: Position, color: Color, dst: &mut P) {
    slide_into(b, src, color, &BISHOP_DIRS, dst);
    slide_into(b, src, color, &ROOK_DIRS, dst);
}

fn knight_into_impl<P: MovePush>(b: &Board, src: Position, color: Color, dst: &mut P) {
    jump_into(b, src, color, &KNIGHT_OFFSETS, dst);
}

fn king_into_impl<P: MovePush>(b: &Board, src: Position, color: Color, dst: &mut P) {
    jump_into(b, src, color, &KING_OFFSETS, dst);
}

fn piece_into_impl<P: MovePush>(
    b: &Board,
    src: Position,
    color: Color,
    kind: PieceKind,
    dst: &mut P,
) {
    match kind {
        PieceKind::King => king_into_impl(b, src, color, dst),
        PieceKind::Queen => queen_into_impl(b, src, color, dst),
        PieceKind::Rook => rook_into_impl(b, src, color, dst),
        PieceKind::Bishop => bishop_into_impl(b, src, color, dst),
        PieceKind::Knight => knight_into_impl(b, src, color, dst),
        PieceKind::Pawn => pawn_into_impl(b, src, color, dst),
    }
}

macro_rules! do_impl {
    ($($(#[$attr:meta])* $name:ident; $name_into:ident => $impl:ident;)*) => {
        $(
            $(#[$attr])*
            ///
            /// The color of the moving piece is taken from the occupant of `src`. Nothing is
            /// generated if `src` is empty or out of bounds.
            pub fn $name_into<P: MovePush>(b: &Board, src: Position, dst: &mut P) {
                if let Some(p) = b.get(src) {
                    $impl(b, src, p.color, dst);
                }
            }

            $(#[$attr])*
            ///
            /// Returns an empty list if `src` is empty or out of bounds.
            pub fn $name(b: &Board, src: Position) -> MoveList {
                let mut res = MoveList::new();
                $name_into(b, src, &mut res);
                res
            }
        )*
    }
}

do_impl! {
    /// Generates moves of a rook on `src` along the four orthogonal rays
    rook; rook_into => rook_into_impl;

    /// Generates moves of a bishop on `src` along the four diagonal rays
    bishop; bishop_into => bishop_into_impl;

    /// Generates moves of a queen on `src`, which are the union of rook and bishop moves
    queen; queen_into => queen_into_impl;

    /// Generates moves of a knight on `src`
    knight; knight_into => knight_into_impl;

    /// Generates moves of a king on `src` to the adjacent squares
    ///
    /// Whether the destination is attacked is not considered here.
    king; king_into => king_into_impl;

    /// Generates moves of a pawn on `src`
    ///
    /// Moves landing on the promotion row are expanded into one move per promotion kind. En
    /// passant is not generated.
    pawn; pawn_into => pawn_into_impl;
}

/// Generates pseudo-legal moves of whichever piece stands on `src`
pub fn piece_moves_into<P: MovePush>(b: &Board, src: Position, dst: &mut P) {
    if let Some(p) = b.get(src) {
        piece_into_impl(b, src, p.color, p.kind, dst);
    }
}

/// Generates pseudo-legal moves of whichever piece stands on `src`
///
/// Returns an empty list if `src` is empty or out of bounds.
pub fn piece_moves(b: &Board, src: Position) -> MoveList {
    let mut res = MoveList::new();
    piece_moves_into(b, src, &mut res);
    res
}
