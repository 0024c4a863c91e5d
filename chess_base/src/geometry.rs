use crate::types::Color;

/// Orthogonal ray directions as `(delta_row, delta_col)`
pub const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];

/// Diagonal ray directions as `(delta_row, delta_col)`
pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, -1),
    (2, 1),
    (1, -2),
    (1, 2),
    (-1, -2),
    (-1, 2),
    (-2, -1),
    (-2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
];

pub const fn back_row(c: Color) -> i8 {
    match c {
        Color::White => 1,
        Color::Black => 8,
    }
}

pub const fn pawn_start_row(c: Color) -> i8 {
    match c {
        Color::White => 2,
        Color::Black => 7,
    }
}

/// Row on which a pawn of color `c` promotes (the opponent's back row)
pub const fn promotion_row(c: Color) -> i8 {
    back_row(c.inv())
}

pub const fn pawn_forward_delta(c: Color) -> i8 {
    match c {
        Color::White => 1,
        Color::Black => -1,
    }
}
