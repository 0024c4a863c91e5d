use crate::types::Position;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt;

/// Set of squares on the board
///
/// Bit `i` corresponds to the square with [`Position::index()`] equal to `i`. Only in-bounds
/// positions can be stored.
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(u64::MAX);

    pub const fn from_raw(val: u64) -> Bitboard {
        Bitboard(val)
    }

    pub const fn from_position(pos: Position) -> Bitboard {
        Bitboard(1_u64 << pos.index())
    }

    pub const fn with(self, pos: Position) -> Bitboard {
        Bitboard(self.0 | (1_u64 << pos.index()))
    }

    pub const fn without(self, pos: Position) -> Bitboard {
        Bitboard(self.0 & !(1_u64 << pos.index()))
    }

    pub fn set(&mut self, pos: Position) {
        *self = self.with(pos);
    }

    pub fn unset(&mut self, pos: Position) {
        *self = self.without(pos);
    }

    /// Returns `true` if `pos` is in the set. Out-of-bounds positions are never in the set.
    pub const fn has(&self, pos: Position) -> bool {
        pos.is_in_bounds() && ((self.0 >> pos.index()) & 1) != 0
    }

    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }
}

impl From<Bitboard> for u64 {
    fn from(b: Bitboard) -> u64 {
        b.0
    }
}

impl From<u64> for Bitboard {
    fn from(u: u64) -> Bitboard {
        Bitboard(u)
    }
}

impl FromIterator<Position> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Bitboard {
        iter.into_iter().fold(Bitboard::EMPTY, Bitboard::with)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Bitboard({})", self)
    }
}

/// Formats the set row by row, from row 8 down to row 1, columns `a` to `h` left to right
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in (0..8).rev() {
            if row != 7 {
                write!(f, "/")?;
            }
            let bits = (self.0 >> (row * 8)) & 0xff;
            for col in 0..8 {
                write!(f, "{}", (bits >> col) & 1)?;
            }
        }
        Ok(())
    }
}

pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0.wrapping_sub(1_u64);
        Some(Position::from_index(bit as usize))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl IntoIterator for Bitboard {
    type Item = Position;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}
