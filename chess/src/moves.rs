//! Moves and utilities to work with them

use crate::types::{PieceKind, Position, PositionParseError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing a move in coordinate notation
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad start square
    #[error("bad start: {0}")]
    BadStart(PositionParseError),
    /// Bad end square
    #[error("bad end: {0}")]
    BadEnd(PositionParseError),
    /// Bad promotion character
    #[error("bad promotion char {0:?}")]
    BadPromotion(char),
}

/// Chess move
///
/// A move is a plain description of what the player wants to do: it is not bound to any board
/// and is not validated on creation. Use [`Game::legal_moves()`](crate::Game::legal_moves) to
/// obtain the moves which are legal in the current position.
///
/// Two moves are equal only if their start, end and promotion kind are all equal. So, a
/// promotion to a queen and a promotion to a knight on the same squares are distinct moves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    start: Position,
    end: Position,
    promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a move without promotion
    #[inline]
    pub const fn new(start: Position, end: Position) -> Move {
        Move {
            start,
            end,
            promotion: None,
        }
    }

    /// Creates a pawn move which promotes to `kind`
    #[inline]
    pub const fn with_promotion(start: Position, end: Position, kind: PieceKind) -> Move {
        Move {
            start,
            end,
            promotion: Some(kind),
        }
    }

    #[inline]
    pub const fn start(&self) -> Position {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> Position {
        self.end
    }

    /// Returns the kind of piece to promote a pawn to, if this move is a promotion
    #[inline]
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns `true` if both endpoints of the move lie on the board
    #[inline]
    pub const fn is_in_bounds(&self) -> bool {
        self.start.is_in_bounds() && self.end.is_in_bounds()
    }

    /// Parses a move in coordinate notation, like `"e2e4"` or `"e7e8q"`
    ///
    /// Does the same as [`Move::from_str`].
    pub fn from_coords(s: &str) -> Result<Move, MoveParseError> {
        Move::from_str(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if !matches!(s.len(), 4 | 5) || !s.is_ascii() {
            return Err(MoveParseError::BadLength);
        }
        let start = Position::from_str(&s[0..2]).map_err(MoveParseError::BadStart)?;
        let end = Position::from_str(&s[2..4]).map_err(MoveParseError::BadEnd)?;
        let promotion = match s.as_bytes().get(4) {
            Some(&b) => match b {
                b'q' => Some(PieceKind::Queen),
                b'r' => Some(PieceKind::Rook),
                b'b' => Some(PieceKind::Bishop),
                b'n' => Some(PieceKind::Knight),
                _ => return Err(MoveParseError::BadPromotion(b as char)),
            },
            None => None,
        };
        Ok(Move {
            start,
            end,
            promotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality() {
        let start = Position::new(7, 1);
        let end = Position::new(8, 1);
        assert_eq!(Move::new(start, end), Move::new(start, end));
        assert_ne!(
            Move::with_promotion(start, end, PieceKind::Queen),
            Move::with_promotion(start, end, PieceKind::Knight)
        );
        assert_ne!(
            Move::with_promotion(start, end, PieceKind::Queen),
            Move::new(start, end)
        );
    }

    #[test]
    fn test_str() {
        let mv = Move::from_coords("e2e4").unwrap();
        assert_eq!(mv, Move::new(Position::new(2, 5), Position::new(4, 5)));
        assert_eq!(mv.to_string(), "e2e4");

        let mv = Move::from_coords("b7a8n").unwrap();
        assert_eq!(
            mv,
            Move::with_promotion(Position::new(7, 2), Position::new(8, 1), PieceKind::Knight)
        );
        assert_eq!(mv.to_string(), "b7a8n");
    }

    #[test]
    fn test_bad_str() {
        assert_eq!(Move::from_coords("e2e"), Err(MoveParseError::BadLength));
        assert_eq!(Move::from_coords("e2e4qq"), Err(MoveParseError::BadLength));
        assert_eq!(
            Move::from_coords("e9e4"),
            Err(MoveParseError::BadStart(
                PositionParseError::UnexpectedRowChar('9')
            ))
        );
        assert_eq!(
            Move::from_coords("e2z4"),
            Err(MoveParseError::BadEnd(
                PositionParseError::UnexpectedFileChar('z')
            ))
        );
        assert_eq!(
            Move::from_coords("e7e8k"),
            Err(MoveParseError::BadPromotion('k'))
        );
    }
}
