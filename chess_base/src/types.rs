use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PositionParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected row char {0:?}")]
    UnexpectedRowChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PieceParseError {
    #[error("unexpected piece char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unexpected color char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

/// Square on the board
///
/// Rows and columns are 1-indexed: row 1 is White's back rank, column 1 is the `a` file.
/// A position may lie outside the board; use [`Position::is_in_bounds()`] before treating it
/// as a square.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: i8,
    col: i8,
}

impl Position {
    pub const SIZE: i8 = 8;

    #[inline]
    pub const fn new(row: i8, col: i8) -> Position {
        Position { row, col }
    }

    #[inline]
    pub const fn row(&self) -> i8 {
        self.row
    }

    #[inline]
    pub const fn col(&self) -> i8 {
        self.col
    }

    #[inline]
    pub const fn is_in_bounds(&self) -> bool {
        self.row >= 1 && self.row <= Self::SIZE && self.col >= 1 && self.col <= Self::SIZE
    }

    /// Steps the position by the given deltas, without checking the bounds
    #[inline]
    pub const fn offset(self, delta_row: i8, delta_col: i8) -> Position {
        Position::new(
            self.row.saturating_add(delta_row),
            self.col.saturating_add(delta_col),
        )
    }

    /// Steps the position by the given deltas, returning `None` if the result is off the board
    #[inline]
    pub fn try_offset(self, delta_row: i8, delta_col: i8) -> Option<Position> {
        let res = self.offset(delta_row, delta_col);
        res.is_in_bounds().then_some(res)
    }

    /// Returns the index of the square, from 0 (`a1`) to 63 (`h8`)
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    #[inline]
    pub const fn index(&self) -> usize {
        assert!(self.is_in_bounds(), "position must be on the board");
        ((self.row - 1) as usize) * 8 + (self.col - 1) as usize
    }

    #[inline]
    pub const fn from_index(val: usize) -> Position {
        assert!(val < 64, "index must be between 0 and 63");
        Position::new((val / 8) as i8 + 1, (val % 8) as i8 + 1)
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_usize..64_usize).map(Position::from_index)
    }

    pub fn file_char(&self) -> Option<char> {
        match self.col {
            1..=8 => Some((b'a' + (self.col - 1) as u8) as char),
            _ => None,
        }
    }

    pub fn row_char(&self) -> Option<char> {
        match self.row {
            1..=8 => Some((b'0' + self.row as u8) as char),
            _ => None,
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.is_in_bounds() {
            return write!(f, "Position({})", self);
        }
        write!(f, "Position(?{}, {})", self.row, self.col)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match (self.file_char(), self.row_char()) {
            (Some(file), Some(row)) => write!(f, "{}{}", file, row),
            _ => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 || !s.is_ascii() {
            return Err(PositionParseError::BadLength);
        }
        let bytes = s.as_bytes();
        let (file_ch, row_ch) = (bytes[0] as char, bytes[1] as char);
        let col = match file_ch {
            'a'..='h' => (bytes[0] - b'a') as i8 + 1,
            _ => return Err(PositionParseError::UnexpectedFileChar(file_ch)),
        };
        let row = match row_ch {
            '1'..='8' => (bytes[1] - b'0') as i8,
            _ => return Err(PositionParseError::UnexpectedRowChar(row_ch)),
        };
        Ok(Position::new(row, col))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Color::from_char(ch).ok_or(ColorParseError::UnexpectedChar(ch)),
            _ => Err(ColorParseError::BadLength),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceKind {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Pawn = 5,
}

impl PieceKind {
    /// Kinds a pawn may promote to, in the order the move generator emits them
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    pub const fn is_sliding(&self) -> bool {
        matches!(*self, PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop)
    }

    /// Returns the lowercase letter of the kind
    pub fn as_char(&self) -> char {
        match *self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            'p' => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

/// Chess piece
///
/// Pieces have no identity beyond their color and kind, so two pieces of the same color and
/// kind are interchangeable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece { color, kind }
    }

    /// Returns the piece letter, uppercase for White and lowercase for Black
    pub fn as_char(&self) -> char {
        let c = self.kind.as_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn as_utf8_char(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, PieceKind::from_char(c)?))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Piece {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Piece::from_char(ch).ok_or(PieceParseError::UnexpectedChar(ch)),
            _ => Err(PieceParseError::BadLength),
        }
    }
}

/// Terminal state of the game, as seen by the side to move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Self::Checkmate { winner } => Some(winner),
            Self::Stalemate => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Self::Checkmate {
                winner: Color::White,
            } => write!(f, "White wins by checkmate"),
            Self::Checkmate {
                winner: Color::Black,
            } => write!(f, "Black wins by checkmate"),
            Self::Stalemate => write!(f, "draw by stalemate"),
        }
    }
}
