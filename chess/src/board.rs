//! Board and related things

use crate::bitboard::Bitboard;
use crate::types::{Color, Piece, PieceKind, Position};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error parsing the piece placement part of FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum BoardParseError {
    /// Row is too large
    #[error("too many items in row {0}")]
    RowOverflow(i8),
    /// Row is too small
    #[error("not enough items in row {0}")]
    RowUnderflow(i8),
    /// Too many rows
    #[error("too many rows")]
    Overflow,
    /// Not enough rows
    #[error("not enough rows")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Chess board
///
/// The board is a plain 8×8 grid of optional pieces. It doesn't validate chess legality in any
/// way: pieces can be placed and removed arbitrarily, and the board doesn't know whose turn it is.
/// Rules are enforced one layer up, by [`Game`](crate::Game).
///
/// Cloning the board produces a fully independent copy, so a clone can be freely mutated to
/// simulate a move.
///
/// # Example
///
/// ```
/// # use gambit::{Board, Color, Piece, PieceKind, Position};
/// #
/// let mut board = Board::empty();
/// board.place(Position::new(2, 2), Piece::new(Color::White, PieceKind::King));
/// board.place(Position::new(5, 4), Piece::new(Color::Black, PieceKind::King));
/// assert_eq!(board.as_fen(), "8/8/8/3k4/8/8/1K6/8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Returns a board without any pieces
    #[inline]
    pub const fn empty() -> Board {
        Board { cells: [None; 64] }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        res.reset();
        res
    }

    /// Parses the piece placement part of FEN
    ///
    /// Does the same as [`Board::from_str`]. It is recommended to use this function instead of
    /// `from_str()` for better readability.
    #[inline]
    pub fn from_fen(fen: &str) -> Result<Board, BoardParseError> {
        Board::from_str(fen)
    }

    /// Puts the standard starting position on the board, discarding the previous contents
    ///
    /// White occupies rows 1 and 2, Black occupies rows 7 and 8, and rows 3 to 6 are empty.
    pub fn reset(&mut self) {
        self.cells = [None; 64];
        for (col, &kind) in (1..=8).zip(BACK_ROW.iter()) {
            self.place(Position::new(1, col), Piece::new(Color::White, kind));
            self.place(
                Position::new(2, col),
                Piece::new(Color::White, PieceKind::Pawn),
            );
            self.place(
                Position::new(7, col),
                Piece::new(Color::Black, PieceKind::Pawn),
            );
            self.place(Position::new(8, col), Piece::new(Color::Black, kind));
        }
    }

    /// Returns the piece on the square `pos`
    ///
    /// Returns `None` if the square is empty or if `pos` is out of bounds.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if !pos.is_in_bounds() {
            return None;
        }
        self.cells[pos.index()]
    }

    /// Returns `true` if there is a piece on the square `pos`
    ///
    /// This is defined for every position, and is `false` for out-of-bounds ones.
    #[inline]
    pub fn has_piece(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Returns `true` if there is a piece on the square `pos` whose color differs from `color`
    #[inline]
    pub fn has_rival(&self, pos: Position, color: Color) -> bool {
        matches!(self.get(pos), Some(p) if p.color != color)
    }

    /// Puts `piece` on the square `pos`, overwriting its previous contents
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    #[inline]
    pub fn place(&mut self, pos: Position, piece: Piece) {
        self.cells[pos.index()] = Some(piece);
    }

    /// Clears the square `pos` and returns the piece which was there
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    #[inline]
    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.cells[pos.index()].take()
    }

    /// Iterates over all the occupied squares, from `a1` to `h8` row by row
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|p| (Position::from_index(idx), p)))
    }

    /// Returns the first square holding `piece`, scanning from `a1` to `h8` row by row
    pub fn find(&self, piece: Piece) -> Option<Position> {
        self.pieces().find(|&(_, p)| p == piece).map(|(pos, _)| pos)
    }

    /// Returns the set of squares occupied by pieces of color `c`
    pub fn occupied(&self, c: Color) -> Bitboard {
        self.pieces()
            .filter(|&(_, p)| p.color == c)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use gambit::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }

    /// Converts the board into the piece placement part of FEN
    ///
    /// Does the same as `Board::to_string()`. It is recommended to use this function instead of
    /// `to_string()` for better readability.
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = BoardParseError;

        // FEN lists row 8 first
        let mut row = 8_i8;
        let mut col = 1_i8;
        let mut board = Board::empty();
        for b in s.bytes() {
            match b {
                b'1'..=b'8' => {
                    let add = (b - b'0') as i8;
                    if col + add > 9 {
                        return Err(Error::RowOverflow(row));
                    }
                    col += add;
                }
                b'/' => {
                    if col <= 8 {
                        return Err(Error::RowUnderflow(row));
                    }
                    row -= 1;
                    col = 1;
                    if row < 1 {
                        return Err(Error::Overflow);
                    }
                }
                _ => {
                    if col > 8 {
                        return Err(Error::RowOverflow(row));
                    }
                    let piece =
                        Piece::from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?;
                    board.place(Position::new(row, col), piece);
                    col += 1;
                }
            };
        }

        if col <= 8 {
            return Err(Error::RowUnderflow(row));
        }
        if row > 1 {
            return Err(Error::Underflow);
        }

        Ok(board)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in (1..=8).rev() {
            if row != 8 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for col in 1..=8 {
                let piece = match self.get(Position::new(row, col)) {
                    Some(piece) => piece,
                    None => {
                        empty += 1;
                        continue;
                    }
                };
                if empty != 0 {
                    write!(f, "{}", empty)?;
                    empty = 0;
                }
                write!(f, "{}", piece)?;
            }
            if empty != 0 {
                write!(f, "{}", empty)?;
            }
        }
        Ok(())
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const EMPTY: char = '.';

    fn piece(p: Piece) -> char;

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in (1..=8).rev() {
            write!(f, "{}{}", row, Self::VERT_FRAME)?;
            for col in 1..=8 {
                let c = b
                    .get(Position::new(row, col))
                    .map_or(Self::EMPTY, Self::piece);
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in 1..=8 {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, " {}", Self::VERT_FRAME)?;
        for file in 'a'..='h' {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';

    fn piece(p: Piece) -> char {
        p.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';

    fn piece(p: Piece) -> char {
        p.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}
