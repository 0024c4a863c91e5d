//! Game state and move execution

use crate::attack;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry;
use crate::legal::Checker;
use crate::movegen::{self, MoveList};
use crate::moves::Move;
use crate::types::{Color, Outcome, Piece, PieceKind, Position};

use std::hash::{Hash, Hasher};

use log::{debug, trace, warn};
use thiserror::Error;

/// Reason why a move was rejected by [`Game::make_move()`]
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum IllegalMove {
    /// Start or end square of the move lies outside the board
    #[error("square {0:?} is out of bounds")]
    OutOfBounds(Position),
    /// There is no piece on the start square
    #[error("no piece on {0}")]
    NoPiece(Position),
    /// The moving piece belongs to the side which is not on turn
    #[error("cannot move {piece} on {turn:?}'s turn")]
    WrongTurn { piece: Piece, turn: Color },
    /// The move is not among the legal moves of the piece
    #[error("move {0} is not legal")]
    NotLegal(Move),
}

/// Chess game in progress
///
/// Holds the board, the side to move and the locations of both kings. The king locations are
/// kept in sync with the board by every method which changes it.
///
/// The game never decides by itself that it has ended. After each move, call
/// [`Game::in_checkmate()`], [`Game::in_stalemate()`] or [`Game::outcome()`] to find out.
///
/// # Example
///
/// ```
/// # use gambit::{Game, Move, Color};
/// # use std::str::FromStr;
/// #
/// let mut game = Game::new();
/// for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
///     game.make_move(Move::from_str(mv).unwrap()).unwrap();
/// }
/// assert!(game.in_checkmate(Color::White));
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    kings: [Option<Position>; 2],
}

fn find_kings(board: &Board) -> [Option<Position>; 2] {
    [Color::White, Color::Black].map(|c| board.find(Piece::new(c, PieceKind::King)))
}

impl Game {
    /// Creates a game in the standard initial position with white to move
    pub fn new() -> Game {
        Game {
            board: Board::initial(),
            turn: Color::White,
            kings: [Some(Position::new(1, 5)), Some(Position::new(8, 5))],
        }
    }

    /// Creates a game from an arbitrary board with `turn` to move
    pub fn from_board(board: Board, turn: Color) -> Game {
        let mut game = Game {
            board: Board::empty(),
            turn,
            kings: [None, None],
        };
        game.set_board(board);
        game
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Sets the side to move
    ///
    /// Used when the game is restored from the outside together with [`Game::set_board()`].
    #[inline]
    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    /// Replaces the board and locates both kings on it again
    ///
    /// If the board has no king of some color, that side is never considered in check and its
    /// moves are not restricted by king safety.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        self.kings = find_kings(&self.board);
        for c in [Color::White, Color::Black] {
            if self.kings[c.index()].is_none() {
                warn!("board {} has no {:?} king", self.board, c);
            }
        }
        debug!("board replaced with {}", self.board);
        self.verify_kings();
    }

    /// Returns the location of the king of color `c`, or `None` if it has no king
    #[inline]
    pub fn king_pos(&self, c: Color) -> Option<Position> {
        self.kings[c.index()]
    }

    /// Returns legal moves of the piece on `pos`
    ///
    /// The moves are legal regardless of whose turn it is. Returns an empty list if the square is
    /// empty or out of bounds.
    pub fn legal_moves(&self, pos: Position) -> MoveList {
        let piece = match self.board.get(pos) {
            Some(p) => p,
            None => return MoveList::new(),
        };
        let mut moves = movegen::piece_moves(&self.board, pos);
        Checker::new(&self.board, self.king_pos(piece.color)).filter(&mut moves);
        moves
    }

    /// Returns the squares to which the piece on `pos` can legally move
    pub fn legal_destinations(&self, pos: Position) -> Bitboard {
        self.legal_moves(pos).iter().map(Move::end).collect()
    }

    /// Returns all the legal moves of the pieces of color `c`
    pub fn all_legal_moves(&self, c: Color) -> Vec<Move> {
        let mut res = Vec::new();
        for (pos, piece) in self.board.pieces() {
            if piece.color == c {
                res.extend(self.legal_moves(pos));
            }
        }
        res
    }

    /// Returns `true` if some piece of color `c` has at least one legal move
    pub fn has_legal_moves(&self, c: Color) -> bool {
        self.board
            .pieces()
            .any(|(pos, piece)| piece.color == c && !self.legal_moves(pos).is_empty())
    }

    /// Validates and applies the move `mv`, then passes the turn to the opponent
    ///
    /// A pawn reaching the last row is replaced with the piece given by [`Move::promotion()`].
    /// If the move carries no promotion kind there, it doesn't match any legal move and is
    /// rejected.
    ///
    /// On error, the game is left unchanged.
    pub fn make_move(&mut self, mv: Move) -> Result<(), IllegalMove> {
        if let Err(e) = self.validate(mv) {
            trace!("rejected move {}: {}", mv, e);
            return Err(e);
        }

        let mut piece = match self.board.remove(mv.start()) {
            Some(p) => p,
            None => return Err(IllegalMove::NoPiece(mv.start())),
        };
        if let Some(captured) = self.board.get(mv.end()) {
            if captured.kind == PieceKind::King {
                self.kings[captured.color.index()] = None;
            }
        }
        if piece.kind == PieceKind::King {
            self.kings[piece.color.index()] = Some(mv.end());
        }
        let last_row = geometry::promotion_row(piece.color);
        if piece.kind == PieceKind::Pawn && mv.end().row() == last_row {
            if let Some(kind) = mv.promotion() {
                debug!("{:?} pawn promotes to {:?} on {}", piece.color, kind, mv.end());
                piece = Piece::new(piece.color, kind);
            }
        }
        self.board.place(mv.end(), piece);
        debug!("{:?} plays {}", self.turn, mv);
        self.turn = self.turn.inv();
        self.verify_kings();
        Ok(())
    }

    fn validate(&self, mv: Move) -> Result<(), IllegalMove> {
        for pos in [mv.start(), mv.end()] {
            if !pos.is_in_bounds() {
                return Err(IllegalMove::OutOfBounds(pos));
            }
        }
        let piece = self
            .board
            .get(mv.start())
            .ok_or(IllegalMove::NoPiece(mv.start()))?;
        if piece.color != self.turn {
            return Err(IllegalMove::WrongTurn {
                piece,
                turn: self.turn,
            });
        }
        if !self.legal_moves(mv.start()).contains(&mv) {
            return Err(IllegalMove::NotLegal(mv));
        }
        Ok(())
    }

    /// Returns `true` if the king of color `c` is attacked
    ///
    /// A side without a king is never in check.
    pub fn in_check(&self, c: Color) -> bool {
        self.king_pos(c)
            .map_or(false, |king| attack::in_danger(&self.board, king))
    }

    /// Returns the squares of the pieces which attack the king of color `c`
    pub fn checkers(&self, c: Color) -> Bitboard {
        self.king_pos(c).map_or(Bitboard::EMPTY, |king| {
            attack::attackers(&self.board, king, c.inv())
        })
    }

    /// Returns `true` if color `c` is in check and has no legal moves
    pub fn in_checkmate(&self, c: Color) -> bool {
        self.in_check(c) && !self.has_legal_moves(c)
    }

    /// Returns `true` if color `c` is not in check but has no legal moves
    ///
    /// This is meaningful only for the side to move, but any color may be queried.
    pub fn in_stalemate(&self, c: Color) -> bool {
        !self.in_check(c) && !self.has_legal_moves(c)
    }

    /// Reports whether the side to move is checkmated or stalemated
    ///
    /// Returns `None` while the game goes on.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.has_legal_moves(self.turn) {
            return None;
        }
        if self.in_check(self.turn) {
            Some(Outcome::Checkmate {
                winner: self.turn.inv(),
            })
        } else {
            Some(Outcome::Stalemate)
        }
    }

    #[cfg(feature = "selftest")]
    fn verify_kings(&self) {
        let actual = find_kings(&self.board);
        if actual != self.kings {
            log::error!(
                "king cache {:?} doesn't match board {} (kings on {:?})",
                self.kings,
                self.board,
                actual
            );
            panic!("king cache is out of sync with the board");
        }
    }

    #[cfg(not(feature = "selftest"))]
    #[inline]
    fn verify_kings(&self) {}
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl PartialEq for Game {
    fn eq(&self, other: &Game) -> bool {
        self.board == other.board && self.turn == other.turn
    }
}

impl Eq for Game {}

impl Hash for Game {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
        self.turn.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::str::FromStr;

    fn pos(s: &str) -> Position {
        Position::from_str(s).unwrap()
    }

    fn mv(s: &str) -> Move {
        Move::from_str(s).unwrap()
    }

    fn game(fen: &str, turn: Color) -> Game {
        Game::from_board(Board::from_fen(fen).unwrap(), turn)
    }

    fn strs(moves: &MoveList) -> BTreeSet<String> {
        moves.iter().map(ToString::to_string).collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_initial() {
        let g = Game::new();
        assert_eq!(g.turn(), Color::White);
        assert_eq!(g.king_pos(Color::White), Some(pos("e1")));
        assert_eq!(g.king_pos(Color::Black), Some(pos("e8")));
        assert_eq!(g.all_legal_moves(Color::White).len(), 20);
        assert_eq!(g.all_legal_moves(Color::Black).len(), 20);
        assert!(!g.in_check(Color::White));
        assert_eq!(g.outcome(), None);
        assert_eq!(g, Game::default());
    }

    #[test]
    fn test_turn_alternation() {
        let mut g = Game::new();
        g.make_move(mv("e2e4")).unwrap();
        assert_eq!(g.turn(), Color::Black);
        assert_eq!(
            g.make_move(mv("d2d4")),
            Err(IllegalMove::WrongTurn {
                piece: Piece::new(Color::White, PieceKind::Pawn),
                turn: Color::Black,
            })
        );
        g.make_move(mv("e7e5")).unwrap();
        assert_eq!(g.turn(), Color::White);
        assert_eq!(
            g.board().get(pos("e4")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert!(!g.board().has_piece(pos("e2")));
    }

    #[test]
    fn test_rejections() {
        let mut g = Game::new();
        let before = g.clone();
        assert_eq!(
            g.make_move(Move::new(Position::new(0, 5), pos("e4"))),
            Err(IllegalMove::OutOfBounds(Position::new(0, 5)))
        );
        assert_eq!(
            g.make_move(Move::new(pos("e2"), Position::new(2, 9))),
            Err(IllegalMove::OutOfBounds(Position::new(2, 9)))
        );
        assert_eq!(
            g.make_move(mv("e4e5")),
            Err(IllegalMove::NoPiece(pos("e4")))
        );
        assert_eq!(
            g.make_move(mv("e2e5")),
            Err(IllegalMove::NotLegal(mv("e2e5")))
        );
        assert_eq!(
            g.make_move(mv("d1d3")),
            Err(IllegalMove::NotLegal(mv("d1d3")))
        );
        assert_eq!(g, before);
        assert_eq!(g.king_pos(Color::White), before.king_pos(Color::White));
    }

    #[test]
    fn test_back_rank_mate() {
        let g = game("k6R/pp6/8/8/8/8/8/7K", Color::Black);
        assert!(g.in_check(Color::Black));
        assert!(g.in_checkmate(Color::Black));
        assert!(!g.in_stalemate(Color::Black));
        for (p, piece) in g.board().pieces() {
            if piece.color == Color::Black {
                assert!(g.legal_moves(p).is_empty());
            }
        }
        assert_eq!(g.checkers(Color::Black), Bitboard::from_position(pos("h8")));
        assert_eq!(
            g.outcome(),
            Some(Outcome::Checkmate {
                winner: Color::White
            })
        );
    }

    #[test]
    fn test_stalemate() {
        let g = game("k7/2Q5/8/8/8/8/8/7K", Color::Black);
        assert!(!g.in_check(Color::Black));
        assert!(g.in_stalemate(Color::Black));
        assert!(!g.in_checkmate(Color::Black));
        assert!(!g.in_stalemate(Color::White));
        assert_eq!(g.outcome(), Some(Outcome::Stalemate));
    }

    #[test]
    fn test_check_escape() {
        let g = game("4k3/8/8/8/8/8/8/R3K3", Color::Black);
        assert!(!g.in_check(Color::Black));

        let g = game("4k3/8/8/8/8/8/8/4RK2", Color::Black);
        assert!(g.in_check(Color::Black));
        assert!(!g.in_checkmate(Color::Black));
        assert_eq!(
            strs(&g.legal_moves(pos("e8"))),
            set(&["e8d7", "e8d8", "e8f7", "e8f8"])
        );
    }

    #[test]
    fn test_pinned_piece() {
        let g = game("4k3/4r3/8/8/8/8/4B3/4K3", Color::White);
        assert!(g.legal_moves(pos("e2")).is_empty());
        assert!(g.legal_destinations(pos("e1")).has(pos("d1")));
        assert!(!g.legal_destinations(pos("e1")).has(pos("e2")));
    }

    #[test]
    fn test_legal_moves_pure() {
        let g = game("4k3/4r3/8/8/8/8/4B3/4K3", Color::White);
        let before = g.board().clone();
        for p in Position::iter() {
            g.legal_moves(p);
        }
        assert_eq!(g.board(), &before);
        assert!(g.legal_moves(pos("a1")).is_empty());
        assert!(g.legal_moves(Position::new(9, 9)).is_empty());
    }

    #[test]
    fn test_promotion() {
        let mut g = game("4k3/1P6/8/8/8/8/8/4K3", Color::White);
        let moves = g.legal_moves(pos("b7"));
        assert_eq!(
            strs(&moves),
            set(&["b7b8q", "b7b8r", "b7b8b", "b7b8n"])
        );
        assert_eq!(
            g.make_move(mv("b7b8")),
            Err(IllegalMove::NotLegal(mv("b7b8")))
        );
        g.make_move(mv("b7b8n")).unwrap();
        assert_eq!(
            g.board().get(pos("b8")),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
        assert!(!g.board().has_piece(pos("b7")));
        assert_eq!(g.turn(), Color::Black);
    }

    #[test]
    fn test_promotion_gives_check() {
        let mut g = game("8/P3k3/8/8/8/8/8/K7", Color::White);
        g.make_move(mv("a7a8q")).unwrap();
        assert!(!g.in_check(Color::Black));
        let mut g = game("8/P6k/8/8/8/8/8/K7", Color::White);
        g.make_move(mv("a7a8r")).unwrap();
        assert!(!g.in_check(Color::Black));
        let mut g = game("7k/P7/8/8/8/8/8/K7", Color::White);
        g.make_move(mv("a7a8q")).unwrap();
        assert!(g.in_check(Color::Black));
        assert_eq!(g.checkers(Color::Black), Bitboard::from_position(pos("a8")));
    }

    #[test]
    fn test_king_cache() {
        let mut g = Game::new();
        for m in ["e2e4", "e7e5", "e1e2", "e8e7"] {
            g.make_move(mv(m)).unwrap();
        }
        assert_eq!(g.king_pos(Color::White), Some(pos("e2")));
        assert_eq!(g.king_pos(Color::Black), Some(pos("e7")));

        g.set_board(Board::from_fen("8/8/3k4/8/8/8/8/6K1").unwrap());
        assert_eq!(g.king_pos(Color::White), Some(pos("g1")));
        assert_eq!(g.king_pos(Color::Black), Some(pos("d6")));
    }

    #[test]
    fn test_missing_king() {
        let mut g = game("8/8/8/8/8/8/r7/R7", Color::White);
        assert_eq!(g.king_pos(Color::White), None);
        assert!(!g.in_check(Color::White));
        assert!(!g.in_checkmate(Color::White));
        assert_eq!(g.checkers(Color::White), Bitboard::EMPTY);
        assert_eq!(g.legal_moves(pos("a1")).len(), 8);
        g.make_move(mv("a1a2")).unwrap();
        assert_eq!(g.turn(), Color::Black);
    }

    #[test]
    fn test_fools_mate() {
        let mut g = Game::new();
        for m in ["f2f3", "e7e5", "g2g4"] {
            g.make_move(mv(m)).unwrap();
            assert_eq!(g.outcome(), None);
        }
        g.make_move(mv("d8h4")).unwrap();
        assert_eq!(g.turn(), Color::White);
        assert!(g.in_checkmate(Color::White));
        assert_eq!(
            g.outcome(),
            Some(Outcome::Checkmate {
                winner: Color::Black
            })
        );
        assert_eq!(g.checkers(Color::White), Bitboard::from_position(pos("h4")));
    }

    #[test]
    fn test_equality() {
        let mut a = Game::new();
        let b = Game::from_board(Board::initial(), Color::White);
        assert_eq!(a, b);
        a.set_turn(Color::Black);
        assert_ne!(a, b);
    }
}
