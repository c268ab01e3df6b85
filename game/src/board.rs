//! The chess position plus an undo stack.
//!
//! Rules (legality, check, castling, en passant) all come from `cozy-chess`; this type only adds
//! the move history the game needs for undo and for resolving clicks into moves.

use cozy_chess::{Board, Color, File, GameStatus, Move, Piece, Square};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("illegal move {0}")]
    IllegalMove(Move),
    #[error("no move to undo")]
    EmptyHistory,
    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Draw,
}

#[derive(Debug, Clone)]
struct Ply {
    before: Board,
    mv: Move,
}

#[derive(Debug, Clone)]
pub struct BoardState {
    board: Board,
    history: Vec<Ply>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            board: Board::default(),
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let board = Board::from_fen(fen, false).map_err(|err| BoardError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{err:?}"),
        })?;
        Ok(Self {
            board,
            history: Vec::new(),
        })
    }

    pub fn position(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// Applies `mv` and records it for undo. The board is untouched if `mv` is not legal.
    pub fn push(&mut self, mv: Move) -> Result<(), BoardError> {
        if !self.is_legal(mv) {
            return Err(BoardError::IllegalMove(mv));
        }
        let before = self.board.clone();
        self.board.play_unchecked(mv);
        self.history.push(Ply { before, mv });
        Ok(())
    }

    /// Restores the position from before the last move and returns that move.
    pub fn pop(&mut self) -> Result<Move, BoardError> {
        let ply = self.history.pop().ok_or(BoardError::EmptyHistory)?;
        self.board = ply.before;
        Ok(ply.mv)
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, Piece)> {
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some((color, piece))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.board.status() {
            GameStatus::Ongoing => None,
            GameStatus::Drawn => Some(Outcome::Draw),
            // The side to move has been mated.
            GameStatus::Won => Some(Outcome::Checkmate {
                winner: opponent(self.board.side_to_move()),
            }),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|ply| ply.mv)
    }

    /// Moves played so far in UCI notation, castling written as the king's two-square step.
    pub fn uci_history(&self) -> Vec<String> {
        self.history
            .iter()
            .map(|ply| uci_notation(&ply.before, ply.mv))
            .collect()
    }

    /// The last move in the same notation as [`BoardState::uci_history`].
    pub fn last_move_uci(&self) -> Option<String> {
        self.history
            .last()
            .map(|ply| uci_notation(&ply.before, ply.mv))
    }

    /// `mv` written as if played from the current position.
    pub fn move_uci(&self, mv: Move) -> String {
        uci_notation(&self.board, mv)
    }

    /// Resolves a from/to click pair into a legal move.
    ///
    /// Castling accepts both the king's destination square and the rook's square. Promotions
    /// always pick a queen.
    pub fn find_move(&self, from: Square, to: Square) -> Option<Move> {
        self.legal_moves().into_iter().find(|mv| {
            if mv.from != from {
                return false;
            }
            if mv.promotion.is_some_and(|p| p != Piece::Queen) {
                return false;
            }
            mv.to == to || castling_king_target(&self.board, *mv) == Some(to)
        })
    }
}

pub fn opponent(color: Color) -> Color {
    match color {
        Color::White => Color::Black,
        Color::Black => Color::White,
    }
}

fn uci_notation(before: &Board, mv: Move) -> String {
    let to = castling_king_target(before, mv).unwrap_or(mv.to);
    Move { to, ..mv }.to_string()
}

/// For a castling move (encoded king-takes-own-rook), the square the king lands on.
fn castling_king_target(board: &Board, mv: Move) -> Option<Square> {
    if board.piece_on(mv.from) != Some(Piece::King) {
        return None;
    }
    if board.color_on(mv.to) != board.color_on(mv.from) {
        return None;
    }
    let file = if mv.to.file() as usize > mv.from.file() as usize {
        File::G
    } else {
        File::C
    };
    Some(Square::new(file, mv.from.rank()))
}
