//! The opponent. It never searches: every move is a uniform pick from the legal moves.

use cozy_chess::Move;
use serde::Serialize;

use crate::board::BoardState;
use crate::dice::Dice;
use crate::variant::Variant;

pub const TAUNT_LINE: &str = "You can't win.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cheat {
    /// Played a random legal move anyway.
    ExtraMove(Move),
    /// Took back the last move on the board.
    Undo(Move),
    /// Nothing to play and nothing to take back.
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiOutcome {
    /// The game is over and the AI does not move.
    Idle,
    Moved { mv: Move, taunt: bool },
    Cheated(Cheat),
    /// No legal move on an honest turn; the AI keeps the turn and tries again.
    Stuck,
}

impl AiOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            AiOutcome::Idle => "idle",
            AiOutcome::Moved { .. } => "moved",
            AiOutcome::Cheated(_) => "cheated",
            AiOutcome::Stuck => "stuck",
        }
    }
}

/// Loggable form of an [`AiOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiReport {
    pub outcome: &'static str,
    pub uci: Option<String>,
}

impl AiReport {
    /// Builds the report from the board as the AI left it. Castling reads as the king's step,
    /// matching [`BoardState::uci_history`].
    pub fn new(outcome: &AiOutcome, board: &BoardState) -> Self {
        let uci = match outcome {
            AiOutcome::Moved { .. } | AiOutcome::Cheated(Cheat::ExtraMove(_)) => {
                board.last_move_uci()
            }
            AiOutcome::Cheated(Cheat::Undo(mv)) => Some(board.move_uci(*mv)),
            AiOutcome::Cheated(Cheat::Nothing) | AiOutcome::Idle | AiOutcome::Stuck => None,
        };
        Self {
            outcome: outcome.label(),
            uci,
        }
    }
}

pub fn take_turn(variant: Variant, board: &mut BoardState, dice: &mut dyn Dice) -> AiOutcome {
    let outcome = match variant {
        Variant::Classic => classic_turn(board, dice),
        Variant::Cursed => cursed_turn(board, dice),
    };
    tracing::info!(
        variant = variant.name(),
        outcome = outcome.label(),
        fen = %board.fen(),
        "ai turn"
    );
    outcome
}

/// Honest random move, with an occasional taunt afterwards.
pub fn classic_turn(board: &mut BoardState, dice: &mut dyn Dice) -> AiOutcome {
    if board.is_game_over() {
        return AiOutcome::Idle;
    }
    let Some(mv) = play_random(board, dice) else {
        return AiOutcome::Stuck;
    };
    let taunt = dice.one_in(Variant::TAUNT_ODDS);
    AiOutcome::Moved { mv, taunt }
}

/// Rolls for a cheat first. A cheat with no legal moves takes back the last move instead.
pub fn cursed_turn(board: &mut BoardState, dice: &mut dyn Dice) -> AiOutcome {
    if dice.one_in(Variant::CHEAT_ODDS) {
        if let Some(mv) = play_random(board, dice) {
            return AiOutcome::Cheated(Cheat::ExtraMove(mv));
        }
        return match board.pop() {
            Ok(mv) => AiOutcome::Cheated(Cheat::Undo(mv)),
            Err(_) => AiOutcome::Cheated(Cheat::Nothing),
        };
    }
    match play_random(board, dice) {
        Some(mv) => AiOutcome::Moved { mv, taunt: false },
        None => AiOutcome::Stuck,
    }
}

fn play_random(board: &mut BoardState, dice: &mut dyn Dice) -> Option<Move> {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return None;
    }
    let mv = moves[dice.pick(moves.len())];
    match board.push(mv) {
        Ok(()) => Some(mv),
        Err(err) => {
            tracing::warn!("generated move rejected: {err}");
            None
        }
    }
}
