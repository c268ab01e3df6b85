//! One game from the duration prompt to the final exit.
//!
//! [`GameSession`] owns every piece of mutable game state. It performs no I/O: input comes in
//! through [`GameSession::click`], [`GameSession::tick`] and the prompt methods, and side effects
//! go out as [`SessionEvent`]s for the app to play, speak or act on.

use std::time::Duration;

use cozy_chess::{Color, Square};
use serde::Serialize;

use crate::ai::{self, AiOutcome, AiReport, TAUNT_LINE};
use crate::board::{BoardState, Outcome};
use crate::dice::Dice;
use crate::effects::{ActiveEffect, EffectKind, EffectScript, Visual};
use crate::prompt::DurationPrompt;
use crate::round_timer::RoundTimer;
use crate::sfx::Cue;
use crate::variant::{AI_THINK_TIME, Variant};

pub const PLAYER_COLOR: Color = Color::White;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Cue(Cue),
    Say(String),
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    AwaitingDuration(DurationPrompt),
    Playing,
    GameOver(Outcome),
    TimeExpired,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingDuration(_) => "awaiting_duration",
            Phase::Playing => "playing",
            Phase::GameOver(_) => "game_over",
            Phase::TimeExpired => "time_expired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Player,
    /// The AI moves once `waited` reaches [`AI_THINK_TIME`].
    Ai { waited: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub variant: Variant,
    pub phase: &'static str,
    pub fen: String,
    pub moves: Vec<String>,
    pub remaining_ms: Option<u64>,
    pub effect: Option<EffectKind>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    variant: Variant,
    board: BoardState,
    phase: Phase,
    turn: Turn,
    selected: Option<Square>,
    timer: Option<RoundTimer>,
    effect: Option<ActiveEffect>,
}

impl GameSession {
    /// A session waiting for the player to type the game length.
    pub fn new(variant: Variant) -> Self {
        Self::with_board(variant, BoardState::new())
    }

    /// A session that skips the prompt and starts the clock right away.
    pub fn with_duration(variant: Variant, limit: Duration) -> Self {
        let mut session = Self::new(variant);
        session.start(limit);
        session
    }

    pub fn with_board(variant: Variant, board: BoardState) -> Self {
        Self {
            variant,
            board,
            phase: Phase::AwaitingDuration(DurationPrompt::new()),
            turn: Turn::Player,
            selected: None,
            timer: None,
            effect: None,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn timer(&self) -> Option<&RoundTimer> {
        self.timer.as_ref()
    }

    pub fn effect_kind(&self) -> Option<EffectKind> {
        self.effect.as_ref().map(ActiveEffect::kind)
    }

    pub fn prompt(&self) -> Option<&DurationPrompt> {
        match &self.phase {
            Phase::AwaitingDuration(prompt) => Some(prompt),
            _ => None,
        }
    }

    /// What the board area should show this frame.
    pub fn visual(&self) -> &Visual {
        match &self.effect {
            Some(effect) => effect.visual(),
            None => &Visual::Board,
        }
    }

    pub fn type_char(&mut self, ch: char) {
        if let Phase::AwaitingDuration(prompt) = &mut self.phase {
            prompt.push_char(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Phase::AwaitingDuration(prompt) = &mut self.phase {
            prompt.backspace();
        }
    }

    /// Ends the prompt and starts the clock. `None` if the prompt is not showing.
    pub fn submit_duration(&mut self) -> Option<Duration> {
        let Phase::AwaitingDuration(prompt) = &self.phase else {
            return None;
        };
        let limit = prompt.submit();
        self.start(limit);
        Some(limit)
    }

    fn start(&mut self, limit: Duration) {
        tracing::info!(
            variant = self.variant.name(),
            seconds = limit.as_secs(),
            "game started"
        );
        self.timer = Some(RoundTimer::new(limit));
        self.phase = Phase::Playing;
        self.turn = self.turn_for_side_to_move();
    }

    /// Handles a left click on `square`.
    pub fn click(&mut self, square: Square, dice: &mut dyn Dice) -> Vec<SessionEvent> {
        if self.phase != Phase::Playing || self.turn != Turn::Player || self.effect.is_some() {
            return Vec::new();
        }

        let Some(from) = self.selected.take() else {
            if matches!(self.board.piece_at(square), Some((color, _)) if color == PLAYER_COLOR) {
                self.selected = Some(square);
            }
            return Vec::new();
        };

        let played = self
            .board
            .find_move(from, square)
            .and_then(|mv| self.board.push(mv).ok().map(|()| mv));
        match played {
            Some(mv) => {
                tracing::info!(mv = %mv, "player moved");
                self.turn = self.turn_for_side_to_move();
                self.check_game_over();
                if dice.one_in(self.variant.after_move_effect_odds()) {
                    let script = match self.variant {
                        Variant::Classic => EffectScript::jumpscare(),
                        Variant::Cursed => EffectScript::glitch(dice),
                    };
                    return self.start_effect(script);
                }
                Vec::new()
            }
            None => {
                tracing::debug!(from = %from, to = %square, "rejected move attempt");
                match self.variant.invalid_move_crash_odds() {
                    Some(odds) if dice.one_in(odds) => {
                        self.start_effect(EffectScript::fake_crash(dice))
                    }
                    _ => Vec::new(),
                }
            }
        }
    }

    /// Advances the clock, any running effect and the AI by one frame.
    pub fn tick(&mut self, dt: Duration, dice: &mut dyn Dice) -> Vec<SessionEvent> {
        let Some(timer) = self.timer.as_mut() else {
            return Vec::new();
        };
        timer.tick(dt);
        let time_up = timer.is_up();

        if let Some(effect) = self.effect.as_mut() {
            let events = effect.advance(dt);
            if effect.is_finished() {
                self.effect = None;
            }
            return events;
        }

        match self.phase {
            Phase::TimeExpired | Phase::AwaitingDuration(_) => return Vec::new(),
            Phase::Playing | Phase::GameOver(_) if time_up => {
                tracing::info!("time is up");
                self.phase = Phase::TimeExpired;
                self.selected = None;
                return self.start_effect(EffectScript::time_up(self.variant, dice));
            }
            Phase::GameOver(_) => return Vec::new(),
            Phase::Playing => {}
        }

        let Turn::Ai { waited } = self.turn else {
            return Vec::new();
        };
        let waited = waited + dt;
        if waited < AI_THINK_TIME {
            self.turn = Turn::Ai { waited };
            return Vec::new();
        }

        let outcome = ai::take_turn(self.variant, &mut self.board, dice);
        tracing::debug!(report = ?AiReport::new(&outcome, &self.board), "ai decision");
        self.turn = self.turn_for_side_to_move();
        self.check_game_over();

        match outcome {
            AiOutcome::Moved { taunt: true, .. } => {
                vec![
                    SessionEvent::Cue(Cue::Laugh),
                    SessionEvent::Say(TAUNT_LINE.to_string()),
                ]
            }
            AiOutcome::Cheated(_) => self.start_effect(EffectScript::cheat_taunt()),
            AiOutcome::Moved { .. } | AiOutcome::Idle | AiOutcome::Stuck => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            variant: self.variant,
            phase: self.phase.name(),
            fen: self.board.fen(),
            moves: self.board.uci_history(),
            remaining_ms: self
                .timer
                .map(|t| u64::try_from(t.remaining().as_millis()).unwrap_or(u64::MAX)),
            effect: self.effect_kind(),
        }
    }

    fn start_effect(&mut self, script: EffectScript) -> Vec<SessionEvent> {
        let mut effect = ActiveEffect::new(script);
        let events = effect.begin();
        if !effect.is_finished() {
            self.effect = Some(effect);
        }
        events
    }

    fn turn_for_side_to_move(&self) -> Turn {
        if self.board.side_to_move() == PLAYER_COLOR {
            Turn::Player
        } else {
            Turn::Ai {
                waited: Duration::ZERO,
            }
        }
    }

    fn check_game_over(&mut self) {
        if !self.variant.respects_game_over() || self.phase != Phase::Playing {
            return;
        }
        if let Some(outcome) = self.board.outcome() {
            tracing::info!(?outcome, "game over");
            self.phase = Phase::GameOver(outcome);
        }
    }
}
