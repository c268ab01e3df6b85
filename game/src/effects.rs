//! Timed horror effects.
//!
//! An effect is a script of steps. Each step shows a [`Visual`] for a fixed hold time and may
//! fire a sound cue and a spoken line when it begins. Scripts advance on the frame clock, so the
//! window keeps handling events while a scare is on screen.

use std::time::Duration;

use serde::Serialize;

use crate::dice::Dice;
use crate::session::SessionEvent;
use crate::sfx::Cue;
use crate::variant::Variant;

pub const JUMPSCARE_HOLD: Duration = Duration::from_secs(1);
pub const GLITCH_FLASH: Duration = Duration::from_millis(100);
pub const GLITCH_FLASHES: usize = 3;
pub const FAKE_CRASH_HOLD: Duration = Duration::from_secs(3);
pub const CHEAT_CAPTION_HOLD: Duration = Duration::from_secs(1);
pub const TIME_UP_HOLD: Duration = Duration::from_secs(2);

pub const GLITCH_CAPTION: &str = "ERROR 666";
pub const CRASH_TITLE: &str = "FATAL ERROR";
pub const CHEAT_LINE: &str = "I make my own rules now.";
pub const TIME_UP_LINE: &str = "Your time is up...";
pub const CURSED_TIME_UP_LINE: &str = "Time's up. You belong to the board now.";

pub const CREEPY_LINES: [&str; 5] = [
    "I see you.",
    "There is no escape.",
    "Your king belongs to me.",
    "Did you really think you could win?",
    "The board remembers everything.",
];

/// What the window shows while a step is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visual {
    Board,
    RedScreen,
    BoardWithCaption(String),
    CrashScreen { title: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectStep {
    pub visual: Visual,
    pub hold: Duration,
    pub cue: Option<Cue>,
    pub line: Option<String>,
}

impl EffectStep {
    fn show(visual: Visual, hold: Duration) -> Self {
        Self {
            visual,
            hold,
            cue: None,
            line: None,
        }
    }

    fn with_cue(mut self, cue: Cue) -> Self {
        self.cue = Some(cue);
        self
    }

    fn with_line(mut self, line: &str) -> Self {
        self.line = Some(line.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Jumpscare,
    Glitch,
    FakeCrash,
    CheatTaunt,
    TimeUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectScript {
    pub kind: EffectKind,
    pub steps: Vec<EffectStep>,
    /// Whether the game exits once the last step's hold runs out.
    pub exits: bool,
}

impl EffectScript {
    pub fn jumpscare() -> Self {
        Self {
            kind: EffectKind::Jumpscare,
            steps: vec![EffectStep::show(Visual::RedScreen, JUMPSCARE_HOLD).with_cue(Cue::Scream)],
            exits: false,
        }
    }

    pub fn glitch(dice: &mut dyn Dice) -> Self {
        let ambience = Cue::AMBIENCE[dice.pick(Cue::AMBIENCE.len())];
        let mut steps = Vec::with_capacity(GLITCH_FLASHES * 2);
        for _ in 0..GLITCH_FLASHES {
            steps.push(EffectStep::show(Visual::RedScreen, GLITCH_FLASH));
            steps.push(EffectStep::show(
                Visual::BoardWithCaption(GLITCH_CAPTION.to_string()),
                GLITCH_FLASH,
            ));
        }
        steps[0].cue = Some(ambience);
        Self {
            kind: EffectKind::Glitch,
            steps,
            exits: false,
        }
    }

    pub fn fake_crash(dice: &mut dyn Dice) -> Self {
        let line = CREEPY_LINES[dice.pick(CREEPY_LINES.len())];
        let crash = Visual::CrashScreen {
            title: CRASH_TITLE.to_string(),
            message: line.to_string(),
        };
        Self {
            kind: EffectKind::FakeCrash,
            steps: vec![
                EffectStep::show(crash, FAKE_CRASH_HOLD)
                    .with_cue(Cue::Error)
                    .with_line(line),
            ],
            exits: true,
        }
    }

    pub fn cheat_taunt() -> Self {
        Self {
            kind: EffectKind::CheatTaunt,
            steps: vec![
                EffectStep::show(
                    Visual::BoardWithCaption(CHEAT_LINE.to_string()),
                    CHEAT_CAPTION_HOLD,
                )
                .with_cue(Cue::Laugh)
                .with_line(CHEAT_LINE),
            ],
            exits: false,
        }
    }

    pub fn time_up(variant: Variant, dice: &mut dyn Dice) -> Self {
        match variant {
            Variant::Classic => Self {
                kind: EffectKind::TimeUp,
                steps: vec![
                    EffectStep::show(
                        Visual::BoardWithCaption(TIME_UP_LINE.to_string()),
                        TIME_UP_HOLD,
                    )
                    .with_line(TIME_UP_LINE),
                ],
                exits: true,
            },
            Variant::Cursed => {
                let spoken = EffectStep::show(
                    Visual::BoardWithCaption(CURSED_TIME_UP_LINE.to_string()),
                    TIME_UP_HOLD,
                )
                .with_line(CURSED_TIME_UP_LINE);
                let mut script = Self::glitch(dice);
                script.steps.push(spoken);
                let mut script = script.then(Self::fake_crash(dice));
                script.kind = EffectKind::TimeUp;
                script
            }
        }
    }

    /// Appends `next` after this script. The result exits if `next` does.
    pub fn then(mut self, next: EffectScript) -> Self {
        self.steps.extend(next.steps);
        self.exits = next.exits;
        self
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.hold).sum()
    }
}

/// A script in progress.
#[derive(Debug, Clone)]
pub struct ActiveEffect {
    script: EffectScript,
    step: usize,
    in_step: Duration,
    finished: bool,
}

impl ActiveEffect {
    pub fn new(script: EffectScript) -> Self {
        Self {
            script,
            step: 0,
            in_step: Duration::ZERO,
            finished: false,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.script.kind
    }

    /// Signals for the first step. Call once when the effect starts.
    pub fn begin(&mut self) -> Vec<SessionEvent> {
        tracing::info!(kind = ?self.script.kind, "effect started");
        let mut out = Vec::new();
        if self.script.steps.is_empty() {
            self.finish(&mut out);
        } else {
            self.enter_step(&mut out);
        }
        out
    }

    pub fn advance(&mut self, dt: Duration) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        if self.finished {
            return out;
        }
        self.in_step += dt;
        while !self.finished && self.in_step >= self.script.steps[self.step].hold {
            self.in_step -= self.script.steps[self.step].hold;
            self.step += 1;
            if self.step >= self.script.steps.len() {
                self.finish(&mut out);
            } else {
                self.enter_step(&mut out);
            }
        }
        out
    }

    pub fn visual(&self) -> &Visual {
        if self.finished {
            return &Visual::Board;
        }
        &self.script.steps[self.step].visual
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn enter_step(&self, out: &mut Vec<SessionEvent>) {
        let step = &self.script.steps[self.step];
        if let Some(cue) = step.cue {
            out.push(SessionEvent::Cue(cue));
        }
        if let Some(line) = &step.line {
            out.push(SessionEvent::Say(line.clone()));
        }
    }

    fn finish(&mut self, out: &mut Vec<SessionEvent>) {
        self.finished = true;
        tracing::debug!(kind = ?self.script.kind, "effect finished");
        if self.script.exits {
            out.push(SessionEvent::Exit);
        }
    }
}
