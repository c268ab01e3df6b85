use std::time::Duration;

use engine::app::{AppContext, GameApp, InputFrame};
use engine::graphics::Renderer2d;
use winit::event::VirtualKeyCode;

use crate::assets::{AssetError, AssetPolicy};
use crate::cli::Cli;
use crate::dice::{Dice, RngDice};
use crate::render::{self, SQUARE_PX, square_at};
use crate::session::{GameSession, SessionEvent};
use crate::sfx::{Sfx, SoundBank};
use crate::sprites::PieceSprites;
use crate::voice::{DEFAULT_VOICE_RATE, ProgramVoice, SilentVoice, Voice};

pub struct HauntedApp {
    cli: Cli,
    dice: Box<dyn Dice>,
    sprites: PieceSprites,
    sfx: Option<Sfx>,
    voice: Box<dyn Voice>,
}

impl HauntedApp {
    /// Loads assets for the chosen variant. Only a missing sound in a variant that requires
    /// sounds is an error.
    pub fn from_cli(cli: Cli) -> Result<Self, AssetError> {
        let variant = cli.variant;
        let policy = if variant.requires_sounds() {
            AssetPolicy::Strict
        } else {
            AssetPolicy::Lenient
        };
        let bank = SoundBank::load(&cli.assets_dir, variant.cues(), policy)?;
        let sprites = PieceSprites::load(&cli.assets_dir, SQUARE_PX);

        let sfx = if cli.mute {
            None
        } else {
            match Sfx::new(bank) {
                Ok(sfx) => Some(sfx),
                Err(err) => {
                    tracing::warn!("no audio output, playing silently: {err}");
                    None
                }
            }
        };
        let voice: Box<dyn Voice> = if cli.mute {
            Box::new(SilentVoice)
        } else {
            Box::new(ProgramVoice::new(cli.voice_program.clone(), DEFAULT_VOICE_RATE))
        };

        Ok(Self {
            dice: Box::new(RngDice::from_seed(cli.seed)),
            cli,
            sprites,
            sfx,
            voice,
        })
    }
}

/// Feeds one frame of raw input into the session.
pub fn apply_input(
    session: &mut GameSession,
    input: &InputFrame,
    dice: &mut dyn Dice,
) -> Vec<SessionEvent> {
    if session.prompt().is_some() {
        for &ch in &input.typed {
            session.type_char(ch);
        }
        if input.key_pressed(VirtualKeyCode::Back) {
            session.backspace();
        }
        if input.key_pressed(VirtualKeyCode::Return)
            || input.key_pressed(VirtualKeyCode::NumpadEnter)
        {
            session.submit_duration();
        }
        return Vec::new();
    }

    let mut events = Vec::new();
    for &(x, y) in &input.clicks {
        if let Some(square) = square_at(x, y) {
            events.extend(session.click(square, dice));
        }
    }
    events
}

impl GameApp for HauntedApp {
    type State = GameSession;
    type Effect = SessionEvent;

    fn init_state(&mut self, _ctx: &mut AppContext) -> GameSession {
        match self.cli.duration() {
            Some(limit) => GameSession::with_duration(self.cli.variant, limit),
            None => GameSession::new(self.cli.variant),
        }
    }

    fn update_state(
        &mut self,
        state: &mut GameSession,
        input: &InputFrame,
        dt: Duration,
        _ctx: &mut AppContext,
    ) -> Vec<SessionEvent> {
        let mut events = apply_input(state, input, self.dice.as_mut());
        events.extend(state.tick(dt, self.dice.as_mut()));
        events
    }

    fn render(&mut self, state: &GameSession, renderer: &mut dyn Renderer2d) {
        render::draw_session(state, &self.sprites, renderer);
    }

    fn handle_effects(&mut self, effects: Vec<SessionEvent>, ctx: &mut AppContext) {
        for effect in effects {
            match effect {
                SessionEvent::Cue(cue) => {
                    if let Some(sfx) = &self.sfx {
                        sfx.play(cue);
                    }
                }
                SessionEvent::Say(line) => self.voice.say(&line),
                SessionEvent::Exit => ctx.request_exit(),
            }
        }
    }

    fn on_exit(&mut self, state: &GameSession) {
        match serde_json::to_string(&state.snapshot()) {
            Ok(json) => tracing::info!(snapshot = %json, "session ended"),
            Err(err) => tracing::warn!("could not serialize session: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::session::Phase;
    use crate::variant::Variant;
    use cozy_chess::Square;

    fn centre(square: Square) -> (u32, u32) {
        let r = render::square_rect(square);
        (r.x + r.w / 2, r.y + r.h / 2)
    }

    #[test]
    fn typed_digits_and_enter_start_the_game() {
        let mut session = GameSession::new(Variant::Classic);
        let mut dice = ScriptedDice::new();
        let input = InputFrame {
            typed: vec!['9', 'x', '0', '\r'],
            keys_pressed: vec![VirtualKeyCode::Return],
            ..InputFrame::default()
        };
        apply_input(&mut session, &input, &mut dice);
        assert_eq!(session.phase(), &Phase::Playing);
        assert_eq!(
            session.timer().map(|t| t.limit()),
            Some(Duration::from_secs(90))
        );
    }

    #[test]
    fn backspace_edits_before_submit() {
        let mut session = GameSession::new(Variant::Classic);
        let mut dice = ScriptedDice::new();
        let input = InputFrame {
            typed: vec!['1', '2'],
            keys_pressed: vec![VirtualKeyCode::Back],
            ..InputFrame::default()
        };
        apply_input(&mut session, &input, &mut dice);
        assert_eq!(session.prompt().map(|p| p.text()), Some("1"));
    }

    #[test]
    fn two_clicks_in_one_frame_play_a_move() {
        let mut session = GameSession::with_duration(Variant::Classic, Duration::from_secs(30));
        let mut dice = ScriptedDice::new();
        let input = InputFrame {
            clicks: vec![centre(Square::D2), centre(Square::D4)],
            ..InputFrame::default()
        };
        apply_input(&mut session, &input, &mut dice);
        assert_eq!(session.board().uci_history(), vec!["d2d4".to_string()]);
    }
}
