use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::sfx::Cue;

/// Pause before the AI answers a move.
pub const AI_THINK_TIME: Duration = Duration::from_secs(1);

/// Which flavour of haunting is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Jumpscares and taunts; the AI plays fair.
    Classic,
    /// Glitches, fake crashes and an AI that cheats.
    Cursed,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Cursed => "cursed",
        }
    }

    /// Odds (1 in N) of an effect right after the player's move.
    pub fn after_move_effect_odds(self) -> u32 {
        match self {
            Variant::Classic => 10,
            Variant::Cursed => 3,
        }
    }

    /// Odds (1 in N) of a fake crash after an invalid move attempt, if this variant has one.
    pub fn invalid_move_crash_odds(self) -> Option<u32> {
        match self {
            Variant::Classic => None,
            Variant::Cursed => Some(6),
        }
    }

    /// Odds (1 in N) of the AI taunting after an honest move.
    pub const TAUNT_ODDS: u32 = 5;

    /// Odds (1 in N) of the AI cheating on its turn.
    pub const CHEAT_ODDS: u32 = 3;

    /// Whether a finished position ends play. The cursed AI refuses to accept a lost board.
    pub fn respects_game_over(self) -> bool {
        matches!(self, Variant::Classic)
    }

    /// Missing sound files are fatal for variants that require them.
    pub fn requires_sounds(self) -> bool {
        matches!(self, Variant::Cursed)
    }

    pub fn cues(self) -> &'static [Cue] {
        match self {
            Variant::Classic => &[Cue::Scream, Cue::Laugh, Cue::Error],
            Variant::Cursed => &[
                Cue::Laugh,
                Cue::Error,
                Cue::Ambience1,
                Cue::Ambience2,
                Cue::Ambience3,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursed_is_the_harsher_variant() {
        assert!(Variant::Cursed.after_move_effect_odds() < Variant::Classic.after_move_effect_odds());
        assert_eq!(Variant::Classic.invalid_move_crash_odds(), None);
        assert_eq!(Variant::Cursed.invalid_move_crash_odds(), Some(6));
        assert!(Variant::Cursed.requires_sounds());
        assert!(!Variant::Classic.requires_sounds());
    }

    #[test]
    fn cue_sets_cover_each_variants_effects() {
        assert!(Variant::Classic.cues().contains(&Cue::Scream));
        for cue in Cue::AMBIENCE {
            assert!(Variant::Cursed.cues().contains(&cue));
        }
        assert_eq!(Variant::Cursed.cues().len(), 5);
    }
}
