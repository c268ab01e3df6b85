use std::time::Duration;

pub const DEFAULT_GAME_DURATION: Duration = Duration::from_secs(180);

/// Keyboard prompt for the game length, in seconds.
///
/// Only ASCII digits are accepted; anything else typed is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationPrompt {
    text: String,
}

impl DurationPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether `ch` was accepted.
    pub fn push_char(&mut self, ch: char) -> bool {
        if !ch.is_ascii_digit() {
            return false;
        }
        self.text.push(ch);
        true
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn submit(&self) -> Duration {
        parse_duration(&self.text)
    }
}

/// Parses whole seconds; empty, non-numeric or overflowing input falls back to
/// [`DEFAULT_GAME_DURATION`].
pub fn parse_duration(text: &str) -> Duration {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return DEFAULT_GAME_DURATION;
    }
    text.parse::<u64>()
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_GAME_DURATION)
}
