use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Countdown for a timed game. Remaining time never increases and stops at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTimer {
    #[serde(with = "crate::serde_duration")]
    elapsed: Duration,
    #[serde(with = "crate::serde_duration")]
    limit: Duration,
}

impl RoundTimer {
    pub fn new(limit: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            limit,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed)
    }

    /// Whole seconds left, as shown on the HUD.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining().as_secs()
    }

    pub fn is_up(&self) -> bool {
        self.elapsed >= self.limit
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.is_up() {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt).min(self.limit);
    }
}
