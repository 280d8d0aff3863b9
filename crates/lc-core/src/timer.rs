//! Countdown timers for site play.

use serde::{Deserialize, Serialize};

/// A countdown timer ticking down in site-mode turns.
///
/// The remaining duration is signed and is not clamped at zero: a timer at
/// exactly 0 is still active ("Current"), and only a negative value marks
/// it expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// What the timer tracks, e.g. "Torch burns out".
    pub name: String,
    /// Minutes remaining; negative means expired.
    pub remaining: i32,
}

impl Timer {
    /// Create a timer. Negative starting durations clamp to 0.
    pub fn new(name: impl Into<String>, duration: i32) -> Self {
        Self {
            name: name.into(),
            remaining: duration.max(0),
        }
    }

    /// Subtract `amount` minutes. The value may go negative.
    pub fn tick(&mut self, amount: i32) {
        self.remaining -= amount;
    }

    /// Whether the timer has gone below zero.
    pub fn is_expired(&self) -> bool {
        self.remaining < 0
    }
}

impl std::fmt::Display for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_expired() {
            write!(f, "EXPIRED: {}", self.name)
        } else if self.remaining < 10 {
            write!(f, "Current: {}", self.name)
        } else {
            write!(f, "{} minutes: {}", self.remaining, self.name)
        }
    }
}
