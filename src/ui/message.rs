// ui/message.rs - Timed status message

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub set_at: Instant,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            set_at: now,
        }
    }

    /// The text, unless `ttl` has elapsed since it was set.
    pub fn visible_text(&self, now: Instant, ttl: Duration) -> Option<&str> {
        if now.saturating_duration_since(self.set_at) < ttl {
            Some(&self.text)
        } else {
            None
        }
    }
}
