//! Transient wrong-answer feedback.

use std::time::{Duration, Instant};

/// How long the pulse stays on after a wrong answer.
pub const PULSE_DURATION: Duration = Duration::from_millis(500);

/// A pulse that started at a known instant and expires one fixed delay later.
///
/// Callers supply the clock reading, so tests can step time forward without
/// sleeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPulse {
    started_at: Instant,
}

impl ErrorPulse {
    pub fn start(now: Instant) -> Self {
        ErrorPulse { started_at: now }
    }

    pub fn expires_at(&self) -> Instant {
        self.started_at + PULSE_DURATION
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now < self.expires_at()
    }
}
