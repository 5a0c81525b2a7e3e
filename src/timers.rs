use std::time::Duration;

/// A one-shot countdown anchored at the moment it was armed.
///
/// Times are offsets from the start of the session, supplied by the caller.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Timer {
    armed_at: Option<Duration>,
}

impl Timer {
    /// Arms the timer at `now`, replacing any earlier anchor.
    pub fn arm(&mut self, now: Duration) {
        self.armed_at = Some(now);
    }

    pub fn disarm(&mut self) {
        self.armed_at = None;
    }

    #[must_use]
    pub fn is_armed(self) -> bool {
        self.armed_at.is_some()
    }

    /// Returns true once `wait` has elapsed since arming. Never fires while disarmed.
    #[must_use]
    pub fn is_due(self, now: Duration, wait: Duration) -> bool {
        self.armed_at
            .is_some_and(|armed_at| now.saturating_sub(armed_at) >= wait)
    }

    /// Disarms and returns true when due.
    pub fn fire(&mut self, now: Duration, wait: Duration) -> bool {
        if self.is_due(now, wait) {
            self.disarm();
            return true;
        }
        false
    }
}

/// The three countdowns that drive spawning, cleanup and effect expiry.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Timers {
    pub spawn: Timer,
    pub despawn: Timer,
    pub effect: Timer,
}
