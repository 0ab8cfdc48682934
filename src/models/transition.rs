//! Schedules the second half of a card move.
//! The clock is passed in, so the timer works the same under egui and in tests.
use super::session::{PendingMove, TRANSITION_DELAY};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct TransitionTimer {
    delay: Duration,
    scheduled: Option<(PendingMove, Instant)>,
}

impl Default for TransitionTimer {
    fn default() -> Self {
        Self::new(TRANSITION_DELAY)
    }
}

impl TransitionTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            scheduled: None,
        }
    }

    /// Replaces whatever was scheduled before.
    pub fn schedule(&mut self, pending: PendingMove, now: Instant) {
        self.scheduled = Some((pending, now + self.delay));
    }

    /// Hands back the move once its delay has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<PendingMove> {
        match self.scheduled {
            Some((pending, due)) if now >= due => {
                self.scheduled = None;
                Some(pending)
            }
            _ => None,
        }
    }

    /// Time left before the scheduled move is due, if any is scheduled
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.scheduled
            .map(|(_, due)| due.saturating_duration_since(now))
    }

    pub fn cancel(&mut self) {
        self.scheduled = None;
    }
}
