//! Autoplay timer driven by host ticks.
use std::time::{Duration, Instant};

/// Deadline-based autoplay timer.
///
/// The timer never sleeps; the host forwards clock ticks and the reducer
/// asks [`Autoplay::poll`] whether an advance is due.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Autoplay {
    next_due: Option<Instant>,
    paused: bool,
}

impl Autoplay {
    /// Next moment an advance is due, if scheduled.
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Returns true while hover has paused the timer.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Cancels the pending deadline until [`Autoplay::resume`].
    pub fn pause(&mut self) {
        self.paused = true;
        self.next_due = None;
    }

    /// Reschedules one full interval after `now`.
    pub fn resume(&mut self, now: Instant, interval: Duration) {
        self.paused = false;
        self.next_due = Some(now + interval);
    }

    /// Returns true when an advance is due at `now`, rescheduling the next
    /// deadline. The first poll only schedules.
    pub fn poll(&mut self, now: Instant, interval: Duration) -> bool {
        if self.paused {
            return false;
        }
        match self.next_due {
            None => {
                self.next_due = Some(now + interval);
                false
            }
            Some(due) if now >= due => {
                self.next_due = Some(now + interval);
                true
            }
            Some(_) => false,
        }
    }
}
