#![forbid(unsafe_code)]

//! Autoplay timer with pause reasons.
//!
//! # Invariants
//!
//! 1. At most one timer: `next_due` is a single `Option`.
//! 2. `start` while running is a no-op and does not reset the cadence.
//! 3. The timer runs only when enabled and no pause reason is set.
//! 4. A late `poll` fires once and skips the missed periods.

use std::time::Duration;

use bitflags::bitflags;

bitflags! {
    /// Reasons autoplay is held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PauseReasons: u8 {
        /// Pointer is over the carousel.
        const HOVER = 0b0001;
        /// Keyboard focus is inside the carousel.
        const FOCUS = 0b0010;
        /// A finger is down on the carousel.
        const TOUCH = 0b0100;
    }
}

/// Recurring step timer owned by one carousel.
#[derive(Debug, Clone)]
pub struct Autoplay {
    enabled: bool,
    period: Duration,
    next_due: Option<Duration>,
    paused: PauseReasons,
}

impl Autoplay {
    /// Create a stopped timer.
    #[must_use]
    pub const fn new(enabled: bool, period: Duration) -> Self {
        Self {
            enabled,
            period,
            next_due: None,
            paused: PauseReasons::empty(),
        }
    }

    /// Whether the timer is armed.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Active pause reasons.
    #[must_use]
    pub const fn paused(&self) -> PauseReasons {
        self.paused
    }

    /// Next tick deadline.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Duration> {
        self.next_due
    }

    /// Arm the timer. Returns `true` if it was not already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if !self.enabled || self.period.is_zero() || !self.paused.is_empty() || self.is_running() {
            return false;
        }
        self.next_due = Some(now.saturating_add(self.period));
        true
    }

    /// Disarm the timer. Returns `true` if it was running.
    pub fn stop(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// Stop then start, so the next tick is a full period away.
    pub fn restart(&mut self, now: Duration) -> bool {
        self.stop();
        self.start(now)
    }

    /// Add a pause reason; stops the timer.
    pub fn pause(&mut self, reason: PauseReasons) {
        self.paused.insert(reason);
        self.stop();
    }

    /// Clear a pause reason; restarts the timer once no reason remains.
    pub fn resume(&mut self, reason: PauseReasons, now: Duration) -> bool {
        self.paused.remove(reason);
        self.start(now)
    }

    /// Clear a pause reason without arming the timer.
    pub fn clear(&mut self, reason: PauseReasons) {
        self.paused.remove(reason);
    }

    /// Returns `true` if a tick is due at `now`, and re-arms for the next one.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let mut next = due.saturating_add(self.period);
        while next <= now && next < Duration::MAX {
            next = next.saturating_add(self.period);
        }
        self.next_due = Some(next);
        true
    }
}
