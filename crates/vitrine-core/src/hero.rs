#![forbid(unsafe_code)]

//! Hero banner rotator.
//!
//! Exactly one hero slide is `active`; a recurring timer advances it modulo
//! the slide count. Hovering the banner holds the rotation.

use std::time::Duration;

use crate::config::HeroConfig;

/// Hero slide rotation state.
#[derive(Debug, Clone)]
pub struct HeroRotator {
    count: usize,
    current: usize,
    period: Duration,
    next_due: Option<Duration>,
    hovered: bool,
}

impl HeroRotator {
    #[must_use]
    pub const fn new(count: usize, config: &HeroConfig) -> Self {
        Self {
            count,
            current: 0,
            period: config.period(),
            next_due: None,
            hovered: false,
        }
    }

    /// Active slide index.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Whether the rotation timer is armed.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Next rotation deadline.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Duration> {
        self.next_due
    }

    /// Activate the first slide and arm the timer; `None` when there are no slides.
    pub fn start(&mut self, now: Duration) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        self.current = 0;
        self.arm(now);
        Some(0)
    }

    /// Advance if the rotation is due; returns the newly active slide.
    pub fn poll(&mut self, now: Duration) -> Option<usize> {
        let due = self.next_due?;
        if now < due || self.count == 0 {
            return None;
        }
        self.current = (self.current + 1) % self.count;
        let mut next = due.saturating_add(self.period);
        while next <= now && next < Duration::MAX {
            next = next.saturating_add(self.period);
        }
        self.next_due = Some(next);
        Some(self.current)
    }

    /// Pointer entered the banner.
    pub fn pointer_enter(&mut self) {
        self.hovered = true;
        self.next_due = None;
    }

    /// Pointer left the banner; rotation resumes a full period later.
    pub fn pointer_leave(&mut self, now: Duration) {
        self.hovered = false;
        if self.count > 0 {
            self.arm(now);
        }
    }

    fn arm(&mut self, now: Duration) {
        if !self.hovered && !self.period.is_zero() {
            self.next_due = Some(now.saturating_add(self.period));
        }
    }
}
