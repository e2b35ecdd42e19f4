#![forbid(unsafe_code)]

//! `vitrine-web` attaches the Vitrine state machines to a host document.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes DOM events and
//!   layout measurements.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate does not bind to `wasm-bindgen`; `vitrine-wasm` wraps it with a
//! JS API.

pub mod event;
#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod manifest;
pub mod page;

use core::time::Duration;
use std::collections::VecDeque;

use vitrine_core::VitrineConfig;

pub use event::{CarouselId, HostCommand, HostEvent, Region, ids};
pub use manifest::PageManifest;
pub use page::{HostLayout, MeasuredLayout, Page};

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Going backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// A [`Page`] plus its clock and pending host events.
#[derive(Debug, Clone)]
pub struct WebSession {
    clock: DeterministicClock,
    page: Page,
    queue: VecDeque<HostEvent>,
    initialized: bool,
}

impl WebSession {
    /// Attach to a document.
    #[must_use]
    pub fn new(manifest: PageManifest, config: &VitrineConfig) -> Self {
        Self {
            clock: DeterministicClock::new(),
            page: Page::new(manifest, config),
            queue: VecDeque::new(),
            initialized: false,
        }
    }

    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub const fn clock(&self) -> &DeterministicClock {
        &self.clock
    }

    /// Mutable access to the clock.
    pub fn clock_mut(&mut self) -> &mut DeterministicClock {
        &mut self.clock
    }

    /// Queue a host event for the next [`step`](Self::step).
    pub fn push_event(&mut self, event: HostEvent) {
        self.queue.push_back(event);
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Deadline, if any, at which the host should call `step` again.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.page.next_deadline()
    }

    /// Initialise on first use, drain queued events, then run due timers.
    pub fn step(&mut self, layout: &impl HostLayout) -> Vec<HostCommand> {
        let now = self.clock.now();
        let mut out = Vec::new();
        if !std::mem::replace(&mut self.initialized, true) {
            out.extend(self.page.init(now));
        }
        while let Some(event) = self.queue.pop_front() {
            out.extend(self.page.handle(&event, now, layout));
        }
        out.extend(self.page.poll(now, layout));
        out
    }
}
