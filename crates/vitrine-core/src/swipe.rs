#![forbid(unsafe_code)]

//! Horizontal swipe classification.
//!
//! A swipe is judged once, on touch end, from the horizontal displacement
//! `start_x - end_x` (positive means the finger moved left, i.e. "show the
//! next slide").
//!
//! # Thresholds
//!
//! [`SwipeThresholds`] carries two limits:
//!
//! - `tap`: displacements with magnitude strictly below this are taps.
//! - `step`: displacements with magnitude strictly above this are steps.
//!
//! Anything in between is a dead band and is ignored. A single-threshold
//! recogniser is simply `tap == step`, so exactly `step` pixels is still not
//! a step.

/// Step direction shared by carousels and the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Towards lower indices ("prev").
    Backward,
    /// Towards higher indices ("next").
    Forward,
}

impl Direction {
    /// Signed unit delta for this direction.
    #[must_use]
    pub const fn delta(self) -> isize {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }
}

/// Displacement limits for swipe recognition, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwipeThresholds {
    /// Magnitude below which the gesture is a tap.
    pub tap: f32,
    /// Magnitude above which the gesture is a step.
    pub step: f32,
}

impl SwipeThresholds {
    /// One threshold: `> px` steps, everything else is ignored.
    #[must_use]
    pub const fn single(px: f32) -> Self {
        Self { tap: px, step: px }
    }

    /// Separate tap and step limits.
    #[must_use]
    pub const fn dual(tap: f32, step: f32) -> Self {
        Self { tap, step }
    }

    /// Classify a completed gesture.
    #[must_use]
    pub fn classify(self, start_x: f32, end_x: f32) -> SwipeKind {
        let diff = start_x - end_x;
        if !diff.is_finite() || diff.abs() < self.tap {
            return SwipeKind::Tap;
        }
        if diff > self.step {
            SwipeKind::Step(Direction::Forward)
        } else if diff < -self.step {
            SwipeKind::Step(Direction::Backward)
        } else {
            SwipeKind::DeadBand
        }
    }
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self::single(50.0)
    }
}

/// Result of classifying one touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeKind {
    /// Too short to be a swipe.
    Tap,
    /// Longer than a tap but not past the step threshold.
    DeadBand,
    /// A full step in the given direction.
    Step(Direction),
}

impl SwipeKind {
    /// The step direction, if this gesture is a step.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Step(direction) => Some(direction),
            Self::Tap | Self::DeadBand => None,
        }
    }
}

/// Remembers the touch-start position between start and end callbacks.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    thresholds: SwipeThresholds,
    start_x: Option<f32>,
}

impl SwipeTracker {
    /// Create a tracker with the given thresholds.
    #[must_use]
    pub const fn new(thresholds: SwipeThresholds) -> Self {
        Self {
            thresholds,
            start_x: None,
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn thresholds(&self) -> SwipeThresholds {
        self.thresholds
    }

    /// Whether a touch is currently down.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    /// Record the start of a touch.
    pub fn start(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// Finish the touch and classify it.
    ///
    /// A touch end with no recorded start is treated as a tap.
    pub fn end(&mut self, x: f32) -> SwipeKind {
        match self.start_x.take() {
            Some(start) => self.thresholds.classify(start, x),
            None => SwipeKind::Tap,
        }
    }

    /// Drop any touch in progress.
    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}
