#![forbid(unsafe_code)]

//! Absolute slide index with wrap correction.
//!
//! # Invariants
//!
//! 1. `absolute` is always inside `[0, 3N)`.
//! 2. Between a step and its settle, `absolute` may sit one slide into a clone
//!    region; [`LoopPosition::correct`] moves it back into `[N, 2N)`.
//! 3. `logical() == absolute % N` is unchanged by correction, so the slide
//!    on screen before and after a correction is the same content.

use super::clone_plan::MAX_SLIDES;
use crate::swipe::Direction;

/// Record of one wrap correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WrapCorrection {
    /// Index before correction (in a clone region).
    pub from: usize,
    /// Index after correction (in the original run).
    pub to: usize,
}

/// Position inside a tripled track of `3 * count` slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopPosition {
    absolute: usize,
    count: usize,
}

impl LoopPosition {
    /// Start at the first original slide; `None` for an empty or oversized
    /// track.
    #[must_use]
    pub const fn new(count: usize) -> Option<Self> {
        if count == 0 || count > MAX_SLIDES {
            None
        } else {
            Some(Self {
                absolute: count,
                count,
            })
        }
    }

    /// Absolute index into the tripled track.
    #[must_use]
    pub const fn absolute(&self) -> usize {
        self.absolute
    }

    /// Number of original slides (N).
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Index of the original slide currently shown.
    #[must_use]
    pub const fn logical(&self) -> usize {
        self.absolute % self.count
    }

    /// Whether the index lies in the original run `[N, 2N)`.
    #[must_use]
    pub const fn is_home(&self) -> bool {
        self.absolute >= self.count && self.absolute < self.count * 2
    }

    /// Move one slide and return the new absolute index.
    ///
    /// A pending correction is folded in first, so repeated steps without
    /// settling never leave `[0, 3N)`.
    pub fn step(&mut self, direction: Direction) -> usize {
        let _ = self.correct();
        self.absolute = match direction {
            Direction::Forward => self.absolute + 1,
            Direction::Backward => self.absolute - 1,
        };
        self.absolute
    }

    /// Bring the index back into `[N, 2N)`.
    pub fn correct(&mut self) -> Option<WrapCorrection> {
        let from = self.absolute;
        if from >= self.count * 2 {
            self.absolute = from - self.count;
        } else if from < self.count {
            self.absolute = from + self.count;
        } else {
            return None;
        }
        Some(WrapCorrection {
            from,
            to: self.absolute,
        })
    }
}
