#![forbid(unsafe_code)]

//! Slide tripling for the looping illusion.
//!
//! A [`ClonePlan`] describes the track after cloning: N leading clones, the N
//! originals, then N trailing clones, each group in original order. The plan
//! is purely logical; [`ClonePlan::dom_ops`] spells out the node operations a
//! DOM host performs to realise it.

/// Largest number of authored slides a track may loop over.
pub const MAX_SLIDES: usize = 1024;

/// Which copy of the originals a slide belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SlideCopy {
    /// Clone placed before the originals.
    Leading,
    /// Authored slide.
    Original,
    /// Clone placed after the originals.
    Trailing,
}

/// One slide of the tripled track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideRef {
    /// Index of the original slide this one shows.
    pub source: usize,
    /// Copy group.
    pub copy: SlideCopy,
}

impl SlideRef {
    /// Whether this slide is a decorative clone.
    #[must_use]
    pub const fn is_clone(self) -> bool {
        !matches!(self.copy, SlideCopy::Original)
    }
}

/// A node operation that builds the tripled track from the originals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum CloneOp {
    /// Deep-clone original `source` and append it to the track.
    Append { source: usize },
    /// Deep-clone original `source` and insert it before the track's first child.
    Prepend { source: usize },
}

/// Layout of a tripled slide track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClonePlan {
    original_count: usize,
}

impl ClonePlan {
    /// Plan for `original_count` slides; `None` when there is nothing to loop
    /// or more than [`MAX_SLIDES`].
    #[must_use]
    pub const fn new(original_count: usize) -> Option<Self> {
        if original_count == 0 || original_count > MAX_SLIDES {
            None
        } else {
            Some(Self { original_count })
        }
    }

    /// Number of authored slides (N).
    #[must_use]
    pub const fn original_count(&self) -> usize {
        self.original_count
    }

    /// Total slides after cloning (3N).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.original_count.saturating_mul(3)
    }

    /// Always false; a plan has at least three slides.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Absolute index of the first original slide (N).
    #[must_use]
    pub const fn home_start(&self) -> usize {
        self.original_count
    }

    /// Slide at an absolute track index.
    #[must_use]
    pub const fn slide(&self, absolute: usize) -> Option<SlideRef> {
        let n = self.original_count;
        let copy = match absolute / n {
            0 => SlideCopy::Leading,
            1 => SlideCopy::Original,
            2 => SlideCopy::Trailing,
            _ => return None,
        };
        Some(SlideRef {
            source: absolute % n,
            copy,
        })
    }

    /// All slides in track order.
    pub fn iter(&self) -> impl Iterator<Item = SlideRef> + '_ {
        (0..self.len()).filter_map(|i| self.slide(i))
    }

    /// Node operations turning `[o0..oN-1]` into the tripled track.
    ///
    /// Trailing clones are appended in order; leading clones are prepended in
    /// reverse so they end up in original order.
    #[must_use]
    pub fn dom_ops(&self) -> Vec<CloneOp> {
        let n = self.original_count;
        let mut ops = Vec::with_capacity(n * 2);
        ops.extend((0..n).map(|source| CloneOp::Append { source }));
        ops.extend((0..n).rev().map(|source| CloneOp::Prepend { source }));
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[test]
    fn empty_track_has_no_plan() {
        assert!(ClonePlan::new(0).is_none());
    }

    #[test]
    fn oversized_track_has_no_plan() {
        assert!(ClonePlan::new(MAX_SLIDES).is_some());
        assert!(ClonePlan::new(MAX_SLIDES + 1).is_none());
        assert!(ClonePlan::new(usize::MAX).is_none());
    }

    #[test]
    fn plan_triples_and_preserves_order() {
        let plan = ClonePlan::new(3).expect("non-empty");
        assert_eq!(plan.len(), 9);
        assert_eq!(plan.home_start(), 3);
        let sources: Vec<usize> = plan.iter().map(|s| s.source).collect();
        assert_eq!(sources, vec![0, 1, 2, 0, 1, 2, 0, 1, 2]);
        let clones = plan.iter().filter(|s| s.is_clone()).count();
        assert_eq!(clones, 6);
        assert_eq!(plan.slide(9), None);
    }

    #[test]
    fn single_slide_plan() {
        let plan = ClonePlan::new(1).expect("non-empty");
        assert_eq!(plan.len(), 3);
        assert_eq!(
            plan.slide(1),
            Some(SlideRef {
                source: 0,
                copy: SlideCopy::Original
            })
        );
    }

    #[test]
    fn dom_ops_reproduce_plan() {
        let plan = ClonePlan::new(4).expect("non-empty");
        let mut track: VecDeque<(usize, bool)> = (0..4).map(|i| (i, false)).collect();
        for op in plan.dom_ops() {
            match op {
                CloneOp::Append { source } => track.push_back((source, true)),
                CloneOp::Prepend { source } => track.push_front((source, true)),
            }
        }
        let expected: Vec<(usize, bool)> = plan.iter().map(|s| (s.source, s.is_clone())).collect();
        assert_eq!(track.into_iter().collect::<Vec<_>>(), expected);
    }
}
