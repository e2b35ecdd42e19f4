#![forbid(unsafe_code)]

//! Per-slide stride measurement and caching.

/// Measured geometry of one slide, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideMetrics {
    /// Rendered slide width.
    pub width: f32,
    /// Computed gap between neighbouring slides.
    pub gap: f32,
}

impl SlideMetrics {
    /// Create metrics from a width and gap.
    #[must_use]
    pub const fn new(width: f32, gap: f32) -> Self {
        Self { width, gap }
    }
}

/// Live layout access for one carousel track.
///
/// Hosts answer from their layout engine (bounding box width of the first
/// slide, computed `gap` of the track). `None` means no slide is measurable.
pub trait SlideLayout {
    /// Measure the representative slide.
    fn slide_metrics(&self) -> Option<SlideMetrics>;
}

impl SlideLayout for SlideMetrics {
    fn slide_metrics(&self) -> Option<SlideMetrics> {
        Some(*self)
    }
}

impl<L: SlideLayout + ?Sized> SlideLayout for &L {
    fn slide_metrics(&self) -> Option<SlideMetrics> {
        (**self).slide_metrics()
    }
}

/// Layout with nothing to measure.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLayout;

impl SlideLayout for NoLayout {
    fn slide_metrics(&self) -> Option<SlideMetrics> {
        None
    }
}

/// Cached stride, invalidated by layout changes.
#[derive(Debug, Clone, Default)]
pub struct StrideCache {
    cached: Option<f32>,
    fixed_gap: Option<f32>,
    fallback_width: Option<f32>,
}

impl StrideCache {
    /// Create an empty cache.
    ///
    /// `fixed_gap` overrides the measured gap; `fallback_width` is used when
    /// nothing can be measured.
    #[must_use]
    pub const fn new(fixed_gap: Option<f32>, fallback_width: Option<f32>) -> Self {
        Self {
            cached: None,
            fixed_gap,
            fallback_width,
        }
    }

    /// Whether a stride is cached.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.cached.is_some()
    }

    /// Cached stride without measuring.
    #[must_use]
    pub const fn cached(&self) -> Option<f32> {
        self.cached
    }

    /// Forget the cached stride.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Cached stride, measuring through `layout` if the cache is empty.
    pub fn stride(&mut self, layout: &impl SlideLayout) -> Option<f32> {
        if self.cached.is_none() {
            self.cached = self.measure(layout);
        }
        self.cached
    }

    fn measure(&self, layout: &impl SlideLayout) -> Option<f32> {
        let metrics = layout.slide_metrics();
        let width = metrics
            .map(|m| m.width)
            .filter(|w| w.is_finite() && *w > 0.0)
            .or(self.fallback_width)?;
        let gap = self
            .fixed_gap
            .or_else(|| metrics.map(|m| m.gap))
            .filter(|g| g.is_finite())
            .unwrap_or(0.0)
            .max(0.0);
        Some(width + gap)
    }
}
