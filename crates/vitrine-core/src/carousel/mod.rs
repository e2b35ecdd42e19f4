#![forbid(unsafe_code)]

//! Looping ("infinite") carousel controller.
//!
//! [`LoopingCarousel`] fakes unbounded looping over N slides by tripling the
//! track ([`ClonePlan`]), parking the view on the middle copy and silently
//! re-centering once a step that drifted into a clone region has settled.
//!
//! # Lifecycle
//!
//! 1. [`build`](LoopingCarousel::build) once, after the host's initial layout.
//!    Emits [`CarouselCommand::CloneSlides`] and schedules the first placement.
//! 2. Inputs ([`next`](LoopingCarousel::next), [`prev`](LoopingCarousel::prev),
//!    touch, autoplay ticks from [`poll`](LoopingCarousel::poll)) move the index
//!    by one and emit an animated render.
//! 3. The host reports completion with [`settle`](LoopingCarousel::settle)
//!    (`transitionend` / `scrollend`), or the settle deadline fires in `poll`.
//!    Wrap correction runs and, if it moved the index, an
//!    unanimated render lands on the pixel-identical slide.
//!
//! # Invariants
//!
//! 1. Only one animated step is in flight; while it is, new steps are rejected
//!    or queued (per [`InFlightPolicy`]). Autoplay ticks are never queued.
//! 2. After every settle, the absolute index lies in `[N, 2N)`.
//! 3. The stride is re-measured before any render that follows `build` or
//!    `resize`.
//! 4. An empty track (N = 0) is inert: no clones, no autoplay, no renders.
//!
//! # Failure Modes
//!
//! - Nothing measurable and no fallback width: the index still moves but no
//!   render is emitted, and the step settles immediately.
//! - A settle signal with nothing in flight is ignored.
//! - More than [`MAX_SLIDES`] slides: `build` refuses the track and the
//!   carousel stays inert.
//! - A lost completion signal (cancelled transition, clamped scroll) is
//!   covered by the settle deadline, so the guard never holds past
//!   [`CarouselConfig::settle_deadline`].

mod autoplay;
mod clone_plan;
mod position;
mod stride;

use std::collections::VecDeque;
use std::time::Duration;

pub use autoplay::{Autoplay, PauseReasons};
pub use clone_plan::{CloneOp, ClonePlan, MAX_SLIDES, SlideCopy, SlideRef};
pub use position::{LoopPosition, WrapCorrection};
pub use stride::{NoLayout, SlideLayout, SlideMetrics, StrideCache};

use crate::config::{CarouselConfig, InFlightPolicy};
use crate::swipe::{Direction, SwipeTracker};

// ---------------------------------------------------------------------------
// Commands and outcomes
// ---------------------------------------------------------------------------

/// How a carousel applies positions to its track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RenderVariant {
    /// Horizontal `translateX` on the track.
    #[default]
    Transform,
    /// `scrollLeft` of a scroll container.
    Scroll,
}

/// CSS transition for an animated transform step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackTransition {
    /// Transition duration.
    pub duration_ms: u64,
    /// Timing function.
    pub easing: String,
}

/// Host command emitted by a carousel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CarouselCommand {
    /// Clone the original slides into a tripled track.
    CloneSlides {
        original_count: usize,
        ops: Vec<CloneOp>,
    },
    /// Set the track transform to `translateX(x_px)`; `transition: None`
    /// means `transition: none`.
    Translate {
        x_px: f32,
        transition: Option<TrackTransition>,
    },
    /// Scroll the viewport to `left_px`.
    ScrollTo { left_px: f32, smooth: bool },
}

/// Deterministic reason an input did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CarouselIgnoredReason {
    /// Not built yet, or built with no slides.
    Inert,
    /// Built with more than [`MAX_SLIDES`] slides; the carousel stays inert.
    TooManySlides,
    /// `build` already ran.
    AlreadyBuilt,
    /// An animated step is in flight.
    InFlight,
    /// The step queue is at capacity.
    QueueFull,
    /// Settle signal with nothing in flight.
    NotInFlight,
    /// Touch gesture was not a swipe.
    NoSwipe,
}

/// What one carousel call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CarouselOutcome {
    /// Nothing was due.
    Idle,
    /// Slides were cloned.
    Built { original_count: usize },
    /// The index moved one slide.
    Stepped {
        direction: Direction,
        absolute: usize,
    },
    /// The step waits for the current one to settle.
    Queued { pending: usize },
    /// The in-flight step settled.
    Settled { correction: Option<WrapCorrection> },
    /// The track was re-measured and placed without animation.
    Repositioned { absolute: usize },
    /// The input was dropped.
    Ignored(CarouselIgnoredReason),
}

/// Commands plus outcome of one carousel call.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselDispatch {
    pub commands: Vec<CarouselCommand>,
    pub outcome: CarouselOutcome,
}

impl CarouselDispatch {
    fn new(commands: Vec<CarouselCommand>, outcome: CarouselOutcome) -> Self {
        Self { commands, outcome }
    }

    fn ignored(reason: CarouselIgnoredReason) -> Self {
        Self::new(Vec::new(), CarouselOutcome::Ignored(reason))
    }

    /// Whether a step was applied or queued.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(
            self.outcome,
            CarouselOutcome::Stepped { .. } | CarouselOutcome::Queued { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepSource {
    Control,
    Swipe,
    Autoplay,
    Queued,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    settle_due: Duration,
}

/// One looping carousel: index, stride cache, autoplay timer and guard.
#[derive(Debug, Clone)]
pub struct LoopingCarousel {
    name: &'static str,
    config: CarouselConfig,
    built: bool,
    plan: Option<ClonePlan>,
    position: Option<LoopPosition>,
    stride: StrideCache,
    autoplay: Autoplay,
    swipe: SwipeTracker,
    flight: Option<InFlight>,
    pending: VecDeque<Direction>,
    remeasure_due: Option<Duration>,
}

impl LoopingCarousel {
    /// Create an unbuilt carousel.
    #[must_use]
    pub fn new(config: CarouselConfig) -> Self {
        Self {
            name: "carousel",
            stride: StrideCache::new(config.fixed_gap_px, config.fallback_slide_width_px),
            autoplay: Autoplay::new(config.autoplay, config.autoplay_period()),
            swipe: SwipeTracker::new(config.swipe),
            config,
            built: false,
            plan: None,
            position: None,
            flight: None,
            pending: VecDeque::new(),
            remeasure_due: None,
        }
    }

    /// Set the name used in log events.
    #[must_use]
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Name used in log events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Clone plan, once built with at least one slide.
    #[must_use]
    pub const fn plan(&self) -> Option<ClonePlan> {
        self.plan
    }

    /// Whether the carousel has no slides to move (or is not built yet).
    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.position.is_none()
    }

    /// Absolute index into the tripled track.
    #[must_use]
    pub fn absolute_index(&self) -> Option<usize> {
        self.position.map(|p| p.absolute())
    }

    /// Index of the original slide on screen.
    #[must_use]
    pub fn logical_index(&self) -> Option<usize> {
        self.position.map(|p| p.logical())
    }

    /// Slide currently on screen.
    #[must_use]
    pub fn current_slide(&self) -> Option<SlideRef> {
        let position = self.position?;
        self.plan?.slide(position.absolute())
    }

    /// Whether an animated step has not settled yet.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.flight.is_some()
    }

    /// Steps waiting for the in-flight one.
    #[must_use]
    pub fn pending_steps(&self) -> usize {
        self.pending.len()
    }

    /// Whether the autoplay timer is armed.
    #[must_use]
    pub const fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Active autoplay pause reasons.
    #[must_use]
    pub const fn pause_reasons(&self) -> PauseReasons {
        self.autoplay.paused()
    }

    /// Cached stride, if measured.
    #[must_use]
    pub const fn cached_stride(&self) -> Option<f32> {
        self.stride.cached()
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        [
            self.remeasure_due,
            self.flight.map(|f| f.settle_due),
            self.autoplay.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Clone the slides and park on the first original. Runs once.
    pub fn build(&mut self, original_count: usize, now: Duration) -> CarouselDispatch {
        if self.built {
            return CarouselDispatch::ignored(CarouselIgnoredReason::AlreadyBuilt);
        }
        self.built = true;
        if original_count > MAX_SLIDES {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                message = "carousel.too_many_slides",
                carousel = self.name,
                original_count
            );
            return CarouselDispatch::ignored(CarouselIgnoredReason::TooManySlides);
        }
        let (Some(plan), Some(position)) = (
            ClonePlan::new(original_count),
            LoopPosition::new(original_count),
        ) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "carousel.inert", carousel = self.name);
            return CarouselDispatch::ignored(CarouselIgnoredReason::Inert);
        };
        self.plan = Some(plan);
        self.position = Some(position);
        self.stride.invalidate();
        self.remeasure_due = Some(now.saturating_add(self.config.initial_layout_settle()));
        self.autoplay.start(now);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "carousel.build",
            carousel = self.name,
            original_count,
            slides = plan.len()
        );

        CarouselDispatch::new(
            vec![CarouselCommand::CloneSlides {
                original_count,
                ops: plan.dom_ops(),
            }],
            CarouselOutcome::Built { original_count },
        )
    }

    /// "Next" control.
    pub fn next(&mut self, now: Duration, layout: &impl SlideLayout) -> CarouselDispatch {
        self.control(Direction::Forward, now, layout)
    }

    /// "Prev" control.
    pub fn prev(&mut self, now: Duration, layout: &impl SlideLayout) -> CarouselDispatch {
        self.control(Direction::Backward, now, layout)
    }

    /// A control step; accepted steps restart the autoplay cadence.
    pub fn control(
        &mut self,
        direction: Direction,
        now: Duration,
        layout: &impl SlideLayout,
    ) -> CarouselDispatch {
        let dispatch = self.request_step(direction, StepSource::Control, now, layout);
        if dispatch.is_accepted() {
            self.autoplay.restart(now);
        }
        dispatch
    }

    /// Finger down on the carousel; holds autoplay.
    pub fn touch_start(&mut self, x: f32) {
        self.swipe.start(x);
        self.autoplay.pause(PauseReasons::TOUCH);
    }

    /// Finger up; steps if the displacement is a swipe, then releases autoplay.
    pub fn touch_end(
        &mut self,
        x: f32,
        now: Duration,
        layout: &impl SlideLayout,
    ) -> CarouselDispatch {
        let kind = self.swipe.end(x);
        let dispatch = match kind.direction() {
            Some(direction) => self.request_step(direction, StepSource::Swipe, now, layout),
            None => CarouselDispatch::ignored(CarouselIgnoredReason::NoSwipe),
        };
        self.release(PauseReasons::TOUCH, now);
        dispatch
    }

    /// Pointer entered the carousel. Returns whether autoplay is running.
    pub fn pointer_enter(&mut self) -> bool {
        self.autoplay.pause(PauseReasons::HOVER);
        false
    }

    /// Pointer left the carousel. Returns whether autoplay is running.
    pub fn pointer_leave(&mut self, now: Duration) -> bool {
        self.release(PauseReasons::HOVER, now)
    }

    /// Focus moved into the carousel. Returns whether autoplay is running.
    pub fn focus_in(&mut self) -> bool {
        self.autoplay.pause(PauseReasons::FOCUS);
        false
    }

    /// Focus left the carousel. Returns whether autoplay is running.
    pub fn focus_out(&mut self, now: Duration) -> bool {
        self.release(PauseReasons::FOCUS, now)
    }

    /// Viewport resized: drop the stride and re-measure after the layout delay.
    pub fn resize(&mut self, now: Duration) {
        self.stride.invalidate();
        if !self.is_inert() {
            self.remeasure_due = Some(now.saturating_add(self.config.layout_settle()));
        }
    }

    /// The host's completion signal for the in-flight step.
    pub fn settle(&mut self, now: Duration, layout: &impl SlideLayout) -> CarouselDispatch {
        if self.flight.take().is_none() {
            return CarouselDispatch::ignored(CarouselIgnoredReason::NotInFlight);
        }
        self.finish_flight(now, layout)
    }

    /// Run everything due at `now`: deferred re-measure, settle deadline,
    /// autoplay tick.
    pub fn poll(&mut self, now: Duration, layout: &impl SlideLayout) -> CarouselDispatch {
        let mut commands = Vec::new();
        let mut outcome = CarouselOutcome::Idle;

        if self.remeasure_due.is_some_and(|due| due <= now) {
            self.remeasure_due = None;
            let dispatch = self.reposition(now, layout);
            commands.extend(dispatch.commands);
            outcome = dispatch.outcome;
        }

        if self.flight.is_some_and(|f| f.settle_due <= now) {
            self.flight = None;
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "carousel.settle.deadline", carousel = self.name);
            let dispatch = self.finish_flight(now, layout);
            commands.extend(dispatch.commands);
            outcome = dispatch.outcome;
        }

        if self.autoplay.poll(now) {
            let dispatch = self.request_step(Direction::Forward, StepSource::Autoplay, now, layout);
            if dispatch.is_accepted() {
                commands.extend(dispatch.commands);
                outcome = dispatch.outcome;
            }
        }

        CarouselDispatch::new(commands, outcome)
    }

    fn release(&mut self, reason: PauseReasons, now: Duration) -> bool {
        if self.is_inert() {
            self.autoplay.clear(reason);
            return false;
        }
        self.autoplay.resume(reason, now);
        self.autoplay.is_running()
    }

    fn request_step(
        &mut self,
        direction: Direction,
        source: StepSource,
        now: Duration,
        layout: &impl SlideLayout,
    ) -> CarouselDispatch {
        if self.is_inert() {
            return CarouselDispatch::ignored(CarouselIgnoredReason::Inert);
        }
        if self.flight.is_some() {
            if source != StepSource::Autoplay && self.config.in_flight == InFlightPolicy::Queue {
                if self.pending.len() < self.config.max_queued_steps {
                    self.pending.push_back(direction);
                    return CarouselDispatch::new(
                        Vec::new(),
                        CarouselOutcome::Queued {
                            pending: self.pending.len(),
                        },
                    );
                }
                return CarouselDispatch::ignored(CarouselIgnoredReason::QueueFull);
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(
                message = "carousel.reject",
                carousel = self.name,
                ?direction,
                ?source
            );
            return CarouselDispatch::ignored(CarouselIgnoredReason::InFlight);
        }
        self.apply_step(direction, source, now, layout)
    }

    fn apply_step(
        &mut self,
        direction: Direction,
        source: StepSource,
        now: Duration,
        layout: &impl SlideLayout,
    ) -> CarouselDispatch {
        let Some(position) = self.position.as_mut() else {
            return CarouselDispatch::ignored(CarouselIgnoredReason::Inert);
        };
        let absolute = position.step(direction);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "carousel.step",
            carousel = self.name,
            ?direction,
            ?source,
            absolute
        );
        #[cfg(not(feature = "tracing"))]
        let _ = source;

        let outcome = CarouselOutcome::Stepped {
            direction,
            absolute,
        };
        match self.render(true, layout) {
            Some(command) => {
                self.flight = Some(InFlight {
                    settle_due: now.saturating_add(self.config.settle_deadline()),
                });
                CarouselDispatch::new(vec![command], outcome)
            }
            None => {
                // Nothing was animated, so there is nothing to wait for.
                let mut commands = Vec::new();
                self.correct(layout, &mut commands);
                CarouselDispatch::new(commands, outcome)
            }
        }
    }

    fn finish_flight(&mut self, now: Duration, layout: &impl SlideLayout) -> CarouselDispatch {
        let mut commands = Vec::new();
        let correction = self.correct(layout, &mut commands);
        if let Some(direction) = self.pending.pop_front() {
            let next = self.apply_step(direction, StepSource::Queued, now, layout);
            commands.extend(next.commands);
        }
        CarouselDispatch::new(commands, CarouselOutcome::Settled { correction })
    }

    fn reposition(&mut self, now: Duration, layout: &impl SlideLayout) -> CarouselDispatch {
        // An unanimated placement cancels whatever animation was running.
        let interrupted = self.flight.take().is_some();
        self.stride.invalidate();
        let mut commands = Vec::new();
        if let Some(position) = self.position.as_mut() {
            let _ = position.correct();
        }
        commands.extend(self.render(false, layout));
        let absolute = self.absolute_index().unwrap_or_default();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "carousel.reposition",
            carousel = self.name,
            absolute,
            stride = ?self.stride.cached(),
            interrupted
        );

        if interrupted && let Some(direction) = self.pending.pop_front() {
            commands.extend(self.apply_step(direction, StepSource::Queued, now, layout).commands);
        }
        CarouselDispatch::new(commands, CarouselOutcome::Repositioned { absolute })
    }

    fn correct(
        &mut self,
        layout: &impl SlideLayout,
        commands: &mut Vec<CarouselCommand>,
    ) -> Option<WrapCorrection> {
        let correction = self.position.as_mut()?.correct()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "carousel.wrap",
            carousel = self.name,
            from = correction.from,
            to = correction.to
        );

        commands.extend(self.render(false, layout));
        Some(correction)
    }

    fn render(&mut self, animated: bool, layout: &impl SlideLayout) -> Option<CarouselCommand> {
        let absolute = self.position?.absolute();
        let stride = self.stride.stride(layout)?;
        let offset = absolute as f32 * stride;
        Some(match self.config.variant {
            RenderVariant::Transform => CarouselCommand::Translate {
                x_px: -offset,
                transition: animated.then(|| TrackTransition {
                    duration_ms: self.config.transition_ms,
                    easing: self.config.easing.clone(),
                }),
            },
            RenderVariant::Scroll => CarouselCommand::ScrollTo {
                left_px: offset,
                smooth: animated,
            },
        })
    }
}
