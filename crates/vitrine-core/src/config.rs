#![forbid(unsafe_code)]

//! Tunable parameters for every interaction machine.
//!
//! [`VitrineConfig`] groups the carousel, lightbox, header and hero settings
//! into a single value that can be loaded from TOML or JSON (behind the
//! `config` feature).
//!
//! ```toml
//! # vitrine.toml
//! [gallery]
//! autoplay_period_ms = 6000
//!
//! [reviews]
//! in_flight = "queue"
//! max_queued_steps = 2
//! ```
//!
//! # Defaults
//!
//! Every default equals the constant hard-wired in the page script the
//! machines replace, so `VitrineConfig::default()` reproduces the shipped
//! behavior.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

use crate::carousel::RenderVariant;
use crate::swipe::SwipeThresholds;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// All tunables for one page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VitrineConfig {
    /// Transform-based gallery carousel.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "patch::gallery"))]
    pub gallery: CarouselConfig,
    /// Scroll-based reviews carousel.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "patch::reviews"))]
    pub reviews: CarouselConfig,
    /// Image lightbox.
    pub lightbox: LightboxConfig,
    /// Shrinking header.
    pub header: HeaderConfig,
    /// Rotating hero slides.
    pub hero: HeroConfig,
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self {
            gallery: CarouselConfig::gallery(),
            reviews: CarouselConfig::reviews(),
            lightbox: LightboxConfig::default(),
            header: HeaderConfig::default(),
            hero: HeroConfig::default(),
        }
    }
}

impl VitrineConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of messages; an empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        self.gallery.validate_into("gallery", &mut errors);
        self.reviews.validate_into("reviews", &mut errors);

        if !(self.lightbox.swipe_threshold_px.is_finite() && self.lightbox.swipe_threshold_px >= 0.0)
        {
            errors.push(format!(
                "lightbox.swipe_threshold_px must be finite and >= 0, got {}",
                self.lightbox.swipe_threshold_px
            ));
        }
        if !(self.header.shrink_threshold_px.is_finite() && self.header.shrink_threshold_px >= 0.0)
        {
            errors.push(format!(
                "header.shrink_threshold_px must be finite and >= 0, got {}",
                self.header.shrink_threshold_px
            ));
        }
        if self.hero.period_ms == 0 {
            errors.push("hero.period_ms must be > 0".into());
        }
        errors
    }

    /// Validate, turning any messages into a [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

/// What to do with a step requested while an animated step is still moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InFlightPolicy {
    /// Drop the request.
    #[default]
    Reject,
    /// Hold it (up to `max_queued_steps`) and apply it after the next settle.
    Queue,
}

/// Settings for one looping carousel.
///
/// When deserialized as part of [`VitrineConfig`], a partial table is layered
/// over the preset for that slot ([`CarouselConfig::gallery`] or
/// [`CarouselConfig::reviews`]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CarouselConfig {
    /// How positions are applied to the track.
    pub variant: RenderVariant,
    /// Touch-swipe limits.
    pub swipe: SwipeThresholds,
    /// Whether the carousel advances on its own.
    pub autoplay: bool,
    /// Autoplay period.
    pub autoplay_period_ms: u64,
    /// Duration of an animated step (transform variant transition).
    pub transition_ms: u64,
    /// CSS timing function for animated transform steps.
    pub easing: String,
    /// Gap between slides; `None` means "measure it from layout".
    pub fixed_gap_px: Option<f32>,
    /// Slide width used when no slide can be measured.
    pub fallback_slide_width_px: Option<f32>,
    /// Fallback settle delay for hosts without a completion signal.
    pub settle_fallback_ms: Option<u64>,
    /// Slack past `transition_ms` after which a step whose completion signal
    /// never arrived is settled anyway. Unused when `settle_fallback_ms` is set.
    pub settle_grace_ms: u64,
    /// Delay between a resize and re-measuring the track.
    pub layout_settle_ms: u64,
    /// Delay between cloning the slides and the first placement.
    pub initial_layout_settle_ms: u64,
    /// Handling of steps requested mid-animation.
    pub in_flight: InFlightPolicy,
    /// Queue bound when `in_flight` is [`InFlightPolicy::Queue`].
    pub max_queued_steps: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::gallery()
    }
}

impl CarouselConfig {
    /// The transform-based gallery carousel.
    #[must_use]
    pub fn gallery() -> Self {
        Self {
            variant: RenderVariant::Transform,
            swipe: SwipeThresholds::single(50.0),
            autoplay: true,
            autoplay_period_ms: 4_000,
            transition_ms: 500,
            easing: "cubic-bezier(0.4, 0, 0.2, 1)".into(),
            fixed_gap_px: None,
            fallback_slide_width_px: None,
            settle_fallback_ms: None,
            settle_grace_ms: 250,
            layout_settle_ms: 120,
            initial_layout_settle_ms: 120,
            in_flight: InFlightPolicy::Reject,
            max_queued_steps: 0,
        }
    }

    /// The scroll-based reviews carousel.
    #[must_use]
    pub fn reviews() -> Self {
        Self {
            variant: RenderVariant::Scroll,
            swipe: SwipeThresholds::dual(30.0, 50.0),
            autoplay: false,
            autoplay_period_ms: 4_000,
            transition_ms: 500,
            easing: "ease".into(),
            fixed_gap_px: Some(20.0),
            fallback_slide_width_px: Some(280.0),
            settle_fallback_ms: Some(500),
            settle_grace_ms: 250,
            layout_settle_ms: 120,
            initial_layout_settle_ms: 80,
            in_flight: InFlightPolicy::Reject,
            max_queued_steps: 0,
        }
    }

    /// Autoplay period as a [`Duration`].
    #[must_use]
    pub const fn autoplay_period(&self) -> Duration {
        Duration::from_millis(self.autoplay_period_ms)
    }

    /// Step animation length as a [`Duration`].
    #[must_use]
    pub const fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Fallback settle delay, if armed.
    #[must_use]
    pub fn settle_fallback(&self) -> Option<Duration> {
        self.settle_fallback_ms.map(Duration::from_millis)
    }

    /// Longest an animated step may stay unsettled: the fallback delay when
    /// armed, otherwise the transition plus the grace period.
    #[must_use]
    pub fn settle_deadline(&self) -> Duration {
        self.settle_fallback().unwrap_or_else(|| {
            self.transition()
                .saturating_add(Duration::from_millis(self.settle_grace_ms))
        })
    }

    /// Resize re-measure delay.
    #[must_use]
    pub const fn layout_settle(&self) -> Duration {
        Duration::from_millis(self.layout_settle_ms)
    }

    /// Initial placement delay.
    #[must_use]
    pub const fn initial_layout_settle(&self) -> Duration {
        Duration::from_millis(self.initial_layout_settle_ms)
    }

    fn validate_into(&self, name: &str, errors: &mut Vec<String>) {
        let SwipeThresholds { tap, step } = self.swipe;
        if !(tap.is_finite() && step.is_finite() && tap >= 0.0 && step >= 0.0) {
            errors.push(format!(
                "{name}.swipe thresholds must be finite and >= 0, got tap={tap} step={step}"
            ));
        } else if tap > step {
            errors.push(format!(
                "{name}.swipe.tap ({tap}) must not exceed {name}.swipe.step ({step})"
            ));
        }
        if self.autoplay && self.autoplay_period_ms == 0 {
            errors.push(format!("{name}.autoplay_period_ms must be > 0"));
        }
        if self.transition_ms == 0 {
            errors.push(format!("{name}.transition_ms must be > 0"));
        }
        if let Some(gap) = self.fixed_gap_px
            && !(gap.is_finite() && gap >= 0.0)
        {
            errors.push(format!("{name}.fixed_gap_px must be finite and >= 0, got {gap}"));
        }
        if let Some(width) = self.fallback_slide_width_px
            && !(width.is_finite() && width > 0.0)
        {
            errors.push(format!(
                "{name}.fallback_slide_width_px must be finite and > 0, got {width}"
            ));
        }
        if self.settle_fallback_ms == Some(0) {
            errors.push(format!("{name}.settle_fallback_ms must be > 0 when set"));
        }
        if self.in_flight == InFlightPolicy::Queue && self.max_queued_steps == 0 {
            errors.push(format!(
                "{name}.max_queued_steps must be > 0 when in_flight = \"queue\""
            ));
        }
    }
}

#[cfg(feature = "serde")]
mod patch {
    use serde::{Deserialize, Deserializer};

    use super::{CarouselConfig, InFlightPolicy};
    use crate::carousel::RenderVariant;
    use crate::swipe::SwipeThresholds;

    /// Field-by-field overrides for a carousel preset.
    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct CarouselPatch {
        variant: Option<RenderVariant>,
        swipe: Option<SwipeThresholds>,
        autoplay: Option<bool>,
        autoplay_period_ms: Option<u64>,
        transition_ms: Option<u64>,
        easing: Option<String>,
        fixed_gap_px: Option<f32>,
        fallback_slide_width_px: Option<f32>,
        settle_fallback_ms: Option<u64>,
        settle_grace_ms: Option<u64>,
        layout_settle_ms: Option<u64>,
        initial_layout_settle_ms: Option<u64>,
        in_flight: Option<InFlightPolicy>,
        max_queued_steps: Option<usize>,
    }

    impl CarouselPatch {
        fn apply(self, mut base: CarouselConfig) -> CarouselConfig {
            if let Some(v) = self.variant {
                base.variant = v;
            }
            if let Some(v) = self.swipe {
                base.swipe = v;
            }
            if let Some(v) = self.autoplay {
                base.autoplay = v;
            }
            if let Some(v) = self.autoplay_period_ms {
                base.autoplay_period_ms = v;
            }
            if let Some(v) = self.transition_ms {
                base.transition_ms = v;
            }
            if let Some(v) = self.easing {
                base.easing = v;
            }
            if self.fixed_gap_px.is_some() {
                base.fixed_gap_px = self.fixed_gap_px;
            }
            if self.fallback_slide_width_px.is_some() {
                base.fallback_slide_width_px = self.fallback_slide_width_px;
            }
            if self.settle_fallback_ms.is_some() {
                base.settle_fallback_ms = self.settle_fallback_ms;
            }
            if let Some(v) = self.settle_grace_ms {
                base.settle_grace_ms = v;
            }
            if let Some(v) = self.layout_settle_ms {
                base.layout_settle_ms = v;
            }
            if let Some(v) = self.initial_layout_settle_ms {
                base.initial_layout_settle_ms = v;
            }
            if let Some(v) = self.in_flight {
                base.in_flight = v;
            }
            if let Some(v) = self.max_queued_steps {
                base.max_queued_steps = v;
            }
            base
        }
    }

    pub(super) fn gallery<'de, D: Deserializer<'de>>(d: D) -> Result<CarouselConfig, D::Error> {
        Ok(CarouselPatch::deserialize(d)?.apply(CarouselConfig::gallery()))
    }

    pub(super) fn reviews<'de, D: Deserializer<'de>>(d: D) -> Result<CarouselConfig, D::Error> {
        Ok(CarouselPatch::deserialize(d)?.apply(CarouselConfig::reviews()))
    }
}

// ---------------------------------------------------------------------------
// Page chrome
// ---------------------------------------------------------------------------

/// Lightbox settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LightboxConfig {
    /// Swipe distance that flips to the next/previous image.
    pub swipe_threshold_px: f32,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 50.0,
        }
    }
}

/// Header shrink settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeaderConfig {
    /// Vertical scroll past which the header is `scrolled`.
    pub shrink_threshold_px: f32,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            shrink_threshold_px: 50.0,
        }
    }
}

/// Hero rotator settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeroConfig {
    /// Time each hero slide stays active.
    pub period_ms: u64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self { period_ms: 4_000 }
    }
}

impl HeroConfig {
    /// Rotation period as a [`Duration`].
    #[must_use]
    pub const fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating a [`VitrineConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
