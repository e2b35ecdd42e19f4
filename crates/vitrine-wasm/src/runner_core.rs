#![forbid(unsafe_code)]

//! Platform-independent runner core wrapping [`WebSession`].
//!
//! This module contains the logic shared between the wasm-bindgen exports
//! and the native test harness. No JS/WASM types here.

use core::time::Duration;

use vitrine_core::VitrineConfig;
use vitrine_core::carousel::SlideMetrics;
use vitrine_core::config::ConfigError;
use vitrine_web::input_parser::parse_encoded_input_to_event;
use vitrine_web::{CarouselId, HostCommand, MeasuredLayout, PageManifest, WebSession};

/// Why a runner could not be constructed.
#[derive(Debug)]
pub enum RunnerError {
    /// The page manifest JSON did not parse.
    Manifest(String),
    /// The configuration JSON did not parse or validate.
    Config(ConfigError),
}

impl core::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Manifest(msg) => write!(f, "manifest parse error: {msg}"),
            Self::Config(err) => write!(f, "config error: {err}"),
        }
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Manifest(_) => None,
            Self::Config(err) => Some(err),
        }
    }
}

/// Platform-independent page runner.
pub struct RunnerCore {
    session: WebSession,
    layout: MeasuredLayout,
    logs: Vec<String>,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl RunnerCore {
    /// Create a runner for `manifest` with explicit configuration.
    #[must_use]
    pub fn new(manifest: PageManifest, config: &VitrineConfig) -> Self {
        Self {
            session: WebSession::new(manifest, config),
            layout: MeasuredLayout::new(),
            logs: Vec::new(),
        }
    }

    /// Create a runner from a JSON manifest and optional JSON configuration.
    pub fn from_json(manifest_json: &str, config_json: Option<&str>) -> Result<Self, RunnerError> {
        let manifest: PageManifest = serde_json::from_str(manifest_json)
            .map_err(|e| RunnerError::Manifest(e.to_string()))?;
        let config = match config_json {
            Some(json) => VitrineConfig::from_json_str(json)
                .and_then(VitrineConfig::validated)
                .map_err(RunnerError::Config)?,
            None => VitrineConfig::default(),
        };
        Ok(Self::new(manifest, &config))
    }

    /// Advance the clock by `dt_ms` milliseconds.
    pub fn advance_time_ms(&mut self, dt_ms: f64) {
        // Host input can be noisy (NaN/inf/negative spikes).
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        let max_secs = Duration::MAX.as_secs_f64();
        let secs = (dt_ms / 1000.0).min(max_secs);
        let duration = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        self.session.clock_mut().advance(duration);
    }

    /// Set the clock to absolute milliseconds since page start.
    pub fn set_time_ms(&mut self, ts_ms: f64) {
        let secs = if !ts_ms.is_finite() || ts_ms <= 0.0 {
            0.0
        } else {
            (ts_ms / 1000.0).min(Duration::MAX.as_secs_f64())
        };
        let duration = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        self.session.clock_mut().set(duration);
    }

    /// Current clock value in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.session.clock().now().as_secs_f64() * 1000.0
    }

    /// Parse a JSON-encoded DOM event and queue it.
    /// Returns `true` if accepted, `false` if unsupported/malformed.
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        match parse_encoded_input_to_event(json) {
            Ok(Some(event)) => {
                self.session.push_event(event);
                true
            }
            Ok(None) => false,
            Err(err) => {
                self.logs.push(format!("input_parse_error: {err}"));
                false
            }
        }
    }

    /// Record the live slide metrics of the carousel owning element `id`.
    /// Returns `false` for unknown ids or unusable numbers.
    pub fn set_slide_metrics(&mut self, id: &str, width: f64, gap: f64) -> bool {
        let Some(carousel) = CarouselId::from_dom_id(id) else {
            return false;
        };
        if !width.is_finite() || width <= 0.0 {
            self.layout.set(carousel, None);
            return false;
        }
        let gap = if gap.is_finite() { gap.max(0.0) } else { 0.0 };
        self.layout
            .set(carousel, Some(SlideMetrics::new(width as f32, gap as f32)));
        true
    }

    /// Forget the metrics of the carousel owning element `id`.
    pub fn clear_slide_metrics(&mut self, id: &str) -> bool {
        let Some(carousel) = CarouselId::from_dom_id(id) else {
            return false;
        };
        self.layout.set(carousel, None);
        true
    }

    /// Process queued events and due timers.
    pub fn step(&mut self) -> Vec<HostCommand> {
        self.session.step(&self.layout)
    }

    /// [`step`](Self::step), encoded as a JSON array.
    pub fn step_json(&mut self) -> String {
        let commands = self.step();
        match serde_json::to_string(&commands) {
            Ok(json) => json,
            Err(err) => {
                self.logs.push(format!("command_encode_error: {err}"));
                "[]".to_owned()
            }
        }
    }

    /// Milliseconds until the next timer is due; `None` when nothing is scheduled.
    pub fn next_deadline_ms(&self) -> Option<f64> {
        let deadline = self.session.next_deadline()?;
        let wait = deadline.saturating_sub(self.session.clock().now());
        Some(wait.as_secs_f64() * 1000.0)
    }

    /// Events queued for the next step.
    pub fn pending_events(&self) -> usize {
        self.session.pending_events()
    }

    /// Drain diagnostic log lines.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    /// The underlying session.
    pub fn session(&self) -> &WebSession {
        &self.session
    }
}
