#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the SiteRunner.
//!
//! This module wraps [`super::runner_core::RunnerCore`] with JS-friendly types.
//! Only compiled on `wasm32` targets.

use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_time::Instant;

use super::runner_core::RunnerCore;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// Page runner for a Vitrine site.
///
/// Host-driven: the JS glue forwards DOM events as JSON, pushes slide
/// measurements, calls `step` and applies the returned commands, then sleeps
/// until `nextDeadlineMs`.
#[wasm_bindgen]
pub struct SiteRunner {
    inner: RunnerCore,
    origin: Instant,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl SiteRunner {
    /// Create a runner from the page manifest JSON and optional config JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(manifest_json: &str, config_json: Option<String>) -> Result<SiteRunner, JsValue> {
        install_panic_hook();
        let inner = RunnerCore::from_json(manifest_json, config_json.as_deref())
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Self {
            inner,
            origin: Instant::now(),
        })
    }

    /// Parse a JSON-encoded DOM event and queue it.
    /// Returns `true` if accepted, `false` if unsupported/malformed.
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        self.inner.push_encoded_input(json)
    }

    /// Record slide width and track gap for the carousel owning element `id`.
    #[wasm_bindgen(js_name = setSlideMetrics)]
    pub fn set_slide_metrics(&mut self, id: &str, width: f64, gap: f64) -> bool {
        self.inner.set_slide_metrics(id, width, gap)
    }

    /// Forget the measurements of the carousel owning element `id`.
    #[wasm_bindgen(js_name = clearSlideMetrics)]
    pub fn clear_slide_metrics(&mut self, id: &str) -> bool {
        self.inner.clear_slide_metrics(id)
    }

    /// Set the clock to absolute milliseconds (replay mode).
    #[wasm_bindgen(js_name = setTime)]
    pub fn set_time(&mut self, ts_ms: f64) {
        self.inner.set_time_ms(ts_ms);
    }

    /// Sync the clock to wall time, process queued events and due timers.
    /// Returns the host commands as a JSON array string.
    pub fn step(&mut self) -> String {
        let elapsed = self.origin.elapsed().as_secs_f64() * 1000.0;
        self.inner.set_time_ms(elapsed);
        self.step_at_current_time()
    }

    /// Process queued events without touching the clock.
    #[wasm_bindgen(js_name = stepAtCurrentTime)]
    pub fn step_at_current_time(&mut self) -> String {
        let json = self.inner.step_json();
        for line in self.inner.take_logs() {
            console_error(&line);
        }
        json
    }

    /// Milliseconds until the runner wants another `step`, if ever.
    #[wasm_bindgen(js_name = nextDeadlineMs)]
    pub fn next_deadline_ms(&self) -> Option<f64> {
        self.inner.next_deadline_ms()
    }
}
