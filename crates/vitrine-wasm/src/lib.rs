#![forbid(unsafe_code)]

//! WASM site runner for Vitrine pages.
//!
//! This crate provides [`SiteRunner`], a `wasm-bindgen`-exported struct that
//! wraps `vitrine_web::WebSession` and exposes it to JavaScript for
//! host-driven execution: JSON events in, JSON host commands out.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::SiteRunner;

// Runner core is used by the wasm module and by native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod runner_core;

#[cfg(test)]
mod tests {
    use crate::runner_core::{RunnerCore, RunnerError};
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = r#"{
        "elements": ["carouselTrack", "carouselPrev", "carouselNext", "galleryCarousel",
                     "header", "nav", "navToggle", "year", "contact"],
        "gallery_slides": 3,
        "year": 2026
    }"#;

    fn commands(json: &str) -> Vec<serde_json::Value> {
        serde_json::from_str::<serde_json::Value>(json)
            .expect("commands should be a JSON value")
            .as_array()
            .cloned()
            .expect("commands should be an array")
    }

    fn runner() -> RunnerCore {
        RunnerCore::from_json(MANIFEST, None).expect("manifest should parse")
    }

    #[test]
    fn runner_core_init_sets_year() {
        let mut core = runner();
        let out = commands(&core.step_json());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["target"], "set_text");
        assert_eq!(out[0]["text"], "2026");
    }

    #[test]
    fn runner_core_load_clones_and_places_gallery() {
        let mut core = runner();
        assert!(core.set_slide_metrics("carouselTrack", 640.0, 0.0));
        assert!(core.push_encoded_input(r#"{"kind":"load"}"#));
        let boot = commands(&core.step_json());
        let clone = boot
            .iter()
            .find(|c| c["target"] == "carousel")
            .expect("clone command");
        assert_eq!(clone["carousel"], "gallery");
        assert_eq!(clone["command"]["kind"], "clone_slides");
        assert_eq!(clone["command"]["ops"].as_array().map(Vec::len), Some(6));

        assert_eq!(core.next_deadline_ms(), Some(120.0));
        core.advance_time_ms(120.0);
        let placed = commands(&core.step_json());
        assert_eq!(placed[0]["command"]["kind"], "translate");
        assert_eq!(placed[0]["command"]["x_px"], -1920.0);
        assert!(placed[0]["command"]["transition"].is_null());
    }

    #[test]
    fn runner_core_next_click_animates() {
        let mut core = runner();
        core.set_slide_metrics("galleryCarousel", 500.0, 10.0);
        core.push_encoded_input(r#"{"kind":"load"}"#);
        core.step_json();
        core.set_time_ms(120.0);
        core.step_json();
        core.set_time_ms(1_000.0);
        core.push_encoded_input(r#"{"kind":"click","target":"carouselNext"}"#);
        let out = commands(&core.step_json());
        let step = out.last().expect("step command");
        assert_eq!(step["command"]["x_px"], -2040.0);
        assert_eq!(step["command"]["transition"]["duration_ms"], 500);
    }

    #[test]
    fn runner_core_ignores_absurd_slide_count() {
        let manifest = r#"{
            "elements": ["carouselTrack", "carouselNext"],
            "gallery_slides": 1000000000000
        }"#;
        let mut core = RunnerCore::from_json(manifest, None).expect("manifest should parse");
        core.step_json();
        core.push_encoded_input(r#"{"kind":"load"}"#);
        assert_eq!(commands(&core.step_json()), Vec::<serde_json::Value>::new());
        core.push_encoded_input(r#"{"kind":"click","target":"carouselNext"}"#);
        assert_eq!(commands(&core.step_json()), Vec::<serde_json::Value>::new());
        assert_eq!(core.next_deadline_ms(), None);
    }

    #[test]
    fn runner_core_rejects_bad_input() {
        let mut core = runner();
        assert!(!core.push_encoded_input("not json"));
        assert!(!core.push_encoded_input(r#"{"kind":"visibility"}"#));
        assert!(!core.push_encoded_input(r#"{"kind":"touch_start","target":"footer","x":1}"#));
        assert_eq!(core.pending_events(), 0);
        let logs = core.take_logs();
        assert_eq!(logs.len(), 2, "{logs:?}");
        assert!(logs[0].starts_with("input_parse_error"));
    }

    #[test]
    fn runner_core_time_ignores_invalid_inputs() {
        let mut core = runner();
        core.set_time_ms(500.0);
        core.advance_time_ms(f64::NAN);
        core.advance_time_ms(-3.0);
        core.set_time_ms(f64::NEG_INFINITY);
        assert_eq!(core.now_ms(), 500.0);
        core.advance_time_ms(250.0);
        assert_eq!(core.now_ms(), 750.0);
    }

    #[test]
    fn runner_core_metrics_require_known_target() {
        let mut core = runner();
        assert!(!core.set_slide_metrics("footer", 100.0, 0.0));
        assert!(!core.set_slide_metrics("carouselTrack", f64::NAN, 0.0));
        assert!(core.clear_slide_metrics("reviews-viewport"));
    }

    #[test]
    fn runner_core_config_overrides_and_errors() {
        let core = RunnerCore::from_json(MANIFEST, Some(r#"{"hero":{"period_ms":6000}}"#));
        assert!(core.is_ok());

        let invalid = RunnerCore::from_json(MANIFEST, Some(r#"{"gallery":{"transition_ms":0}}"#));
        assert!(matches!(invalid, Err(RunnerError::Config(_))));

        let broken = RunnerCore::from_json("[", None);
        assert!(matches!(broken, Err(RunnerError::Manifest(_))));
    }
}
