#![forbid(unsafe_code)]

//! JSON input parser for DOM events encoded by the page's JS glue.
//!
//! [`parse_encoded_input_to_event`] accepts one JSON object per DOM event and
//! returns the corresponding [`HostEvent`]. Elements are named by their ids;
//! region and carousel fields are resolved with [`Region::from_dom_id`] and
//! [`CarouselId::from_dom_id`]. Kinds the page has no use for return
//! `Ok(None)`.
//!
//! ```json
//! {"kind":"click","target":"reviewsNext"}
//! {"kind":"touch_end","target":"reviews-viewport","x":212.5}
//! {"kind":"scroll","y":640}
//! ```

use serde::Deserialize;

use crate::event::{CarouselId, HostEvent, Region};

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Element id that owns no interactive region.
    UnknownTarget(String),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownTarget(id) => write!(f, "unknown target element: {id}"),
        }
    }
}

impl std::error::Error for InputParseError {}

#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    src: Option<String>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y: Option<f32>,
}

/// Parse one JSON-encoded DOM event into a [`HostEvent`].
///
/// Returns `Err` for malformed JSON, missing fields, or a target that does
/// not belong to any region the event kind needs.
pub fn parse_encoded_input_to_event(json: &str) -> Result<Option<HostEvent>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    let event = match raw.kind.as_str() {
        "load" => HostEvent::Load,
        "resize" => HostEvent::Resize,
        "tick" => HostEvent::Tick,
        "scroll" => HostEvent::Scroll {
            y: raw.y.ok_or(InputParseError::MissingField("y"))?,
        },
        "click" => HostEvent::Click {
            target: required(raw.target, "target")?,
        },
        "anchor_click" => HostEvent::AnchorClick {
            href: required(raw.href, "href")?,
        },
        "image_click" => HostEvent::ImageClick {
            src: required(raw.src, "src")?,
        },
        "key" => HostEvent::Key {
            key: required(raw.key, "key")?,
        },
        "touch_start" => HostEvent::TouchStart {
            region: region(&raw)?,
            x: raw.x.ok_or(InputParseError::MissingField("x"))?,
        },
        "touch_end" => HostEvent::TouchEnd {
            region: region(&raw)?,
            x: raw.x.ok_or(InputParseError::MissingField("x"))?,
        },
        "pointer_enter" => HostEvent::PointerEnter {
            region: region(&raw)?,
        },
        "pointer_leave" => HostEvent::PointerLeave {
            region: region(&raw)?,
        },
        "focus_in" => HostEvent::FocusIn {
            region: region(&raw)?,
        },
        "focus_out" => HostEvent::FocusOut {
            region: region(&raw)?,
        },
        "transition_end" => HostEvent::TransitionEnd {
            carousel: carousel(&raw)?,
        },
        "scroll_end" => HostEvent::ScrollEnd {
            carousel: carousel(&raw)?,
        },
        _ => return Ok(None),
    };
    Ok(Some(event))
}

fn required(value: Option<String>, field: &'static str) -> Result<String, InputParseError> {
    value.ok_or(InputParseError::MissingField(field))
}

fn target(raw: &RawInput) -> Result<&str, InputParseError> {
    raw.target
        .as_deref()
        .ok_or(InputParseError::MissingField("target"))
}

fn region(raw: &RawInput) -> Result<Region, InputParseError> {
    let id = target(raw)?;
    Region::from_dom_id(id).ok_or_else(|| InputParseError::UnknownTarget(id.to_owned()))
}

fn carousel(raw: &RawInput) -> Result<CarouselId, InputParseError> {
    let id = target(raw)?;
    CarouselId::from_dom_id(id).ok_or_else(|| InputParseError::UnknownTarget(id.to_owned()))
}
