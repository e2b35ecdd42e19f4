#![forbid(unsafe_code)]

//! Modal image lightbox.
//!
//! The lightbox browses an ordered list of image sources collected by the
//! host. Navigation wraps in both directions; an empty list makes the whole
//! overlay inert.
//!
//! # Invariants
//!
//! 1. `current < images.len()` whenever the list is non-empty.
//! 2. Changing image always clears zoom.
//! 3. Keyboard input is ignored while the overlay is closed.

use crate::config::LightboxConfig;
use crate::swipe::{Direction, SwipeThresholds, SwipeTracker};

/// Keys the lightbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

impl LightboxKey {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "Escape" | "Esc" => Some(Self::Escape),
            "ArrowLeft" | "Left" => Some(Self::ArrowLeft),
            "ArrowRight" | "Right" => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

/// Host command emitted by the lightbox.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum LightboxCommand {
    /// Point the overlay image at `src`.
    ShowImage { src: String },
    /// Toggle the `open` class and set `aria-hidden` to `!open`.
    SetOpen { open: bool },
    /// Toggle the `zoomed` class on the overlay image.
    SetZoomed { zoomed: bool },
    /// Lock (`overflow: hidden`) or restore body scrolling.
    LockBodyScroll { locked: bool },
}

/// Image lightbox state.
#[derive(Debug, Clone)]
pub struct Lightbox {
    images: Vec<String>,
    current: usize,
    open: bool,
    zoomed: bool,
    swipe: SwipeTracker,
}

impl Lightbox {
    /// Create a closed lightbox over `images`.
    #[must_use]
    pub fn new(images: Vec<String>, config: &LightboxConfig) -> Self {
        Self {
            images,
            current: 0,
            open: false,
            zoomed: false,
            swipe: SwipeTracker::new(SwipeThresholds::single(config.swipe_threshold_px)),
        }
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.images.is_empty()
    }

    /// Whether the overlay is visible.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the image is zoomed.
    #[must_use]
    pub const fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    /// Index of the image shown.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Source of the image shown.
    #[must_use]
    pub fn current_source(&self) -> Option<&str> {
        self.images.get(self.current).map(String::as_str)
    }

    /// Open on image `index` (taken modulo the list length).
    pub fn open(&mut self, index: usize) -> Vec<LightboxCommand> {
        let len = self.images.len();
        if len == 0 {
            return Vec::new();
        }
        self.current = index % len;
        self.open = true;

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "lightbox.open", index = self.current, len);

        vec![
            self.show_current(),
            LightboxCommand::SetOpen { open: true },
            LightboxCommand::LockBodyScroll { locked: true },
        ]
    }

    /// Open on the image whose source is `src`; unknown sources do nothing.
    pub fn open_source(&mut self, src: &str) -> Vec<LightboxCommand> {
        match self.images.iter().position(|s| s == src) {
            Some(index) => self.open(index),
            None => Vec::new(),
        }
    }

    /// Hide the overlay and restore page scrolling.
    pub fn close(&mut self) -> Vec<LightboxCommand> {
        if !self.open {
            return Vec::new();
        }
        self.open = false;
        self.swipe.cancel();

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "lightbox.close", index = self.current);

        let mut out = vec![LightboxCommand::SetOpen { open: false }];
        if std::mem::take(&mut self.zoomed) {
            out.push(LightboxCommand::SetZoomed { zoomed: false });
        }
        out.push(LightboxCommand::LockBodyScroll { locked: false });
        out
    }

    /// Show the next image, wrapping to the first.
    pub fn next(&mut self) -> Vec<LightboxCommand> {
        self.step(Direction::Forward)
    }

    /// Show the previous image, wrapping to the last.
    pub fn prev(&mut self) -> Vec<LightboxCommand> {
        self.step(Direction::Backward)
    }

    /// Move one image in `direction`.
    pub fn step(&mut self, direction: Direction) -> Vec<LightboxCommand> {
        let len = self.images.len();
        if len == 0 {
            return Vec::new();
        }
        self.current = match direction {
            Direction::Forward => (self.current + 1) % len,
            Direction::Backward => (self.current + len - 1) % len,
        };
        let mut out = vec![self.show_current()];
        if std::mem::take(&mut self.zoomed) {
            out.push(LightboxCommand::SetZoomed { zoomed: false });
        }
        out
    }

    /// Click on the overlay backdrop (not the image or controls).
    pub fn backdrop_click(&mut self) -> Vec<LightboxCommand> {
        self.close()
    }

    /// Click on the overlay image toggles zoom.
    pub fn image_click(&mut self) -> Vec<LightboxCommand> {
        if !self.open {
            return Vec::new();
        }
        self.zoomed = !self.zoomed;
        vec![LightboxCommand::SetZoomed {
            zoomed: self.zoomed,
        }]
    }

    /// Keyboard input; only honoured while open.
    pub fn key(&mut self, key: LightboxKey) -> Vec<LightboxCommand> {
        if !self.open {
            return Vec::new();
        }
        match key {
            LightboxKey::Escape => self.close(),
            LightboxKey::ArrowRight => self.next(),
            LightboxKey::ArrowLeft => self.prev(),
        }
    }

    /// Finger down on the overlay.
    pub fn touch_start(&mut self, x: f32) {
        self.swipe.start(x);
    }

    /// Finger up on the overlay; swipes flip images.
    pub fn touch_end(&mut self, x: f32) -> Vec<LightboxCommand> {
        match self.swipe.end(x).direction() {
            Some(direction) => self.step(direction),
            None => Vec::new(),
        }
    }

    fn show_current(&self) -> LightboxCommand {
        LightboxCommand::ShowImage {
            src: self.images[self.current].clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lightbox(n: usize) -> Lightbox {
        let images = (0..n).map(|i| format!("img/{i}.jpg")).collect();
        Lightbox::new(images, &LightboxConfig::default())
    }

    fn show(i: usize) -> LightboxCommand {
        LightboxCommand::ShowImage {
            src: format!("img/{i}.jpg"),
        }
    }

    #[test]
    fn open_shows_image_and_locks_scroll() {
        let mut lb = lightbox(3);
        assert_eq!(
            lb.open(4),
            vec![
                show(1),
                LightboxCommand::SetOpen { open: true },
                LightboxCommand::LockBodyScroll { locked: true },
            ]
        );
        assert!(lb.is_open());
        assert_eq!(lb.current_source(), Some("img/1.jpg"));
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut lb = lightbox(3);
        lb.open(0);
        assert_eq!(lb.prev(), vec![show(2)]);
        assert_eq!(lb.next(), vec![show(0)]);
        assert_eq!(lb.next(), vec![show(1)]);
    }

    #[test]
    fn empty_lightbox_is_inert() {
        let mut lb = lightbox(0);
        assert!(lb.is_inert());
        assert!(lb.open(0).is_empty());
        assert!(lb.next().is_empty());
        assert!(!lb.is_open());
    }

    #[test]
    fn open_by_source() {
        let mut lb = lightbox(4);
        assert_eq!(lb.open_source("img/3.jpg")[0], show(3));
        lb.close();
        assert!(lb.open_source("img/missing.jpg").is_empty());
        assert!(!lb.is_open());
    }

    #[test]
    fn zoom_toggles_and_clears_on_navigation_and_close() {
        let mut lb = lightbox(2);
        assert!(lb.image_click().is_empty());
        lb.open(0);
        assert_eq!(lb.image_click(), vec![LightboxCommand::SetZoomed { zoomed: true }]);
        assert_eq!(
            lb.next(),
            vec![show(1), LightboxCommand::SetZoomed { zoomed: false }]
        );
        lb.image_click();
        assert_eq!(
            lb.close(),
            vec![
                LightboxCommand::SetOpen { open: false },
                LightboxCommand::SetZoomed { zoomed: false },
                LightboxCommand::LockBodyScroll { locked: false },
            ]
        );
        assert!(lb.close().is_empty());
    }

    #[test]
    fn keys_only_while_open() {
        let mut lb = lightbox(3);
        assert!(lb.key(LightboxKey::ArrowRight).is_empty());
        lb.open(0);
        assert_eq!(lb.key(LightboxKey::ArrowRight), vec![show(1)]);
        assert_eq!(lb.key(LightboxKey::ArrowLeft), vec![show(0)]);
        lb.key(LightboxKey::Escape);
        assert!(!lb.is_open());
        assert_eq!(LightboxKey::from_dom_key("Enter"), None);
    }

    #[test]
    fn swipe_flips_images() {
        let mut lb = lightbox(3);
        lb.open(0);
        lb.touch_start(300.0);
        assert_eq!(lb.touch_end(200.0), vec![show(1)]);
        lb.touch_start(200.0);
        assert!(lb.touch_end(240.0).is_empty());
        lb.touch_start(200.0);
        assert_eq!(lb.touch_end(260.0), vec![show(0)]);
    }
}
