#![forbid(unsafe_code)]

//! Header that shrinks once the page is scrolled.

use crate::config::HeaderConfig;

/// Tracks the header's `scrolled` class.
#[derive(Debug, Clone)]
pub struct HeaderShrink {
    threshold: f32,
    scrolled: bool,
}

impl HeaderShrink {
    #[must_use]
    pub const fn new(config: &HeaderConfig) -> Self {
        Self {
            threshold: config.shrink_threshold_px,
            scrolled: false,
        }
    }

    /// Whether the header currently carries `scrolled`.
    #[must_use]
    pub const fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Window scrolled to `scroll_y`. Returns the new state only if it changed.
    pub fn on_scroll(&mut self, scroll_y: f32) -> Option<bool> {
        let scrolled = scroll_y > self.threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_past_threshold_only_on_change() {
        let mut header = HeaderShrink::new(&HeaderConfig::default());
        assert_eq!(header.on_scroll(50.0), None);
        assert_eq!(header.on_scroll(50.5), Some(true));
        assert_eq!(header.on_scroll(400.0), None);
        assert_eq!(header.on_scroll(0.0), Some(false));
        assert!(!header.is_scrolled());
    }
}
