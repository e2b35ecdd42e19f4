#![forbid(unsafe_code)]

//! Description of the document the page is attached to.
//!
//! The host scans the DOM once and reports which ids exist, how many slides
//! each carousel holds and which image sources the lightbox can browse. Every
//! feature is gated on the presence of its elements here.

use std::collections::BTreeSet;

use crate::event::ids;

/// Snapshot of the host document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageManifest {
    /// Ids of every element on the page (anchor targets included).
    pub elements: BTreeSet<String>,
    /// Original slides in `carouselTrack`.
    pub gallery_slides: usize,
    /// Original cards in `reviewsTrack`.
    pub review_slides: usize,
    /// Slides in `heroCarousel`.
    pub hero_slides: usize,
    /// Ordered image sources for the lightbox.
    pub images: Vec<String>,
    /// Whether the host delivers `scrollend` for scroll containers.
    pub scroll_end_supported: bool,
    /// Current calendar year for the footer.
    pub year: Option<i32>,
}

impl PageManifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add element ids.
    #[must_use]
    pub fn with_elements<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elements.extend(elements.into_iter().map(Into::into));
        self
    }

    /// Set the gallery slide count.
    #[must_use]
    pub fn with_gallery_slides(mut self, count: usize) -> Self {
        self.gallery_slides = count;
        self
    }

    /// Set the review card count.
    #[must_use]
    pub fn with_review_slides(mut self, count: usize) -> Self {
        self.review_slides = count;
        self
    }

    /// Set the hero slide count.
    #[must_use]
    pub fn with_hero_slides(mut self, count: usize) -> Self {
        self.hero_slides = count;
        self
    }

    /// Set the lightbox image list.
    #[must_use]
    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_scroll_end(mut self, supported: bool) -> Self {
        self.scroll_end_supported = supported;
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Whether element `id` exists.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    fn has_all(&self, required: &[&str]) -> bool {
        required.iter().all(|id| self.has(id))
    }

    pub(crate) fn has_nav(&self) -> bool {
        self.has(ids::NAV)
    }

    pub(crate) fn has_nav_toggle(&self) -> bool {
        self.has(ids::NAV_TOGGLE)
    }

    pub(crate) fn has_header(&self) -> bool {
        self.has(ids::HEADER)
    }

    pub(crate) fn has_lightbox(&self) -> bool {
        self.has_all(&[ids::LIGHTBOX, ids::LB_IMAGE])
    }

    pub(crate) fn has_gallery(&self) -> bool {
        self.has(ids::GALLERY_TRACK)
    }

    pub(crate) fn has_reviews(&self) -> bool {
        self.has_all(&[
            ids::REVIEWS_TRACK,
            ids::REVIEWS_VIEWPORT,
            ids::REVIEWS_PREV,
            ids::REVIEWS_NEXT,
        ])
    }

    pub(crate) fn has_hero(&self) -> bool {
        self.has(ids::HERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reviews_need_all_four_elements() {
        let partial = PageManifest::new().with_elements([
            ids::REVIEWS_TRACK,
            ids::REVIEWS_VIEWPORT,
            ids::REVIEWS_NEXT,
        ]);
        assert!(!partial.has_reviews());
        assert!(partial.with_elements([ids::REVIEWS_PREV]).has_reviews());
    }

    #[test]
    fn lightbox_needs_overlay_and_image() {
        let m = PageManifest::new().with_elements([ids::LIGHTBOX]);
        assert!(!m.has_lightbox());
        assert!(m.with_elements([ids::LB_IMAGE]).has_lightbox());
    }
}
