#![forbid(unsafe_code)]

//! Canonical host events and the commands the page returns.
//!
//! Events name DOM elements by their well-known ids ([`ids`]); commands name
//! the component they drive and carry that component's own command type.

use vitrine_core::carousel::CarouselCommand;
use vitrine_core::lightbox::LightboxCommand;
use vitrine_core::nav::NavCommand;

/// Well-known element ids the page binds to.
pub mod ids {
    pub const NAV: &str = "nav";
    pub const NAV_TOGGLE: &str = "navToggle";
    pub const HEADER: &str = "header";
    pub const LIGHTBOX: &str = "lightbox";
    pub const LB_IMAGE: &str = "lbImage";
    pub const LB_CLOSE: &str = "lbClose";
    pub const LB_PREV: &str = "lbPrev";
    pub const LB_NEXT: &str = "lbNext";
    pub const GALLERY_TRACK: &str = "carouselTrack";
    pub const GALLERY_PREV: &str = "carouselPrev";
    pub const GALLERY_NEXT: &str = "carouselNext";
    pub const GALLERY: &str = "galleryCarousel";
    pub const REVIEWS_TRACK: &str = "reviewsTrack";
    pub const REVIEWS_VIEWPORT: &str = "reviews-viewport";
    pub const REVIEWS_PREV: &str = "reviewsPrev";
    pub const REVIEWS_NEXT: &str = "reviewsNext";
    pub const HERO: &str = "heroCarousel";
    pub const YEAR: &str = "year";
}

/// One of the two looping carousels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CarouselId {
    /// Photo gallery; transform variant on `carouselTrack`.
    Gallery,
    /// Review cards; scroll variant on `reviews-viewport`.
    Reviews,
}

impl CarouselId {
    /// Resolve the carousel that owns element `id`.
    #[must_use]
    pub fn from_dom_id(id: &str) -> Option<Self> {
        match id {
            ids::GALLERY | ids::GALLERY_TRACK => Some(Self::Gallery),
            ids::REVIEWS_TRACK | ids::REVIEWS_VIEWPORT => Some(Self::Reviews),
            _ => None,
        }
    }
}

/// Area that receives pointer, focus and touch events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Region {
    Carousel(CarouselId),
    Lightbox,
    Hero,
}

impl Region {
    /// Resolve the region that owns element `id`.
    #[must_use]
    pub fn from_dom_id(id: &str) -> Option<Self> {
        match id {
            ids::LIGHTBOX | ids::LB_IMAGE => Some(Self::Lightbox),
            ids::HERO => Some(Self::Hero),
            other => CarouselId::from_dom_id(other).map(Self::Carousel),
        }
    }
}

/// Canonical DOM event pushed by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Window `load`: layout is final, carousels may clone.
    Load,
    /// Window `resize`.
    Resize,
    /// Window scrolled to `y`.
    Scroll { y: f32 },
    /// Click whose target element has id `target`.
    Click { target: String },
    /// Click on an `<a>` with this `href`.
    AnchorClick { href: String },
    /// Click on a gallery or card image with this source.
    ImageClick { src: String },
    /// `keydown` with this `KeyboardEvent.key`.
    Key { key: String },
    TouchStart { region: Region, x: f32 },
    TouchEnd { region: Region, x: f32 },
    PointerEnter { region: Region },
    PointerLeave { region: Region },
    FocusIn { region: Region },
    FocusOut { region: Region },
    /// `transitionend` on a carousel track.
    TransitionEnd { carousel: CarouselId },
    /// `scrollend` on a carousel viewport.
    ScrollEnd { carousel: CarouselId },
    /// Timer wake-up; the page runs whatever is due.
    Tick,
}

/// Command for the host to apply to the document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "target", rename_all = "snake_case"))]
pub enum HostCommand {
    Carousel {
        carousel: CarouselId,
        command: CarouselCommand,
    },
    Lightbox {
        command: LightboxCommand,
    },
    Nav {
        command: NavCommand,
    },
    /// Toggle `scrolled` on the header.
    SetHeaderScrolled { scrolled: bool },
    /// Move `active` to hero slide `index`.
    HeroActivate { index: usize },
    /// Replace the text content of element `element`.
    SetText { element: String, text: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_ids_resolve_to_regions() {
        assert_eq!(
            Region::from_dom_id("reviews-viewport"),
            Some(Region::Carousel(CarouselId::Reviews))
        );
        assert_eq!(
            Region::from_dom_id("galleryCarousel"),
            Some(Region::Carousel(CarouselId::Gallery))
        );
        assert_eq!(Region::from_dom_id("heroCarousel"), Some(Region::Hero));
        assert_eq!(Region::from_dom_id("footer"), None);
        assert_eq!(CarouselId::from_dom_id("lightbox"), None);
    }
}
