#![forbid(unsafe_code)]

//! The page: every interaction component wired to the host document.
//!
//! [`Page`] owns one instance of each component whose elements are present in
//! the [`PageManifest`], routes [`HostEvent`]s to them and flattens their
//! outputs into [`HostCommand`]s.
//!
//! # Invariants
//!
//! 1. A component whose required elements are missing is never constructed,
//!    so no event can reach it.
//! 2. Carousels clone their slides on the first [`HostEvent::Load`] only.
//! 3. Layout is read through [`HostLayout`] at the moment a render needs it;
//!    the page never caches host measurements itself.
//!
//! # Failure Modes
//!
//! - Events naming unknown elements are dropped without output.
//! - An absent or empty feature is inert; nothing on this path panics.

use std::time::Duration;

use vitrine_core::carousel::{CarouselDispatch, NoLayout, SlideLayout, SlideMetrics};
use vitrine_core::header::HeaderShrink;
use vitrine_core::hero::HeroRotator;
use vitrine_core::lightbox::{Lightbox, LightboxCommand, LightboxKey};
use vitrine_core::nav::{NavCommand, Navigation};
use vitrine_core::{Direction, LoopingCarousel, VitrineConfig};

use crate::event::{CarouselId, HostCommand, HostEvent, Region, ids};
use crate::manifest::PageManifest;

/// Live layout measurement supplied by the host.
pub trait HostLayout {
    /// Width of one slide and the track gap for `carousel`, if measurable.
    fn slide_metrics(&self, carousel: CarouselId) -> Option<SlideMetrics>;
}

impl HostLayout for NoLayout {
    fn slide_metrics(&self, _carousel: CarouselId) -> Option<SlideMetrics> {
        None
    }
}

/// Last measurements pushed by the host, per carousel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasuredLayout {
    gallery: Option<SlideMetrics>,
    reviews: Option<SlideMetrics>,
}

impl MeasuredLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            gallery: None,
            reviews: None,
        }
    }

    /// Record (or forget, with `None`) the metrics of `carousel`.
    pub fn set(&mut self, carousel: CarouselId, metrics: Option<SlideMetrics>) {
        match carousel {
            CarouselId::Gallery => self.gallery = metrics,
            CarouselId::Reviews => self.reviews = metrics,
        }
    }
}

impl HostLayout for MeasuredLayout {
    fn slide_metrics(&self, carousel: CarouselId) -> Option<SlideMetrics> {
        match carousel {
            CarouselId::Gallery => self.gallery,
            CarouselId::Reviews => self.reviews,
        }
    }
}

/// One carousel's view of the host layout.
struct CarouselLayout<'a, L: ?Sized> {
    layout: &'a L,
    carousel: CarouselId,
}

impl<L: HostLayout + ?Sized> SlideLayout for CarouselLayout<'_, L> {
    fn slide_metrics(&self) -> Option<SlideMetrics> {
        self.layout.slide_metrics(self.carousel)
    }
}

/// All interaction state of one document.
#[derive(Debug, Clone)]
pub struct Page {
    manifest: PageManifest,
    nav: Navigation,
    header: Option<HeaderShrink>,
    lightbox: Option<Lightbox>,
    gallery: Option<LoopingCarousel>,
    reviews: Option<LoopingCarousel>,
    hero: Option<HeroRotator>,
    loaded: bool,
}

impl Page {
    /// Attach to the document described by `manifest`.
    #[must_use]
    pub fn new(manifest: PageManifest, config: &VitrineConfig) -> Self {
        let nav = Navigation::new(manifest.has_nav(), manifest.has_nav_toggle());
        let header = manifest
            .has_header()
            .then(|| HeaderShrink::new(&config.header));
        let lightbox = manifest
            .has_lightbox()
            .then(|| Lightbox::new(manifest.images.clone(), &config.lightbox));
        let gallery = manifest
            .has_gallery()
            .then(|| LoopingCarousel::new(config.gallery.clone()).named("gallery"));
        let reviews = manifest.has_reviews().then(|| {
            let mut reviews = config.reviews.clone();
            if manifest.scroll_end_supported {
                reviews.settle_fallback_ms = None;
            }
            LoopingCarousel::new(reviews).named("reviews")
        });
        let hero = manifest
            .has_hero()
            .then(|| HeroRotator::new(manifest.hero_slides, &config.hero));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "page.attach",
            nav = manifest.has_nav(),
            header = header.is_some(),
            lightbox = lightbox.is_some(),
            gallery = gallery.is_some(),
            reviews = reviews.is_some(),
            hero = hero.is_some()
        );

        Self {
            manifest,
            nav,
            header,
            lightbox,
            gallery,
            reviews,
            hero,
            loaded: false,
        }
    }

    #[must_use]
    pub const fn manifest(&self) -> &PageManifest {
        &self.manifest
    }

    #[must_use]
    pub const fn nav(&self) -> &Navigation {
        &self.nav
    }

    #[must_use]
    pub const fn header(&self) -> Option<&HeaderShrink> {
        self.header.as_ref()
    }

    #[must_use]
    pub const fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    #[must_use]
    pub const fn hero(&self) -> Option<&HeroRotator> {
        self.hero.as_ref()
    }

    /// Carousel `id`, if its elements are present.
    #[must_use]
    pub const fn carousel(&self, id: CarouselId) -> Option<&LoopingCarousel> {
        match id {
            CarouselId::Gallery => self.gallery.as_ref(),
            CarouselId::Reviews => self.reviews.as_ref(),
        }
    }

    /// Whether the load event has been handled.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Run once on `DOMContentLoaded`: footer year and hero rotation.
    pub fn init(&mut self, now: Duration) -> Vec<HostCommand> {
        let mut out = Vec::new();
        if let Some(year) = self.manifest.year
            && self.manifest.has(ids::YEAR)
        {
            out.push(HostCommand::SetText {
                element: ids::YEAR.to_owned(),
                text: year.to_string(),
            });
        }
        if let Some(index) = self.hero.as_mut().and_then(|hero| hero.start(now)) {
            out.push(HostCommand::HeroActivate { index });
        }
        out
    }

    /// Earliest instant at which [`poll`](Self::poll) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        [
            self.gallery.as_ref().and_then(LoopingCarousel::next_deadline),
            self.reviews.as_ref().and_then(LoopingCarousel::next_deadline),
            self.hero.as_ref().and_then(HeroRotator::next_deadline),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Run every timer due at `now`.
    pub fn poll(&mut self, now: Duration, layout: &impl HostLayout) -> Vec<HostCommand> {
        let mut out = Vec::new();
        for id in [CarouselId::Gallery, CarouselId::Reviews] {
            let view = CarouselLayout {
                layout,
                carousel: id,
            };
            if let Some(carousel) = self.carousel_mut(id) {
                let dispatch = carousel.poll(now, &view);
                push_carousel(&mut out, id, dispatch);
            }
        }
        if let Some(index) = self.hero.as_mut().and_then(|hero| hero.poll(now)) {
            out.push(HostCommand::HeroActivate { index });
        }
        out
    }

    /// Route one host event.
    pub fn handle(
        &mut self,
        event: &HostEvent,
        now: Duration,
        layout: &impl HostLayout,
    ) -> Vec<HostCommand> {
        let mut out = Vec::new();
        match event {
            HostEvent::Load => self.load(now, &mut out),
            HostEvent::Resize => {
                for carousel in [self.gallery.as_mut(), self.reviews.as_mut()]
                    .into_iter()
                    .flatten()
                {
                    carousel.resize(now);
                }
            }
            HostEvent::Scroll { y } => {
                if let Some(scrolled) = self.header.as_mut().and_then(|h| h.on_scroll(*y)) {
                    out.push(HostCommand::SetHeaderScrolled { scrolled });
                }
            }
            HostEvent::Click { target } => self.click(target, now, layout, &mut out),
            HostEvent::AnchorClick { href } => {
                let manifest = &self.manifest;
                let commands = self.nav.follow_anchor(href, |id| manifest.has(id));
                push_nav(&mut out, commands);
            }
            HostEvent::ImageClick { src } => {
                if let Some(lightbox) = self.lightbox.as_mut() {
                    push_lightbox(&mut out, lightbox.open_source(src));
                }
            }
            HostEvent::Key { key } => {
                if let (Some(lightbox), Some(key)) =
                    (self.lightbox.as_mut(), LightboxKey::from_dom_key(key))
                {
                    push_lightbox(&mut out, lightbox.key(key));
                }
            }
            HostEvent::TouchStart { region, x } => match region {
                Region::Carousel(id) => {
                    if let Some(carousel) = self.carousel_mut(*id) {
                        carousel.touch_start(*x);
                    }
                }
                Region::Lightbox => {
                    if let Some(lightbox) = self.lightbox.as_mut() {
                        lightbox.touch_start(*x);
                    }
                }
                Region::Hero => {}
            },
            HostEvent::TouchEnd { region, x } => match region {
                Region::Carousel(id) => {
                    let view = CarouselLayout {
                        layout,
                        carousel: *id,
                    };
                    if let Some(carousel) = self.carousel_mut(*id) {
                        let dispatch = carousel.touch_end(*x, now, &view);
                        push_carousel(&mut out, *id, dispatch);
                    }
                }
                Region::Lightbox => {
                    if let Some(lightbox) = self.lightbox.as_mut() {
                        push_lightbox(&mut out, lightbox.touch_end(*x));
                    }
                }
                Region::Hero => {}
            },
            HostEvent::PointerEnter { region } => match region {
                Region::Carousel(id) => {
                    if let Some(carousel) = self.carousel_mut(*id) {
                        carousel.pointer_enter();
                    }
                }
                Region::Hero => {
                    if let Some(hero) = self.hero.as_mut() {
                        hero.pointer_enter();
                    }
                }
                Region::Lightbox => {}
            },
            HostEvent::PointerLeave { region } => match region {
                Region::Carousel(id) => {
                    if let Some(carousel) = self.carousel_mut(*id) {
                        carousel.pointer_leave(now);
                    }
                }
                Region::Hero => {
                    if let Some(hero) = self.hero.as_mut() {
                        hero.pointer_leave(now);
                    }
                }
                Region::Lightbox => {}
            },
            HostEvent::FocusIn { region } => {
                if let Region::Carousel(id) = region
                    && let Some(carousel) = self.carousel_mut(*id)
                {
                    carousel.focus_in();
                }
            }
            HostEvent::FocusOut { region } => {
                if let Region::Carousel(id) = region
                    && let Some(carousel) = self.carousel_mut(*id)
                {
                    carousel.focus_out(now);
                }
            }
            HostEvent::TransitionEnd { carousel: id } | HostEvent::ScrollEnd { carousel: id } => {
                let view = CarouselLayout {
                    layout,
                    carousel: *id,
                };
                if let Some(carousel) = self.carousel_mut(*id) {
                    let dispatch = carousel.settle(now, &view);
                    push_carousel(&mut out, *id, dispatch);
                }
            }
            HostEvent::Tick => out = self.poll(now, layout),
        }
        out
    }

    fn load(&mut self, now: Duration, out: &mut Vec<HostCommand>) {
        if std::mem::replace(&mut self.loaded, true) {
            return;
        }
        let counts = [
            (CarouselId::Gallery, self.manifest.gallery_slides),
            (CarouselId::Reviews, self.manifest.review_slides),
        ];
        for (id, count) in counts {
            if let Some(carousel) = self.carousel_mut(id) {
                let dispatch = carousel.build(count, now);
                push_carousel(out, id, dispatch);
            }
        }
    }

    fn click(
        &mut self,
        target: &str,
        now: Duration,
        layout: &impl HostLayout,
        out: &mut Vec<HostCommand>,
    ) {
        let step = match target {
            ids::GALLERY_PREV => Some((CarouselId::Gallery, Direction::Backward)),
            ids::GALLERY_NEXT => Some((CarouselId::Gallery, Direction::Forward)),
            ids::REVIEWS_PREV => Some((CarouselId::Reviews, Direction::Backward)),
            ids::REVIEWS_NEXT => Some((CarouselId::Reviews, Direction::Forward)),
            _ => None,
        };
        if let Some((id, direction)) = step {
            let view = CarouselLayout {
                layout,
                carousel: id,
            };
            if let Some(carousel) = self.carousel_mut(id) {
                let dispatch = carousel.control(direction, now, &view);
                push_carousel(out, id, dispatch);
            }
            return;
        }

        if target == ids::NAV_TOGGLE {
            push_nav(out, self.nav.toggle());
            return;
        }

        let Some(lightbox) = self.lightbox.as_mut() else {
            return;
        };
        let commands = match target {
            ids::LIGHTBOX => lightbox.backdrop_click(),
            ids::LB_IMAGE => lightbox.image_click(),
            ids::LB_CLOSE => lightbox.close(),
            ids::LB_PREV => lightbox.prev(),
            ids::LB_NEXT => lightbox.next(),
            _ => {
                #[cfg(feature = "tracing")]
                tracing::trace!(message = "page.click.unrouted", target);
                Vec::new()
            }
        };
        push_lightbox(out, commands);
    }

    fn carousel_mut(&mut self, id: CarouselId) -> Option<&mut LoopingCarousel> {
        match id {
            CarouselId::Gallery => self.gallery.as_mut(),
            CarouselId::Reviews => self.reviews.as_mut(),
        }
    }
}

fn push_carousel(out: &mut Vec<HostCommand>, id: CarouselId, dispatch: CarouselDispatch) {
    #[cfg(feature = "tracing")]
    tracing::trace!(message = "page.carousel", carousel = ?id, outcome = ?dispatch.outcome);

    out.extend(
        dispatch
            .commands
            .into_iter()
            .map(|command| HostCommand::Carousel {
                carousel: id,
                command,
            }),
    );
}

fn push_lightbox(out: &mut Vec<HostCommand>, commands: Vec<LightboxCommand>) {
    out.extend(
        commands
            .into_iter()
            .map(|command| HostCommand::Lightbox { command }),
    );
}

fn push_nav(out: &mut Vec<HostCommand>, commands: Vec<NavCommand>) {
    out.extend(commands.into_iter().map(|command| HostCommand::Nav { command }));
}
