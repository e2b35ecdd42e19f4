#![forbid(unsafe_code)]

//! Core: interaction state machines for a brochure site.
//!
//! # Role in Vitrine
//! `vitrine-core` owns every piece of page-interaction state as plain,
//! deterministic Rust values. It never touches a DOM: callers push inputs and
//! a monotonic `now` and apply the commands that come back.
//!
//! # Primary responsibilities
//! - **LoopingCarousel**: clone-and-rewrap "infinite" carousels in a
//!   transform variant and a scroll-container variant.
//! - **Lightbox**: modal image viewer with wrap-around navigation, zoom,
//!   keyboard and swipe input.
//! - **Navigation / HeaderShrink / HeroRotator**: small page chrome machines.
//! - **VitrineConfig**: every tunable, with defaults matching the page.
//!
//! # How it fits in the system
//! `vitrine-web` routes host events to these machines by element id and
//! flattens their outputs into host commands; `vitrine-wasm` exposes that to
//! JavaScript.

pub mod carousel;
pub mod config;
pub mod header;
pub mod hero;
pub mod lightbox;
pub mod nav;
pub mod swipe;

pub use carousel::{
    CarouselCommand, CarouselDispatch, CarouselOutcome, LoopingCarousel, RenderVariant,
};
pub use config::VitrineConfig;
pub use swipe::Direction;
