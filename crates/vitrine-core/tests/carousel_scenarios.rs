//! End-to-end carousel scenarios, driven the way a page host drives them.

use std::time::Duration;

use pretty_assertions::assert_eq;
use vitrine_core::carousel::{
    CarouselIgnoredReason, ClonePlan, NoLayout, SlideMetrics, TrackTransition, WrapCorrection,
};
use vitrine_core::config::{CarouselConfig, InFlightPolicy};
use vitrine_core::{CarouselCommand, CarouselOutcome, Direction, LoopingCarousel};

const PHOTO: SlideMetrics = SlideMetrics::new(600.0, 0.0);
const CARD: SlideMetrics = SlideMetrics::new(280.0, 20.0);

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn built(config: CarouselConfig, n: usize) -> LoopingCarousel {
    let mut carousel = LoopingCarousel::new(config);
    carousel.build(n, ms(0));
    carousel
}

/// Step once and let it settle through the native completion signal.
fn step_and_settle(
    carousel: &mut LoopingCarousel,
    direction: Direction,
    now: Duration,
    layout: &SlideMetrics,
) -> CarouselOutcome {
    carousel.control(direction, now, layout);
    carousel.settle(now + ms(500), layout).outcome
}

#[test]
fn build_triples_and_starts_on_first_original() {
    for n in 1..=12 {
        let carousel = built(CarouselConfig::gallery(), n);
        let plan = ClonePlan::new(n).unwrap();
        assert_eq!(carousel.plan(), Some(plan));
        assert_eq!(plan.len(), 3 * n);
        assert_eq!(carousel.absolute_index(), Some(n));
        assert_eq!(carousel.logical_index(), Some(0));
    }
}

#[test]
fn forward_from_last_home_slide_settles_on_first() {
    let n = 5;
    let mut carousel = built(CarouselConfig::gallery(), n);
    for i in 0..n - 1 {
        step_and_settle(&mut carousel, Direction::Forward, ms(1_000 * i as u64), &PHOTO);
    }
    assert_eq!(carousel.absolute_index(), Some(2 * n - 1));
    let shown_before = carousel.current_slide().map(|s| s.source);

    carousel.next(ms(10_000), &PHOTO);
    assert_eq!(carousel.absolute_index(), Some(2 * n));
    assert_eq!(carousel.current_slide().map(|s| s.source), Some(0));
    assert_eq!(shown_before, Some(n - 1));

    let settled = carousel.settle(ms(10_500), &PHOTO);
    assert_eq!(
        settled.outcome,
        CarouselOutcome::Settled {
            correction: Some(WrapCorrection { from: 2 * n, to: n })
        }
    );
    assert_eq!(
        settled.commands,
        vec![CarouselCommand::Translate {
            x_px: -3_000.0,
            transition: None
        }]
    );
}

#[test]
fn backward_from_first_home_slide_settles_on_last() {
    let n = 4;
    let mut carousel = built(CarouselConfig::reviews(), n);
    let outcome = step_and_settle(&mut carousel, Direction::Backward, ms(200), &CARD);
    assert_eq!(
        outcome,
        CarouselOutcome::Settled {
            correction: Some(WrapCorrection {
                from: n - 1,
                to: 2 * n - 1
            })
        }
    );
    assert_eq!(carousel.logical_index(), Some(n - 1));
}

#[test]
fn swipe_of_49px_is_ignored_and_51px_steps() {
    for config in [CarouselConfig::gallery(), CarouselConfig::reviews()] {
        let mut carousel = built(config, 3);

        carousel.touch_start(400.0);
        assert_eq!(
            carousel.touch_end(351.0, ms(10), &PHOTO).outcome,
            CarouselOutcome::Ignored(CarouselIgnoredReason::NoSwipe)
        );
        carousel.touch_start(400.0);
        assert_eq!(
            carousel.touch_end(449.0, ms(20), &PHOTO).outcome,
            CarouselOutcome::Ignored(CarouselIgnoredReason::NoSwipe)
        );
        assert_eq!(carousel.absolute_index(), Some(3));

        carousel.touch_start(400.0);
        assert_eq!(
            carousel.touch_end(349.0, ms(30), &PHOTO).outcome,
            CarouselOutcome::Stepped {
                direction: Direction::Forward,
                absolute: 4
            }
        );
        carousel.settle(ms(600), &PHOTO);

        carousel.touch_start(400.0);
        assert_eq!(
            carousel.touch_end(451.0, ms(700), &PHOTO).outcome,
            CarouselOutcome::Stepped {
                direction: Direction::Backward,
                absolute: 3
            }
        );
    }
}

#[test]
fn autoplay_keeps_a_single_cadence() {
    let mut carousel = built(CarouselConfig::gallery(), 3);
    assert!(carousel.is_autoplaying());
    // Hover then leave twice: the second leave must not add a second timer.
    carousel.pointer_enter();
    carousel.pointer_leave(ms(1_000));
    carousel.pointer_leave(ms(1_500));
    carousel.poll(ms(120), &PHOTO);

    let mut ticks = 0;
    let mut now = ms(1_000);
    while now <= ms(21_000) {
        let dispatch = carousel.poll(now, &PHOTO);
        if matches!(dispatch.outcome, CarouselOutcome::Stepped { .. }) {
            ticks += 1;
            carousel.settle(now + ms(500), &PHOTO);
        }
        now += ms(250);
    }
    // Deadlines at 5s, 9s, 13s, 17s, 21s.
    assert_eq!(ticks, 5);
}

#[test]
fn three_rapid_next_clicks_complete_one_cycle_when_queued() {
    let mut config = CarouselConfig::reviews();
    config.in_flight = InFlightPolicy::Queue;
    config.max_queued_steps = 2;
    let mut carousel = built(config, 3);
    carousel.poll(ms(80), &CARD);

    let mut seen = vec![carousel.current_slide().map(|s| s.source)];
    assert!(carousel.next(ms(1_000), &CARD).is_accepted());
    assert!(carousel.next(ms(1_050), &CARD).is_accepted());
    assert!(carousel.next(ms(1_100), &CARD).is_accepted());

    let mut now = ms(1_000);
    while carousel.is_in_flight() {
        seen.push(carousel.current_slide().map(|s| s.source));
        now += ms(500);
        carousel.poll(now, &CARD);
    }
    assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(0)]);
    assert_eq!(carousel.logical_index(), Some(0));
    assert_eq!(carousel.absolute_index(), Some(3));
}

#[test]
fn three_next_clicks_with_reject_policy_need_settles() {
    let mut carousel = built(CarouselConfig::reviews(), 3);
    carousel.next(ms(0), &CARD);
    assert_eq!(
        carousel.next(ms(10), &CARD).outcome,
        CarouselOutcome::Ignored(CarouselIgnoredReason::InFlight)
    );
    carousel.settle(ms(400), &CARD);
    step_and_settle(&mut carousel, Direction::Forward, ms(500), &CARD);
    step_and_settle(&mut carousel, Direction::Forward, ms(1_100), &CARD);
    assert_eq!(carousel.logical_index(), Some(0));
}

#[test]
fn single_slide_still_corrects() {
    let mut carousel = built(CarouselConfig::gallery(), 1);
    carousel.next(ms(0), &PHOTO);
    assert_eq!(carousel.absolute_index(), Some(2));
    let settled = carousel.settle(ms(500), &PHOTO);
    assert_eq!(
        settled.outcome,
        CarouselOutcome::Settled {
            correction: Some(WrapCorrection { from: 2, to: 1 })
        }
    );
    assert_eq!(
        settled.commands,
        vec![CarouselCommand::Translate {
            x_px: -600.0,
            transition: None
        }]
    );
}

#[test]
fn animated_render_uses_configured_transition() {
    let mut config = CarouselConfig::gallery();
    config.transition_ms = 320;
    config.easing = "linear".into();
    let mut carousel = built(config, 2);
    assert_eq!(
        carousel.next(ms(0), &PHOTO).commands,
        vec![CarouselCommand::Translate {
            x_px: -1_800.0,
            transition: Some(TrackTransition {
                duration_ms: 320,
                easing: "linear".into()
            })
        }]
    );
}

#[test]
fn fallback_width_keeps_scroll_variant_usable() {
    let mut carousel = built(CarouselConfig::reviews(), 2);
    assert_eq!(
        carousel.next(ms(0), &NoLayout).commands,
        vec![CarouselCommand::ScrollTo {
            left_px: 900.0,
            smooth: true
        }]
    );
}
