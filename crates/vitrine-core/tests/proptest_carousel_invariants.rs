//! Property-based tests for the looping carousel.
//!
//! 1. **Home range**: whenever nothing is in flight, the absolute index lies
//!    in `[N, 2N)`.
//! 2. **Logical tracking**: the logical index equals the net number of
//!    accepted steps modulo N, whatever mix of controls, swipes, settles and
//!    resizes produced them.
//! 3. **Track shape**: the clone plan has 3N slides and every third of it
//!    maps back onto the originals in order.
//! 4. **Queue replay**: with the queue policy every accepted click is
//!    eventually applied.

use std::time::Duration;

use proptest::prelude::*;
use vitrine_core::carousel::{ClonePlan, SlideCopy, SlideMetrics};
use vitrine_core::config::{CarouselConfig, InFlightPolicy};
use vitrine_core::{CarouselOutcome, LoopingCarousel};

const CARD: SlideMetrics = SlideMetrics::new(280.0, 20.0);

#[derive(Debug, Clone, Copy)]
enum Op {
    Next,
    Prev,
    SwipeLeft,
    SwipeRight,
    Settle,
    Resize,
    Wait(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Next),
        3 => Just(Op::Prev),
        1 => Just(Op::SwipeLeft),
        1 => Just(Op::SwipeRight),
        4 => Just(Op::Settle),
        1 => Just(Op::Resize),
        2 => (1u64..5_000).prop_map(Op::Wait),
    ]
}

fn config(scroll: bool) -> CarouselConfig {
    if scroll {
        CarouselConfig::reviews()
    } else {
        CarouselConfig::gallery()
    }
}

/// Replays `ops`, checking the home range after every settle, and returns
/// the net signed number of applied steps.
fn replay(carousel: &mut LoopingCarousel, n: usize, ops: &[Op]) -> Result<isize, TestCaseError> {
    let mut now = Duration::ZERO;
    let mut net = 0isize;

    for op in ops {
        now += Duration::from_millis(1);
        let outcome = match *op {
            Op::Next => carousel.next(now, &CARD).outcome,
            Op::Prev => carousel.prev(now, &CARD).outcome,
            Op::SwipeLeft => {
                carousel.touch_start(300.0);
                carousel.touch_end(100.0, now, &CARD).outcome
            }
            Op::SwipeRight => {
                carousel.touch_start(100.0);
                carousel.touch_end(300.0, now, &CARD).outcome
            }
            Op::Settle => carousel.settle(now, &CARD).outcome,
            Op::Resize => {
                carousel.resize(now);
                CarouselOutcome::Idle
            }
            Op::Wait(ms) => {
                now += Duration::from_millis(ms);
                carousel.poll(now, &CARD).outcome
            }
        };
        match outcome {
            CarouselOutcome::Stepped { direction, .. } => net += direction.delta(),
            CarouselOutcome::Settled { .. } | CarouselOutcome::Repositioned { .. }
                if !carousel.is_in_flight() =>
            {
                assert_home(carousel, n)?;
            }
            _ => {}
        }
    }
    Ok(net)
}

fn assert_home(carousel: &LoopingCarousel, n: usize) -> Result<(), TestCaseError> {
    let absolute = carousel.absolute_index().unwrap_or(usize::MAX);
    prop_assert!(
        (n..2 * n).contains(&absolute),
        "absolute {absolute} outside [{n}, {})",
        2 * n
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn settled_index_stays_home(
        n in 1usize..8,
        scroll in any::<bool>(),
        ops in prop::collection::vec(op(), 0..64),
    ) {
        let mut carousel = LoopingCarousel::new(config(scroll));
        carousel.build(n, Duration::ZERO);
        let net = replay(&mut carousel, n, &ops)?;

        carousel.settle(Duration::from_secs(3_600), &CARD);
        prop_assert!(!carousel.is_in_flight());
        assert_home(&carousel, n)?;

        let expected = net.rem_euclid(n as isize) as usize;
        prop_assert_eq!(carousel.logical_index(), Some(expected));
    }

    #[test]
    fn queued_clicks_are_all_applied(
        n in 1usize..6,
        clicks in prop::collection::vec(any::<bool>(), 1..6),
    ) {
        let mut config = CarouselConfig::gallery();
        config.autoplay = false;
        config.in_flight = InFlightPolicy::Queue;
        config.max_queued_steps = 8;
        let mut carousel = LoopingCarousel::new(config);
        carousel.build(n, Duration::ZERO);

        let mut net = 0isize;
        for (i, forward) in clicks.iter().enumerate() {
            let now = Duration::from_millis(i as u64);
            let dispatch = if *forward {
                carousel.next(now, &CARD)
            } else {
                carousel.prev(now, &CARD)
            };
            prop_assert!(dispatch.is_accepted());
            net += if *forward { 1 } else { -1 };
        }
        let mut now = Duration::from_secs(1);
        while carousel.is_in_flight() {
            carousel.settle(now, &CARD);
            now += Duration::from_millis(500);
        }
        prop_assert_eq!(carousel.pending_steps(), 0);
        assert_home(&carousel, n)?;
        prop_assert_eq!(
            carousel.logical_index(),
            Some(net.rem_euclid(n as isize) as usize)
        );
    }

    #[test]
    fn clone_plan_triples_in_order(n in 1usize..64) {
        let plan = ClonePlan::new(n).unwrap();
        prop_assert_eq!(plan.len(), 3 * n);
        prop_assert_eq!(plan.dom_ops().len(), 2 * n);
        for (absolute, slide) in plan.iter().enumerate() {
            prop_assert_eq!(slide.source, absolute % n);
            let copy = match absolute / n {
                0 => SlideCopy::Leading,
                1 => SlideCopy::Original,
                _ => SlideCopy::Trailing,
            };
            prop_assert_eq!(slide.copy, copy);
        }
    }
}
