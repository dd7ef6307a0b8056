// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the momentum scroller.
//!
//! 1. While a gesture is in progress, and where its release lands, the offset stays within
//!    `[true_max - bump, bump]`.
//! 2. One snap-back after release brings the offset into `[true_max, 0]`, and a second one
//!    changes nothing.
//! 3. A short gesture with little displacement is always a tap and never moves the content.
//! 4. Driving the clock far enough always returns the scroller to rest in bounds.

use core::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use proptest::prelude::*;
use understory_scroller::{
    GestureOutcome, GestureSample, MomentumScroller, Motion, ScrollPhase, ScrollSurface,
};

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Fixed {
    viewport: Size,
    content: Size,
}

impl ScrollSurface for Fixed {
    type ItemKey = ();

    fn viewport_size(&self) -> Option<Size> {
        Some(self.viewport)
    }

    fn content_size(&self) -> Option<Size> {
        Some(self.content)
    }

    fn item_bounds(&self, _: &()) -> Option<Rect> {
        None
    }

    fn apply_offset(&mut self, _: Vec2, _: Motion) {}
}

fn scroller(viewport_h: f64, content_h: f64) -> MomentumScroller<Fixed> {
    MomentumScroller::new(Fixed {
        viewport: Size::new(320.0, viewport_h),
        content: Size::new(320.0, content_h),
    })
}

fn sample(y: f64, t: u64) -> GestureSample {
    GestureSample::new(Point::new(0.0, y), Duration::from_millis(t))
}

fn in_range(v: f64, lo: f64, hi: f64) -> bool {
    v >= lo - 1e-9 && v <= hi + 1e-9
}

/// Pointer steps: vertical delta plus the time since the previous sample.
fn steps() -> impl Strategy<Value = Vec<(f64, u64)>> {
    proptest::collection::vec((-200.0f64..=200.0, 1u64..=250), 0..=30)
}

proptest! {
    #[test]
    fn drag_stays_within_elastic_bounds(
        viewport_h in 100.0f64..=800.0,
        content_h in 0.0f64..=4000.0,
        steps in steps(),
    ) {
        let mut s = scroller(viewport_h, content_h);
        let mut y = 400.0;
        let mut t = 0;
        s.gesture_start(sample(y, t));
        let max = s.true_max().y;
        let bump = s.bump().y;
        for (dy, dt) in steps {
            y += dy;
            t += dt;
            s.gesture_move(sample(y, t));
            prop_assert!(in_range(s.offset().y, max - bump, bump));
        }
        s.gesture_end(sample(y, t));
        prop_assert!(in_range(s.offset().y, max - bump, bump));
    }

    #[test]
    fn one_snap_back_converges(
        viewport_h in 100.0f64..=800.0,
        content_h in 0.0f64..=4000.0,
        steps in steps(),
    ) {
        let mut s = scroller(viewport_h, content_h);
        let mut y = 400.0;
        let mut t = 0;
        s.gesture_start(sample(y, t));
        for (dy, dt) in steps {
            y += dy;
            t += dt;
            s.gesture_move(sample(y, t));
        }
        s.gesture_end(sample(y, t));

        s.snap_back();
        let max = s.true_max().y;
        prop_assert!(in_range(s.offset().y, max, 0.0));
        prop_assert!(!s.snap_back());
    }

    #[test]
    fn small_short_gesture_is_a_tap(
        jitter in proptest::collection::vec(-4.0f64..=4.0, 0..=2),
    ) {
        let mut s = scroller(480.0, 2000.0);
        s.gesture_start(sample(200.0, 0));
        let mut t = 0;
        for dy in jitter {
            t += 16;
            s.gesture_move(sample(200.0 + dy, t));
        }
        prop_assert_eq!(s.gesture_end(sample(200.0, t + 16)), Some(GestureOutcome::Tap));
        prop_assert_eq!(s.offset(), Vec2::ZERO);
    }

    #[test]
    fn clock_returns_scroller_to_rest(
        viewport_h in 100.0f64..=800.0,
        content_h in 0.0f64..=4000.0,
        steps in steps(),
    ) {
        let mut s = scroller(viewport_h, content_h);
        let mut y = 400.0;
        let mut t = 0;
        s.gesture_start(sample(y, t));
        for (dy, dt) in steps {
            y += dy;
            t += dt;
            s.gesture_move(sample(y, t));
        }
        s.gesture_end(sample(y, t));
        s.advance_to(Duration::from_millis(t + 10_000));

        prop_assert_eq!(s.phase(), ScrollPhase::Idle);
        prop_assert_eq!(s.next_deadline(), None);
        let max = s.true_max().y;
        prop_assert!(in_range(s.offset().y, max, 0.0));
    }
}
