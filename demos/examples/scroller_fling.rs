// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Momentum scrolling driven by a manual clock.
//!
//! A quick upward swipe near the end of a list flicks past the bottom edge; the snap-back
//! later pulls the content back into range. Every offset handed to the surface is printed
//! with its motion kind.
//!
//! Run:
//! - `cargo run -p understory_demos --example scroller_fling`

use std::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use understory_scroller::{GestureSample, MomentumScroller, Motion, ScrollSurface, ScrollTarget};

struct Feed {
    rows: usize,
}

impl ScrollSurface for Feed {
    type ItemKey = usize;

    fn viewport_size(&self) -> Option<Size> {
        Some(Size::new(360.0, 640.0))
    }

    fn content_size(&self) -> Option<Size> {
        Some(Size::new(360.0, self.rows as f64 * 72.0))
    }

    fn item_bounds(&self, row: &usize) -> Option<Rect> {
        (*row < self.rows).then(|| {
            let top = *row as f64 * 72.0;
            Rect::new(0.0, top, 360.0, top + 72.0)
        })
    }

    fn apply_offset(&mut self, offset: Vec2, motion: Motion) {
        println!("  offset y={:>8.1}  {:?}", offset.y, motion);
    }
}

fn main() {
    let ms = Duration::from_millis;
    let sample = |y: f64, t: u64| GestureSample::new(Point::new(0.0, y), ms(t));

    let mut scroller = MomentumScroller::new(Feed { rows: 40 });

    println!("== Jump near the end ==");
    scroller.scroll_to(ScrollTarget::Item(34), true);

    println!("== Swipe up ==");
    scroller.gesture_start(sample(500.0, 0));
    for (i, y) in [470.0, 430.0, 380.0, 320.0].into_iter().enumerate() {
        scroller.gesture_move(sample(y, 12 * (i as u64 + 1)));
    }
    let outcome = scroller.gesture_end(sample(320.0, 60));
    println!("  outcome {outcome:?}  phase {:?}", scroller.phase());

    println!("== Clock ==");
    while let Some(deadline) = scroller.next_deadline() {
        println!("  t={}ms", deadline.as_millis());
        scroller.advance_to(deadline);
    }
    println!(
        "== At rest: y={:.1} (range {:.1}..=0) ==",
        scroller.offset().y,
        scroller.true_max().y
    );
}
