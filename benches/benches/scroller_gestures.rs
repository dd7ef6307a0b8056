// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size, Vec2};
use understory_scroller::{GestureSample, MomentumScroller, Motion, ScrollSurface, ScrollTarget};

struct Rows {
    count: usize,
    offset: Vec2,
}

impl ScrollSurface for Rows {
    type ItemKey = usize;

    fn viewport_size(&self) -> Option<Size> {
        Some(Size::new(320.0, 480.0))
    }

    fn content_size(&self) -> Option<Size> {
        Some(Size::new(320.0, self.count as f64 * 48.0))
    }

    fn item_bounds(&self, row: &usize) -> Option<Rect> {
        let top = *row as f64 * 48.0;
        Some(Rect::new(0.0, top, 320.0, top + 48.0))
    }

    fn apply_offset(&mut self, offset: Vec2, _: Motion) {
        self.offset = offset;
    }
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// A drag of `n` samples with jittered deltas and 8-24ms spacing.
fn gen_drag(n: usize, seed: u64) -> Vec<GestureSample> {
    let mut rng = Rng::new(seed);
    let mut y = 400.0;
    let mut t = 0;
    (0..n)
        .map(|_| {
            y += rng.next_f64() * 60.0 - 40.0;
            t += 8 + rng.next_u64() % 17;
            GestureSample::new(Point::new(0.0, y), Duration::from_millis(t))
        })
        .collect()
}

fn scroller() -> MomentumScroller<Rows> {
    MomentumScroller::new(Rows {
        count: 200,
        offset: Vec2::ZERO,
    })
}

fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture");
    for &n in &[8usize, 64, 512] {
        let drag = gen_drag(n, 0x5eed);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("drag_release_n{}", n), |b| {
            b.iter_batched(
                scroller,
                |mut s| {
                    s.gesture_start(GestureSample::new(Point::new(0.0, 400.0), Duration::ZERO));
                    for sample in &drag {
                        s.gesture_move(*sample);
                    }
                    if let Some(last) = drag.last() {
                        black_box(s.gesture_end(*last));
                    }
                    s.advance_to(Duration::from_secs(10));
                    black_box(s.surface().offset);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_scroll_to(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_to");
    group.bench_function("reveal_rows", |b| {
        b.iter_batched(
            scroller,
            |mut s| {
                for row in (0..200).step_by(7) {
                    s.scroll_to(ScrollTarget::Item(row), true);
                }
                black_box(s.offset());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_gestures, bench_scroll_to);
criterion_main!(benches);
