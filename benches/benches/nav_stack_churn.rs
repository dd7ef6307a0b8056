// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_nav_stack::{Frame, FrameHost, NavigationStack, StackSurface, TransitionTag};

#[derive(PartialEq)]
struct Page(u32);

impl Frame for Page {}

#[derive(Default)]
struct Host {
    mounted: usize,
}

impl StackSurface for Host {
    type Node = u32;

    fn mount(&mut self, _: &u32) {
        self.mounted += 1;
    }

    fn unmount(&mut self, _: &u32) {
        self.mounted = self.mounted.saturating_sub(1);
    }

    fn set_transition(&mut self, _: &u32, _: Option<TransitionTag>) {}

    fn set_shown(&mut self, _: bool) {}
}

impl FrameHost<Page> for Host {
    fn host(&mut self, page: &Page) -> Option<u32> {
        Some(page.0)
    }
}

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("nav_stack");
    for &n in &[8u32, 64] {
        group.throughput(Throughput::Elements(u64::from(n) * 2));
        group.bench_function(format!("push_pop_settled_n{}", n), |b| {
            b.iter_batched(
                || NavigationStack::new(Host::default()),
                |mut stack| {
                    let mut now = Duration::ZERO;
                    for i in 0..n {
                        stack.push(Page(i));
                        now += Duration::from_millis(600);
                        stack.advance_to(now);
                    }
                    for _ in 0..n {
                        stack.pop();
                        now += Duration::from_millis(600);
                        stack.advance_to(now);
                    }
                    black_box(stack.surface().mounted);
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("push_burst_home_n{}", n), |b| {
            b.iter_batched(
                || NavigationStack::new(Host::default()),
                |mut stack| {
                    for i in 0..n {
                        stack.push(Page(i));
                    }
                    black_box(stack.home().len());
                    stack.advance_to(Duration::from_secs(5));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_push_pop);
criterion_main!(benches);
