// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_signal::{Notice, Subject, handler};

fn counting_subject(subscribers: usize, captures: usize, hits: &Rc<Cell<u64>>) -> Subject<u32> {
    let subject = Subject::new();
    for _ in 0..subscribers {
        let hits = hits.clone();
        subject.subscribe(handler(move |n: &Notice<'_, u32>| {
            hits.set(hits.get() + u64::from(*n.data));
        }));
    }
    for _ in 0..captures {
        let hits = hits.clone();
        subject.capture(handler(move |n: &Notice<'_, u32>| {
            hits.set(hits.get() + u64::from(*n.data));
        }));
    }
    subject
}

fn bench_fire(c: &mut Criterion) {
    let mut group = c.benchmark_group("fire");
    for &n in &[1usize, 16, 256] {
        let hits = Rc::new(Cell::new(0));
        let subject = counting_subject(n, 0, &hits);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("broadcast_n{}", n), |b| {
            b.iter(|| black_box(subject.fire(black_box(1))));
        });
    }
    group.finish();
}

fn bench_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture");
    for &n in &[16usize, 256] {
        let hits = Rc::new(Cell::new(0));
        let subject = counting_subject(n, 1, &hits);
        group.bench_function(format!("exclusive_over_n{}", n), |b| {
            b.iter(|| black_box(subject.fire(black_box(1))));
        });
    }
    let hits = Rc::new(Cell::new(0));
    group.bench_function("capture_release_cycle", |b| {
        b.iter_batched(
            || counting_subject(16, 0, &hits),
            |subject| {
                let h = handler(|_: &Notice<'_, u32>| {});
                for _ in 0..32 {
                    let id = subject.capture(h.clone());
                    subject.fire(1);
                    subject.release(id);
                }
                black_box(subject.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_fire, bench_capture);
criterion_main!(benches);
