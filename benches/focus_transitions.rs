//! Benchmarks for focus transitions.
//!
//! These benchmarks measure the focus manager moving focus through inputs
//! bound to no-op controls.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use venue_tui::focus::{FocusManager, Focusable};

struct Noop;

impl Focusable for Noop {
    fn focus(&self) {}
    fn blur(&self) {}
}

fn manager(size: usize) -> (FocusManager<usize>, Vec<Arc<Noop>>) {
    let mut manager = FocusManager::new(0..size);
    let controls: Vec<Arc<Noop>> = (0..size).map(|_| Arc::new(Noop)).collect();
    for (id, control) in controls.iter().enumerate() {
        manager.bind(&id, control).unwrap();
    }
    (manager, controls)
}

fn bench_on_focus_cycle(c: &mut Criterion) {
    let (mut manager, _controls) = manager(10);
    c.bench_function("on_focus_cycle_10", |b| {
        b.iter(|| {
            for id in 0..10 {
                manager.on_focus(black_box(&id)).unwrap();
            }
        })
    });
}

fn bench_blur_all(c: &mut Criterion) {
    let (mut manager, _controls) = manager(50);
    c.bench_function("blur_all_50", |b| {
        b.iter(|| {
            manager.on_focus(black_box(&25)).unwrap();
            manager.blur_all();
        })
    });
}

fn bench_next_input(c: &mut Criterion) {
    let (manager, _controls) = manager(50);
    c.bench_function("next_input_50", |b| {
        b.iter(|| manager.next_input(black_box(&25)).unwrap().copied())
    });
}

criterion_group!(benches, bench_on_focus_cycle, bench_blur_all, bench_next_input);
criterion_main!(benches);
