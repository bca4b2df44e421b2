//! Benchmark: rect computation and neighbor lookup over trees of growing size.
//!
//! Every render recomputes rects from scratch, so this is the hot path when
//! a workspace holds many windows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessel_core::{Direction, LayoutEngine, Rect, SplitDirection};
use tessel_layout::{nearest_in_direction, TilingLayout};

const BOUNDS: Rect = Rect {
    x: 0.0,
    y: 28.0,
    width: 2560.0,
    height: 1384.0,
};

/// Tile `n` windows, alternating split directions so the tree spirals.
fn build_layout(n: usize) -> TilingLayout {
    let mut layout = TilingLayout::new();
    for i in 0..n {
        let direction = if i % 2 == 0 {
            SplitDirection::Horizontal
        } else {
            SplitDirection::Vertical
        };
        layout.tile_window(&format!("w{i}"), direction);
    }
    layout
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_rects");
    for n in [4, 16, 64] {
        let layout = build_layout(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &layout, |b, layout| {
            b.iter(|| black_box(layout.compute(black_box(BOUNDS))));
        });
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_in_direction");
    for n in [4, 16, 64] {
        let rects = build_layout(n).compute(BOUNDS);
        group.bench_with_input(BenchmarkId::from_parameter(n), &rects, |b, rects| {
            b.iter(|| black_box(nearest_in_direction("w0", Direction::Right, rects)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute, bench_nearest);
criterion_main!(benches);
