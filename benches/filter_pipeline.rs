// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use iced_reel::media::filter::{to_display, FilterMode};
use image_rs::{Rgba, RgbaImage};
use std::hint::black_box;

/// 1280x720 gradient, a typical decoded frame size.
fn sample_frame() -> RgbaImage {
    RgbaImage::from_fn(1280, 720, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

fn filter_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_pipeline");
    let frame = sample_frame();

    for mode in FilterMode::ALL {
        group.bench_function(format!("apply_{}", mode.label().to_lowercase()), |b| {
            b.iter(|| black_box(mode.apply(black_box(&frame))));
        });
    }

    group.bench_function("to_display_900x506", |b| {
        b.iter(|| black_box(to_display(black_box(&frame), 900, 506)));
    });

    // Full per-tick cost: filter then rescale.
    group.bench_function("greyscale_then_display", |b| {
        b.iter(|| {
            let filtered = FilterMode::Greyscale.apply(black_box(&frame));
            black_box(to_display(&filtered, 900, 506))
        });
    });

    group.finish();
}

criterion_group!(benches, filter_benchmark);
criterion_main!(benches);
