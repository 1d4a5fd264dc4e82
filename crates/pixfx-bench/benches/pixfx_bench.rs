//! Benchmarks for pixfx operations.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use pixfx_core::{Components, ImageBuffer, RectI};
use pixfx_math::glam::DVec2;
use pixfx_math::{CoordinateSpace, Matrix3x3, Point3D, TransformParams, get_transform, inverse_transform};
use pixfx_ops::{Copier, Filter, ImageProcessor, NeverAbort, ProcessorConfig, TileMode, TransformKernel};

/// Benchmark matrix composition and point transforms.
fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix");

    let params = TransformParams {
        translate: DVec2::new(12.0, -4.0),
        scale: DVec2::new(1.5, 0.75),
        skew_x: 0.1,
        rotate: 0.4,
        center: DVec2::new(960.0, 540.0),
        ..Default::default()
    };

    group.bench_function("inverse_transform", |b| b.iter(|| inverse_transform(black_box(&params))));

    group.bench_function("get_transform", |b| {
        b.iter(|| {
            get_transform(
                black_box(DVec2::new(3.0, 4.0)),
                black_box(DVec2::new(2.0, 2.0)),
                black_box(0.1),
                black_box(0.5),
                black_box(DVec2::new(100.0, 50.0)),
            )
        })
    });

    let m = inverse_transform(&params);
    group.bench_function("invert", |b| b.iter(|| black_box(m).invert()));

    let points: Vec<Point3D> = (0..10000).map(|i| Point3D::point(i as f64, (i % 100) as f64)).collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("transform_points", |b| {
        b.iter(|| points.iter().map(|&p| black_box(m) * p).fold(0.0, |acc, p| acc + p.x))
    });

    group.bench_function("compose_chain", |b| {
        b.iter(|| {
            (0..64).fold(Matrix3x3::IDENTITY, |acc, i| acc * pixfx_math::rotate(black_box(i as f64 * 0.01)))
        })
    });

    group.finish();
}

/// Benchmark tiled rendering with different partitioning modes.
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);

    for size in [256, 1024].iter() {
        let bounds = RectI::from_size(*size, *size);
        let len = bounds.area() as usize * 4;
        let data: Vec<f32> = (0..len).map(|i| (i % 255) as f32 / 255.0).collect();
        let src = ImageBuffer::from_data(bounds, Components::Rgba, data).unwrap();
        let mut dst = ImageBuffer::<f32>::new(bounds, Components::Rgba).unwrap();

        group.throughput(Throughput::Elements(bounds.area()));

        for (name, mode) in [
            ("single", TileMode::Single),
            ("auto", TileMode::Auto),
            ("grid_128", TileMode::Grid {
                tile_width: 128,
                tile_height: 128,
            }),
        ] {
            let processor = ImageProcessor::new(ProcessorConfig::default().with_tile_mode(mode)).unwrap();

            group.bench_with_input(BenchmarkId::new(format!("copy_{name}"), size), &src, |b, src| {
                b.iter(|| {
                    processor
                        .process::<f32, 4, _, _>(&mut Copier::new(), &mut dst, &[Some(src)], bounds, &NeverAbort)
                        .unwrap()
                })
            });

            let params = TransformParams {
                rotate: 0.3,
                scale: DVec2::new(1.2, 1.2),
                center: DVec2::new(*size as f64 / 2.0, *size as f64 / 2.0),
                ..Default::default()
            };
            group.bench_with_input(BenchmarkId::new(format!("transform_{name}"), size), &src, |b, src| {
                b.iter(|| {
                    let mut kernel = TransformKernel::new(params, CoordinateSpace::default()).with_filter(Filter::Bilinear);
                    processor
                        .process::<f32, 4, _, _>(&mut kernel, &mut dst, &[Some(src)], bounds, &NeverAbort)
                        .unwrap()
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_matrix, bench_render);
criterion_main!(benches);
