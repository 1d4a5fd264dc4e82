//! Render contract tests for pixfx-ops.

use std::sync::atomic::{AtomicUsize, Ordering};

use pixfx_core::{BitDepth, Components, ImageBuffer, ImageFormat, RectI, RenderScale, Sample};
use pixfx_math::glam::DVec2;
use pixfx_math::{CoordinateSpace, TransformParams};
use pixfx_ops::{
    AbortHandle, AnyImage, AnySample, Copier, DstRow, Fill, Filter, ImageProcessor, MaskMix, NeverAbort,
    OpsError, OpsResult, PixelKernel, ProcessorConfig, RenderStatus, SourceImage, TileMode, TransformKernel,
};

const SENTINEL: u8 = 7;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("pixfx_ops=trace")
        .with_test_writer()
        .try_init();
}

fn gradient_u8(bounds: RectI, components: Components) -> ImageBuffer<u8> {
    let len = bounds.area() as usize * components.count();
    let data = (0..len).map(|i| ((i * 7) % 241) as u8 + 10).collect();
    ImageBuffer::from_data(bounds, components, data).unwrap()
}

fn gradient_f32(bounds: RectI, components: Components) -> ImageBuffer<f32> {
    let len = bounds.area() as usize * components.count();
    let data = (0..len).map(|i| ((i * 13) % 97) as f32 / 96.0).collect();
    ImageBuffer::from_data(bounds, components, data).unwrap()
}

fn processor(mode: TileMode) -> ImageProcessor {
    ImageProcessor::new(ProcessorConfig::default().with_tile_mode(mode)).unwrap()
}

/// Checks every pixel: source value inside `window`, sentinel outside.
fn assert_window_copied(dst: &ImageBuffer<u8>, src: &ImageBuffer<u8>, window: RectI) {
    let b = dst.bounds();
    for y in b.y1..b.y2 {
        for x in b.x1..b.x2 {
            let px = dst.pixel(x, y).unwrap();
            if window.contains(x, y) {
                assert_eq!(px, src.pixel(x, y).unwrap(), "pixel ({x}, {y}) not copied");
            } else {
                assert!(px.iter().all(|&v| v == SENTINEL), "pixel ({x}, {y}) outside window written");
            }
        }
    }
}

/// Kernel recording its phases.
#[derive(Default)]
struct PhaseRecorder {
    pre: usize,
    post: usize,
    gain: f32,
    rows: AtomicUsize,
}

impl PixelKernel for PhaseRecorder {
    fn pre_process(&mut self, _window: RectI) -> OpsResult<()> {
        self.pre += 1;
        self.gain = 2.0;
        Ok(())
    }

    fn process_row<T: Sample, const N: usize>(&self, row: &mut DstRow<'_, T, N>, sources: &[SourceImage<'_, T, N>]) {
        self.rows.fetch_add(1, Ordering::Relaxed);
        let src = sources[0];
        let y = row.y();
        for (x, px) in row.pixels_mut() {
            let s = src.pixel_or_zero(x, y);
            for c in 0..N {
                px[c] = T::from_f32(s[c].to_f32() * self.gain);
            }
        }
    }

    fn post_process<T: Sample, const N: usize>(&mut self, _dst: &mut ImageBuffer<T>, _window: RectI) -> OpsResult<()> {
        self.post += 1;
        Ok(())
    }
}

#[test]
fn test_copy_writes_exactly_window() {
    init_tracing();
    let bounds = RectI::new(-4, -2, 28, 20);
    let src = gradient_u8(bounds, Components::Rgba);
    for window in [
        RectI::new(0, 0, 10, 10),
        RectI::new(-4, -2, 28, 20),
        RectI::new(5, 3, 6, 19),
        RectI::new(27, -2, 28, -1),
    ] {
        for mode in [
            TileMode::Auto,
            TileMode::Single,
            TileMode::Rows(3),
            TileMode::Grid {
                tile_width: 4,
                tile_height: 3,
            },
        ] {
            let mut dst = ImageBuffer::filled(bounds, Components::Rgba, SENTINEL).unwrap();
            let status = processor(mode)
                .process::<u8, 4, _, _>(&mut Copier::new(), &mut dst, &[Some(&src)], window, &NeverAbort)
                .unwrap();
            assert_eq!(status, RenderStatus::Completed);
            assert_window_copied(&dst, &src, window);
        }
    }
}

fn null_source_case<const N: usize>(components: Components) {
    let bounds = RectI::from_size(16, 8);
    let window = RectI::new(2, 2, 12, 6);
    let mut dst = ImageBuffer::filled(bounds, components, SENTINEL).unwrap();
    let status = ImageProcessor::default()
        .process::<u8, N, _, _>(&mut Copier::new(), &mut dst, &[None], window, &NeverAbort)
        .unwrap();
    assert_eq!(status, RenderStatus::Completed);
    for y in 0..8 {
        for x in 0..16 {
            let expected = if window.contains(x, y) { 0 } else { SENTINEL };
            assert!(dst.pixel(x, y).unwrap().iter().all(|&v| v == expected), "{components} ({x}, {y})");
        }
    }

    // No sources at all behaves the same.
    let mut dst = ImageBuffer::filled(bounds, components, SENTINEL).unwrap();
    ImageProcessor::default()
        .process::<u8, N, _, _>(&mut Copier::new(), &mut dst, &[], window, &NeverAbort)
        .unwrap();
    assert_eq!(dst.pixel(2, 2).unwrap(), &[0u8; N]);
}

#[test]
fn test_null_source_writes_zero() {
    null_source_case::<3>(Components::Rgb);
    null_source_case::<4>(Components::Rgba);
}

#[test]
fn test_copy_offset_reads_shifted_source() {
    let bounds = RectI::from_size(8, 8);
    let src = gradient_u8(bounds, Components::Alpha);
    let mut dst = ImageBuffer::filled(bounds, Components::Alpha, SENTINEL).unwrap();
    ImageProcessor::default()
        .process::<u8, 1, _, _>(&mut Copier::with_offset(2, 1), &mut dst, &[Some(&src)], bounds, &NeverAbort)
        .unwrap();
    assert_eq!(dst.pixel(5, 5).unwrap(), src.pixel(3, 4).unwrap());
    // Reads left of the source come back zero.
    assert_eq!(dst.pixel(1, 5).unwrap(), &[0]);
}

#[test]
fn test_copy_extreme_offset_writes_zero() {
    let bounds = RectI::new(-2, -2, 2, 2);
    let src = gradient_u8(bounds, Components::Xy);
    for (dx, dy) in [(i32::MIN, 0), (0, i32::MIN), (i32::MAX, 0), (0, i32::MAX)] {
        let mut dst = ImageBuffer::filled(bounds, Components::Xy, SENTINEL).unwrap();
        let status = ImageProcessor::default()
            .process::<u8, 2, _, _>(&mut Copier::with_offset(dx, dy), &mut dst, &[Some(&src)], bounds, &NeverAbort)
            .unwrap();
        assert_eq!(status, RenderStatus::Completed);
        assert!(dst.data().iter().all(|&v| v == 0), "offset ({dx}, {dy})");
    }
}

#[test]
fn test_depth_mismatch_leaves_destination_untouched() {
    let bounds = RectI::from_size(8, 8);
    let mut dst = AnyImage::from(ImageBuffer::filled(bounds, Components::Rgba, SENTINEL).unwrap());
    let src = AnyImage::new(bounds, ImageFormat::new(BitDepth::F32, Components::Rgb)).unwrap();
    let mut kernel = PhaseRecorder::default();

    let err = ImageProcessor::default()
        .process_any(&mut kernel, &mut dst, &[Some(&src)], bounds, &NeverAbort)
        .unwrap_err();
    assert!(matches!(
        err,
        OpsError::DepthMismatch {
            index: 0,
            expected: BitDepth::U8,
            got: BitDepth::F32
        }
    ));
    assert_eq!(kernel.pre, 0);
    assert_eq!(kernel.rows.load(Ordering::Relaxed), 0);
    let data = dst.as_typed::<u8>().unwrap().data();
    assert!(data.iter().all(|&v| v == SENTINEL));
}

#[test]
fn test_component_mismatch_leaves_destination_untouched() {
    let bounds = RectI::from_size(8, 8);
    let mut dst = AnyImage::from(ImageBuffer::filled(bounds, Components::Rgba, SENTINEL).unwrap());
    let good = AnyImage::new(bounds, ImageFormat::new(BitDepth::U8, Components::Rgba)).unwrap();
    let bad = AnyImage::new(bounds, ImageFormat::new(BitDepth::U8, Components::Rgb)).unwrap();

    let err = ImageProcessor::default()
        .process_any(&mut Copier::new(), &mut dst, &[Some(&good), None, Some(&bad)], bounds, &NeverAbort)
        .unwrap_err();
    assert!(matches!(err, OpsError::ComponentMismatch { index: 2, .. }));
    assert!(dst.as_typed::<u8>().unwrap().data().iter().all(|&v| v == SENTINEL));
}

#[test]
fn test_render_scale_mismatch() {
    let bounds = RectI::from_size(4, 4);
    let src = ImageBuffer::<f32>::new(bounds, Components::Rgba)
        .unwrap()
        .with_render_scale(RenderScale::new(0.5, 0.5));
    let mut dst = ImageBuffer::<f32>::filled(bounds, Components::Rgba, 0.25).unwrap();
    let err = ImageProcessor::default()
        .process::<f32, 4, _, _>(&mut Copier::new(), &mut dst, &[Some(&src)], bounds, &NeverAbort)
        .unwrap_err();
    assert!(matches!(err, OpsError::RenderScaleMismatch { index: 0, .. }));
    assert!(dst.data().iter().all(|&v| v == 0.25));
}

#[test]
fn test_empty_window_is_skipped() {
    let bounds = RectI::from_size(8, 8);
    let src = gradient_u8(bounds, Components::Rgba);
    let mut dst = ImageBuffer::filled(bounds, Components::Rgba, SENTINEL).unwrap();
    let mut kernel = PhaseRecorder::default();
    let p = ImageProcessor::default();

    for window in [RectI::EMPTY, RectI::new(3, 3, 3, 8), RectI::new(20, 20, 30, 30)] {
        let status = p
            .process::<u8, 4, _, _>(&mut kernel, &mut dst, &[Some(&src)], window, &NeverAbort)
            .unwrap();
        assert_eq!(status, RenderStatus::Skipped);
    }
    assert_eq!(kernel.pre, 0);
    assert_eq!(kernel.post, 0);
    assert!(dst.data().iter().all(|&v| v == SENTINEL));
}

#[test]
fn test_kernel_phases_run_once() {
    let bounds = RectI::from_size(32, 24);
    let src = gradient_f32(bounds, Components::Xy);
    let mut dst = ImageBuffer::<f32>::new(bounds, Components::Xy).unwrap();
    let mut kernel = PhaseRecorder::default();

    let status = processor(TileMode::Rows(5))
        .process::<f32, 2, _, _>(&mut kernel, &mut dst, &[Some(&src)], bounds, &NeverAbort)
        .unwrap();
    assert_eq!(status, RenderStatus::Completed);
    assert_eq!(kernel.pre, 1);
    assert_eq!(kernel.post, 1);
    assert_eq!(kernel.rows.load(Ordering::Relaxed), 24);
    // Gain set in pre_process is visible to every worker.
    for (d, s) in dst.data().iter().zip(src.data()) {
        assert_eq!(*d, s * 2.0);
    }
}

#[test]
fn test_output_independent_of_tile_count() {
    init_tracing();
    let bounds = RectI::from_size(21, 13);
    let src = gradient_f32(bounds, Components::Rgba);
    let params = TransformParams {
        translate: DVec2::new(1.25, -0.5),
        scale: DVec2::new(1.1, 0.9),
        skew_x: 0.2,
        rotate: 0.3,
        center: DVec2::new(10.0, 6.0),
        ..Default::default()
    };

    let render = |mode: TileMode| {
        let mut dst = ImageBuffer::<f32>::filled(bounds, Components::Rgba, -1.0).unwrap();
        let mut kernel = TransformKernel::new(params, CoordinateSpace::of_image(&src));
        let status = processor(mode)
            .process::<f32, 4, _, _>(&mut kernel, &mut dst, &[Some(&src)], bounds, &NeverAbort)
            .unwrap();
        assert_eq!(status, RenderStatus::Completed);
        dst
    };

    let reference = render(TileMode::Single);
    assert!(reference.data().iter().all(|&v| v >= 0.0));
    for n in 1..=bounds.height() as usize {
        let out = render(TileMode::Rows(n));
        assert_eq!(out.data(), reference.data(), "{n} strips differ");
    }
    for (tw, th) in [(1, 1), (4, 4), (7, 3), (64, 64)] {
        let out = render(TileMode::Grid {
            tile_width: tw,
            tile_height: th,
        });
        assert_eq!(out.data(), reference.data(), "{tw}x{th} grid differs");
    }
}

#[test]
fn test_abort_before_first_row() {
    let bounds = RectI::from_size(16, 16);
    let src = gradient_u8(bounds, Components::Rgba);
    let mut dst = ImageBuffer::filled(bounds, Components::Rgba, SENTINEL).unwrap();
    let mut kernel = PhaseRecorder::default();
    let abort = AbortHandle::new();
    abort.abort();

    let status = processor(TileMode::Rows(4))
        .process::<u8, 4, _, _>(&mut kernel, &mut dst, &[Some(&src)], bounds, &abort)
        .unwrap();
    assert_eq!(status, RenderStatus::Aborted);
    assert_eq!(kernel.rows.load(Ordering::Relaxed), 0);
    assert_eq!(kernel.post, 0);
    assert!(dst.data().iter().all(|&v| v == SENTINEL));
}

#[test]
fn test_abort_stops_at_next_row() {
    let bounds = RectI::from_size(8, 10);
    let src = gradient_u8(bounds, Components::Alpha);
    let mut dst = ImageBuffer::filled(bounds, Components::Alpha, SENTINEL).unwrap();
    let abort = AbortHandle::new();
    let rows = AtomicUsize::new(0);
    let trigger = abort.clone();

    let status = processor(TileMode::Single)
        .process_with::<u8, 1, _, _>(&mut dst, &[Some(&src)], bounds, &abort, |row, sources| {
            let y = row.y();
            for (x, px) in row.pixels_mut() {
                px.copy_from_slice(sources[0].pixel(x, y).unwrap());
            }
            if rows.fetch_add(1, Ordering::Relaxed) + 1 == 3 {
                trigger.abort();
            }
        })
        .unwrap();

    assert_eq!(status, RenderStatus::Aborted);
    assert_eq!(rows.load(Ordering::Relaxed), 3);
    for y in 0..10 {
        let row = dst.row(y).unwrap();
        if y < 3 {
            assert_eq!(row, src.row(y).unwrap());
        } else {
            assert!(row.iter().all(|&v| v == SENTINEL));
        }
    }
}

#[test]
fn test_parallel_abort_leaves_consistent_pixels() {
    let bounds = RectI::from_size(64, 64);
    let src = gradient_u8(bounds, Components::Rgb);
    let mut dst = ImageBuffer::filled(bounds, Components::Rgb, SENTINEL).unwrap();
    let rows = AtomicUsize::new(0);
    let budget = 10;
    let check = || rows.load(Ordering::Relaxed) >= budget;

    let status = processor(TileMode::Rows(8))
        .process_with::<u8, 3, _, _>(&mut dst, &[Some(&src)], bounds, &check, |row, sources| {
            let y = row.y();
            for (x, px) in row.pixels_mut() {
                px.copy_from_slice(sources[0].pixel(x, y).unwrap());
            }
            rows.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

    assert_eq!(status, RenderStatus::Aborted);
    assert!(rows.load(Ordering::Relaxed) < 64);
    for y in 0..64 {
        let d = dst.row(y).unwrap();
        let fully_written = d == src.row(y).unwrap();
        let untouched = d.iter().all(|&v| v == SENTINEL);
        assert!(fully_written || untouched, "row {y} partially written");
    }
}

#[test]
fn test_integer_results_clamped() {
    let bounds = RectI::from_size(4, 1);
    let mut dst = ImageBuffer::<u8>::new(bounds, Components::Xy).unwrap();
    ImageProcessor::default()
        .process_with::<u8, 2, _, _>(&mut dst, &[], bounds, &NeverAbort, |row, _| {
            for (x, px) in row.pixels_mut() {
                px[0] = u8::from_f32(300.0 * x as f32);
                px[1] = u8::from_f32(-5.0 + 0.4 * x as f32);
            }
        })
        .unwrap();
    assert_eq!(dst.data(), &[0, 0, 255, 0, 255, 0, 255, 0]);

    let mut dst16 = ImageBuffer::<u16>::new(bounds, Components::Alpha).unwrap();
    ImageProcessor::default()
        .process_with::<u16, 1, _, _>(&mut dst16, &[], bounds, &NeverAbort, |row, _| {
            row.samples_mut().fill(u16::from_normalized(2.0));
        })
        .unwrap();
    assert!(dst16.data().iter().all(|&v| v == u16::MAX));
}

fn copy_any_roundtrip<T: AnySample>() {
    let bounds = RectI::new(-3, 2, 13, 9);
    for components in [Components::Alpha, Components::Xy, Components::Rgb, Components::Rgba] {
        let len = bounds.area() as usize * components.count();
        let data: Vec<T> = (0..len).map(|i| T::from_normalized((i % 17) as f32 / 16.0)).collect();
        let src = T::into_any(ImageBuffer::from_data(bounds, components, data).unwrap());
        let mut dst = AnyImage::new(bounds, src.format()).unwrap();

        let status = processor(TileMode::Rows(3))
            .process_any(&mut Copier::new(), &mut dst, &[Some(&src)], bounds, &NeverAbort)
            .unwrap();
        assert_eq!(status, RenderStatus::Completed);
        assert_eq!(
            dst.as_typed::<T>().unwrap().data(),
            src.as_typed::<T>().unwrap().data(),
            "{} copy differs",
            src.format()
        );
    }
}

#[test]
fn test_process_any_every_format() {
    copy_any_roundtrip::<u8>();
    copy_any_roundtrip::<u16>();
    copy_any_roundtrip::<half::f16>();
    copy_any_roundtrip::<f32>();
}

#[test]
fn test_dedicated_pool_matches_global() {
    let bounds = RectI::from_size(40, 30);
    let src = gradient_u8(bounds, Components::Rgba);
    let config = ProcessorConfig::default().with_threads(2).with_tile_mode(TileMode::Rows(7));
    let pooled = ImageProcessor::new(config).unwrap();

    let mut a = ImageBuffer::filled(bounds, Components::Rgba, SENTINEL).unwrap();
    let mut b = ImageBuffer::filled(bounds, Components::Rgba, SENTINEL).unwrap();
    pooled
        .process::<u8, 4, _, _>(&mut Copier::new(), &mut a, &[Some(&src)], bounds, &NeverAbort)
        .unwrap();
    ImageProcessor::default()
        .process::<u8, 4, _, _>(&mut Copier::new(), &mut b, &[Some(&src)], bounds, &NeverAbort)
        .unwrap();
    assert_eq!(a.data(), b.data());
}

#[test]
fn test_fill_with_mask_and_mix() {
    let bounds = RectI::from_size(4, 1);
    let src = ImageBuffer::<u8>::filled(bounds, Components::Rgba, 100).unwrap();
    let mask = ImageBuffer::<u8>::from_data(
        RectI::from_size(2, 1),
        Components::Rgba,
        vec![0, 0, 0, 255, 0, 0, 0, 0],
    )
    .unwrap();
    let mut dst = ImageBuffer::<u8>::new(bounds, Components::Rgba).unwrap();
    let mut fill = Fill::new([1.0, 1.0, 1.0, 1.0]).with_blend(MaskMix::new(0.5));

    ImageProcessor::default()
        .process::<u8, 4, _, _>(&mut fill, &mut dst, &[Some(&src), Some(&mask)], bounds, &NeverAbort)
        .unwrap();
    // Full mask: halfway to white.
    assert_eq!(dst.pixel(0, 0).unwrap(), &[178, 178, 178, 178]);
    // Zero mask and outside the mask: source unchanged.
    assert_eq!(dst.pixel(1, 0).unwrap(), &[100, 100, 100, 100]);
    assert_eq!(dst.pixel(3, 0).unwrap(), &[100, 100, 100, 100]);
}

#[test]
fn test_fill_with_alpha_mask() {
    let bounds = RectI::from_size(2, 1);
    let src = ImageBuffer::<u8>::filled(bounds, Components::Rgba, 100).unwrap();
    let mask = ImageBuffer::<u8>::from_data(bounds, Components::Alpha, vec![255, 0]).unwrap();
    let mut fill = Fill::new([1.0, 1.0, 1.0, 1.0]).with_blend(MaskMix::new(0.5));

    let mut dst = ImageBuffer::<u8>::new(bounds, Components::Rgba).unwrap();
    ImageProcessor::default()
        .process::<u8, 4, _, _>(&mut fill, &mut dst, &[Some(&src), Some(&mask)], bounds, &NeverAbort)
        .unwrap();
    assert_eq!(dst.pixel(0, 0).unwrap(), &[178, 178, 178, 178]);
    assert_eq!(dst.pixel(1, 0).unwrap(), &[100, 100, 100, 100]);

    // Same through runtime dispatch; source 0 still has to match.
    let mut any_dst = AnyImage::new(bounds, ImageFormat::new(BitDepth::U8, Components::Rgba)).unwrap();
    let any_src = AnyImage::from(src);
    let any_mask = AnyImage::from(mask);
    ImageProcessor::default()
        .process_any(&mut fill, &mut any_dst, &[Some(&any_src), Some(&any_mask)], bounds, &NeverAbort)
        .unwrap();
    assert_eq!(any_dst.as_typed::<u8>().unwrap().data(), dst.data());

    let err = ImageProcessor::default()
        .process_any(&mut fill, &mut any_dst, &[Some(&any_mask), Some(&any_mask)], bounds, &NeverAbort)
        .unwrap_err();
    assert!(matches!(err, OpsError::ComponentMismatch { index: 0, .. }));
}

#[test]
fn test_fill_plain() {
    let bounds = RectI::from_size(3, 3);
    let mut dst = ImageBuffer::<f32>::new(bounds, Components::Alpha).unwrap();
    ImageProcessor::default()
        .process::<f32, 1, _, _>(&mut Fill::new([0.0, 0.0, 0.0, 0.75]), &mut dst, &[], bounds, &NeverAbort)
        .unwrap();
    assert!(dst.data().iter().all(|&v| v == 0.75));
}

#[test]
fn test_transform_translation_in_proxy_render() {
    // Half-resolution render: a 4 unit canonical move is 2 pixels.
    let scale = RenderScale::new(0.5, 0.5);
    let bounds = RectI::from_size(10, 4);
    let src = gradient_u8(bounds, Components::Alpha).with_render_scale(scale);
    let mut dst = ImageBuffer::<u8>::new(bounds, Components::Alpha)
        .unwrap()
        .with_render_scale(scale);
    let params = TransformParams {
        translate: DVec2::new(4.0, 0.0),
        ..Default::default()
    };
    let mut kernel = TransformKernel::new(params, CoordinateSpace::of_image(&dst)).with_filter(Filter::Nearest);

    ImageProcessor::default()
        .process::<u8, 1, _, _>(&mut kernel, &mut dst, &[Some(&src)], bounds, &NeverAbort)
        .unwrap();
    for y in 0..4 {
        assert_eq!(dst.pixel(0, y).unwrap(), &[0]);
        assert_eq!(dst.pixel(1, y).unwrap(), &[0]);
        for x in 2..10 {
            assert_eq!(dst.pixel(x, y).unwrap(), src.pixel(x - 2, y).unwrap());
        }
    }
}

#[test]
fn test_transform_identity_bilinear_is_exact() {
    let bounds = RectI::new(-5, -5, 11, 7);
    let src = gradient_u8(bounds, Components::Rgb);
    let mut dst = ImageBuffer::<u8>::new(bounds, Components::Rgb).unwrap();
    let mut kernel = TransformKernel::new(TransformParams::default(), CoordinateSpace::default());
    ImageProcessor::default()
        .process::<u8, 3, _, _>(&mut kernel, &mut dst, &[Some(&src)], bounds, &NeverAbort)
        .unwrap();
    assert_eq!(dst.data(), src.data());
}

#[test]
fn test_transform_far_translate_is_black() {
    let bounds = RectI::from_size(4, 4);
    let src = ImageBuffer::<f32>::filled(bounds, Components::Rgba, 1.0).unwrap();
    for filter in [Filter::Bilinear, Filter::Nearest] {
        for translate in [DVec2::new(-3e9, 0.0), DVec2::new(0.0, 3e9), DVec2::new(1e300, -1e300)] {
            let mut dst = ImageBuffer::<f32>::filled(bounds, Components::Rgba, 0.5).unwrap();
            let params = TransformParams {
                translate,
                ..Default::default()
            };
            let mut kernel = TransformKernel::new(params, CoordinateSpace::default()).with_filter(filter);
            let status = ImageProcessor::default()
                .process::<f32, 4, _, _>(&mut kernel, &mut dst, &[Some(&src)], bounds, &NeverAbort)
                .unwrap();
            assert_eq!(status, RenderStatus::Completed);
            assert!(dst.data().iter().all(|&v| v == 0.0), "{filter:?} translate {translate}");
        }
    }
}

#[test]
fn test_transform_zero_render_scale_rejected() {
    let bounds = RectI::from_size(4, 4);
    let src = gradient_f32(bounds, Components::Alpha);
    let mut dst = ImageBuffer::<f32>::filled(bounds, Components::Alpha, 0.5).unwrap();
    let space = CoordinateSpace::new(1.0, RenderScale::new(0.0, 0.0), false);
    let mut kernel = TransformKernel::new(TransformParams::default(), space).with_filter(Filter::Nearest);
    let err = ImageProcessor::default()
        .process::<f32, 1, _, _>(&mut kernel, &mut dst, &[Some(&src)], bounds, &NeverAbort)
        .unwrap_err();
    assert!(matches!(err, OpsError::InvalidParameter(_)));
    assert!(dst.data().iter().all(|&v| v == 0.5));
}

#[test]
fn test_degenerate_transform_fails_before_pixels() {
    let bounds = RectI::from_size(4, 4);
    let src = gradient_f32(bounds, Components::Rgba);
    let mut dst = ImageBuffer::<f32>::filled(bounds, Components::Rgba, 0.5).unwrap();
    let params = TransformParams {
        scale: DVec2::new(1.0, 0.0),
        ..Default::default()
    };
    let mut kernel = TransformKernel::new(params, CoordinateSpace::default());
    let err = ImageProcessor::default()
        .process::<f32, 4, _, _>(&mut kernel, &mut dst, &[Some(&src)], bounds, &NeverAbort)
        .unwrap_err();
    assert!(matches!(err, OpsError::DegenerateTransform(_)));
    assert!(dst.data().iter().all(|&v| v == 0.5));
}
