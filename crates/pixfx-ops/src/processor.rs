//! Tiled parallel processing of a render window.
//!
//! A render runs in three phases:
//!
//! 1. [`PixelKernel::pre_process`] on the calling thread, with exclusive
//!    access to the kernel.
//! 2. The window is partitioned into tiles and every tile is handed to one
//!    worker. Workers share the kernel and the sources read-only and own the
//!    destination rows of their tile exclusively.
//! 3. [`PixelKernel::post_process`] on the calling thread, after every tile
//!    has finished.
//!
//! Formats are checked before phase 1, so a mismatch never touches a pixel.
//! The abort signal is polled before every scanline; once it fires, workers
//! stop at the next row and the render reports [`RenderStatus::Aborted`].
//!
//! # Example
//!
//! ```rust
//! use pixfx_core::{Components, ImageBuffer, RectI};
//! use pixfx_ops::{ImageProcessor, NeverAbort, RenderStatus};
//!
//! let mut dst = ImageBuffer::<f32>::new(RectI::from_size(64, 64), Components::Rgba).unwrap();
//! let status = ImageProcessor::default()
//!     .process_with::<f32, 4, _, _>(&mut dst, &[], RectI::new(0, 0, 32, 64), &NeverAbort, |row, _| {
//!         for (_, px) in row.pixels_mut() {
//!             px.copy_from_slice(&[1.0, 0.5, 0.25, 1.0]);
//!         }
//!     })
//!     .unwrap();
//! assert_eq!(status, RenderStatus::Completed);
//! assert_eq!(dst.pixel(31, 0).unwrap()[1], 0.5);
//! assert_eq!(dst.pixel(32, 0).unwrap()[1], 0.0);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(feature = "parallel")]
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::abort::Abort;
use crate::config::ProcessorConfig;
use crate::error::{OpsError, OpsResult};
use crate::tiling::{TileRows, partition, split_tiles, validate_partition};
use pixfx_core::{ImageBuffer, RectI, Sample};

/// Outcome of a render call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Every pixel of the window was written.
    Completed,
    /// The abort signal fired; the window is partially written.
    Aborted,
    /// The window did not intersect the destination.
    Skipped,
}

impl RenderStatus {
    /// Returns true for [`RenderStatus::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Read-only view of an optional source image with `N` channels.
#[derive(Debug, Clone, Copy)]
pub struct SourceImage<'a, T: Sample, const N: usize> {
    image: Option<&'a ImageBuffer<T>>,
}

impl<'a, T: Sample, const N: usize> SourceImage<'a, T, N> {
    /// Wraps a source, `None` for an unconnected input.
    pub fn new(image: Option<&'a ImageBuffer<T>>) -> Self {
        Self { image }
    }

    /// Unconnected input.
    pub fn absent() -> Self {
        Self { image: None }
    }

    /// Returns true if an image is attached.
    pub fn is_connected(&self) -> bool {
        self.image.is_some()
    }

    /// Underlying image.
    pub fn image(&self) -> Option<&'a ImageBuffer<T>> {
        self.image
    }

    /// Pixel bounds, empty when unconnected.
    pub fn bounds(&self) -> RectI {
        self.image.map(|i| i.bounds()).unwrap_or(RectI::EMPTY)
    }

    /// Samples of pixel `(x, y)`, `None` outside the bounds or when unconnected.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<&'a [T]> {
        self.image?.pixel(x, y)
    }

    /// Samples of the nearest pixel inside the bounds.
    #[inline]
    pub fn pixel_clamped(&self, x: i32, y: i32) -> Option<&'a [T]> {
        let image = self.image?;
        let b = image.bounds();
        if b.is_empty() {
            return None;
        }
        image.pixel(x.clamp(b.x1, b.x2 - 1), y.clamp(b.y1, b.y2 - 1))
    }

    /// Pixel `(x, y)` by value, zero outside the bounds.
    #[inline]
    pub fn pixel_or_zero(&self, x: i32, y: i32) -> [T; N] {
        match self.pixel(x, y) {
            Some(px) => std::array::from_fn(|c| px[c]),
            None => [T::ZERO; N],
        }
    }
}

/// One destination scanline inside a tile.
///
/// Holds exclusive access to the samples of pixels `x1..x2` on row `y`.
#[derive(Debug)]
pub struct DstRow<'a, T, const N: usize> {
    y: i32,
    x1: i32,
    x2: i32,
    samples: &'a mut [T],
}

impl<'a, T: Sample, const N: usize> DstRow<'a, T, N> {
    /// Row coordinate.
    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// First column, inclusive.
    #[inline]
    pub fn x1(&self) -> i32 {
        self.x1
    }

    /// Last column, exclusive.
    #[inline]
    pub fn x2(&self) -> i32 {
        self.x2
    }

    /// Pixel count.
    #[inline]
    pub fn width(&self) -> usize {
        (self.x2 - self.x1) as usize
    }

    /// Interleaved samples of the row.
    pub fn samples(&self) -> &[T] {
        &*self.samples
    }

    /// Mutable interleaved samples of the row.
    pub fn samples_mut(&mut self) -> &mut [T] {
        &mut *self.samples
    }

    /// Iterates `(x, pixel)` pairs left to right.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = (i32, &mut [T])> + '_ {
        (self.x1..).zip(self.samples.chunks_exact_mut(N))
    }

    /// Samples of pixel `x`, `None` outside the row.
    pub fn pixel_mut(&mut self, x: i32) -> Option<&mut [T]> {
        if x < self.x1 || x >= self.x2 {
            return None;
        }
        let i = (x - self.x1) as usize * N;
        self.samples.get_mut(i..i + N)
    }
}

/// Per-pixel operation driven by [`ImageProcessor`].
///
/// `process_row` runs concurrently on many workers and only gets shared
/// access to the kernel. State it needs is prepared in `pre_process`.
pub trait PixelKernel: Sync {
    /// Runs once before any tile, on the calling thread.
    fn pre_process(&mut self, window: RectI) -> OpsResult<()> {
        let _ = window;
        Ok(())
    }

    /// Source slots read as masks.
    ///
    /// A mask only has to match the destination render scale. Its component
    /// layout is free, since masks are read through their last channel
    /// (see [`crate::MaskMix::mask_value`]).
    fn mask_slots(&self) -> &[usize] {
        &[]
    }

    /// Writes one destination scanline.
    fn process_row<T: Sample, const N: usize>(
        &self,
        row: &mut DstRow<'_, T, N>,
        sources: &[SourceImage<'_, T, N>],
    );

    /// Runs once after every tile finished, on the calling thread.
    fn post_process<T: Sample, const N: usize>(
        &mut self,
        dst: &mut ImageBuffer<T>,
        window: RectI,
    ) -> OpsResult<()> {
        let _ = (dst, window);
        Ok(())
    }
}

/// Drives kernels over tiled render windows.
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    config: ProcessorConfig,
    #[cfg(feature = "parallel")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Default for ImageProcessor {
    /// Processor on the global pool with default tiling.
    fn default() -> Self {
        Self {
            config: ProcessorConfig::default(),
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }
}

impl ImageProcessor {
    /// Creates a processor, building a dedicated pool when
    /// [`ProcessorConfig::threads`] is set.
    pub fn new(config: ProcessorConfig) -> OpsResult<Self> {
        #[cfg(feature = "parallel")]
        let pool = match config.threads {
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("pixfx-worker-{i}"))
                    .build()
                    .map_err(|e| OpsError::ThreadPool(e.to_string()))?;
                debug!(threads = pool.current_num_threads(), "Created worker pool");
                Some(Arc::new(pool))
            }
            None => None,
        };
        Ok(Self {
            config,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    /// Processor configured from the environment.
    pub fn from_env() -> OpsResult<Self> {
        Self::new(ProcessorConfig::from_env())
    }

    /// Active configuration.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Number of workers tiles are spread over.
    pub fn workers(&self) -> usize {
        #[cfg(feature = "parallel")]
        {
            match &self.pool {
                Some(pool) => pool.current_num_threads(),
                None => rayon::current_num_threads(),
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            1
        }
    }

    /// Renders `window` of `dst` with a kernel.
    ///
    /// The window is clipped to the destination bounds; an empty result is
    /// [`RenderStatus::Skipped`] and runs neither kernel phase.
    /// `post_process` is skipped when the render aborts.
    pub fn process<T, const N: usize, K, A>(
        &self,
        kernel: &mut K,
        dst: &mut ImageBuffer<T>,
        sources: &[Option<&ImageBuffer<T>>],
        window: RectI,
        abort: &A,
    ) -> OpsResult<RenderStatus>
    where
        T: Sample,
        K: PixelKernel,
        A: Abort + ?Sized,
    {
        check_sources::<T, N>(dst, sources, kernel.mask_slots())?;
        let window = window.intersect(&dst.bounds());
        if window.is_empty() {
            debug!("Render window outside destination, skipping");
            return Ok(RenderStatus::Skipped);
        }

        kernel.pre_process(window)?;

        let views: Vec<SourceImage<'_, T, N>> = sources.iter().map(|s| SourceImage::new(*s)).collect();
        let shared: &K = kernel;
        let status = self.run_tiles(dst, &views, window, abort, |row, srcs| shared.process_row(row, srcs))?;

        if status.is_completed() {
            kernel.post_process::<T, N>(dst, window)?;
        }
        Ok(status)
    }

    /// Renders `window` of `dst` with a row closure.
    pub fn process_with<T, const N: usize, A, F>(
        &self,
        dst: &mut ImageBuffer<T>,
        sources: &[Option<&ImageBuffer<T>>],
        window: RectI,
        abort: &A,
        row_fn: F,
    ) -> OpsResult<RenderStatus>
    where
        T: Sample,
        A: Abort + ?Sized,
        F: Fn(&mut DstRow<'_, T, N>, &[SourceImage<'_, T, N>]) + Sync,
    {
        check_sources::<T, N>(dst, sources, &[])?;
        let window = window.intersect(&dst.bounds());
        if window.is_empty() {
            debug!("Render window outside destination, skipping");
            return Ok(RenderStatus::Skipped);
        }
        let views: Vec<SourceImage<'_, T, N>> = sources.iter().map(|s| SourceImage::new(*s)).collect();
        self.run_tiles(dst, &views, window, abort, row_fn)
    }

    fn run_tiles<T, const N: usize, A, F>(
        &self,
        dst: &mut ImageBuffer<T>,
        sources: &[SourceImage<'_, T, N>],
        window: RectI,
        abort: &A,
        row_fn: F,
    ) -> OpsResult<RenderStatus>
    where
        T: Sample,
        A: Abort + ?Sized,
        F: Fn(&mut DstRow<'_, T, N>, &[SourceImage<'_, T, N>]) + Sync,
    {
        let strategy = self.config.strategy_for(window, self.workers());
        let tiles = partition(window, strategy);
        validate_partition(window, &tiles)?;
        debug!(%window, tiles = tiles.len(), format = %dst.format(), "Processing render window");

        let bounds = dst.bounds();
        let views = split_tiles(dst.data_mut(), bounds, N, &tiles);
        let aborted = AtomicBool::new(false);

        self.execute(views, |tile| {
            let rect = tile.rect;
            trace!(tile = %rect, "tile");
            for (y, samples) in (rect.y1..).zip(tile.rows) {
                if abort.aborted() {
                    aborted.store(true, Ordering::Relaxed);
                    return;
                }
                let mut row = DstRow {
                    y,
                    x1: rect.x1,
                    x2: rect.x2,
                    samples,
                };
                row_fn(&mut row, sources);
            }
        });

        if aborted.load(Ordering::Relaxed) {
            debug!(%window, "Render aborted");
            Ok(RenderStatus::Aborted)
        } else {
            Ok(RenderStatus::Completed)
        }
    }

    #[cfg(feature = "parallel")]
    fn execute<'a, T, G>(&self, views: Vec<TileRows<'a, T>>, run: G)
    where
        T: Send,
        G: Fn(TileRows<'a, T>) + Sync + Send,
    {
        if views.len() <= 1 {
            views.into_iter().for_each(run);
            return;
        }
        let work = || views.into_par_iter().for_each(&run);
        match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn execute<'a, T, G>(&self, views: Vec<TileRows<'a, T>>, run: G)
    where
        G: Fn(TileRows<'a, T>),
    {
        views.into_iter().for_each(run);
    }
}

/// Checks the destination against the instantiation and every source
/// against the destination. Slots in `masks` skip the component check.
pub(crate) fn check_sources<T: Sample, const N: usize>(
    dst: &ImageBuffer<T>,
    sources: &[Option<&ImageBuffer<T>>],
    masks: &[usize],
) -> OpsResult<()> {
    let components = dst.components();
    if components.count() != N {
        return Err(OpsError::ChannelCount {
            expected: N,
            got: components.count(),
        });
    }
    for (index, src) in sources.iter().enumerate() {
        let Some(src) = src else { continue };
        if src.components() != components && !masks.contains(&index) {
            return Err(OpsError::ComponentMismatch {
                index,
                expected: components,
                got: src.components(),
            });
        }
        if src.render_scale() != dst.render_scale() {
            return Err(OpsError::RenderScaleMismatch {
                index,
                expected: dst.render_scale(),
                got: src.render_scale(),
            });
        }
    }
    Ok(())
}
