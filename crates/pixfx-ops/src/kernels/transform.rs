//! Affine resampling.
//!
//! The kernel maps every destination pixel centre through the inverse
//! transform expressed in pixel space and samples source 0 there. Samples
//! that fall outside the source are transparent black.
//!
//! ```rust
//! use pixfx_core::{Components, ImageBuffer, RectI};
//! use pixfx_math::{CoordinateSpace, TransformParams};
//! use pixfx_math::glam::DVec2;
//! use pixfx_ops::{Filter, ImageProcessor, NeverAbort, TransformKernel};
//!
//! let mut src = ImageBuffer::<f32>::new(RectI::from_size(8, 8), Components::Alpha).unwrap();
//! *src.pixel_mut(2, 3).unwrap().first_mut().unwrap() = 1.0;
//! let mut dst = ImageBuffer::<f32>::new(RectI::from_size(8, 8), Components::Alpha).unwrap();
//!
//! let params = TransformParams { translate: DVec2::new(3.0, 1.0), ..Default::default() };
//! let mut kernel = TransformKernel::new(params, CoordinateSpace::default()).with_filter(Filter::Nearest);
//! ImageProcessor::default()
//!     .process::<f32, 1, _, _>(&mut kernel, &mut dst, &[Some(&src)], RectI::from_size(8, 8), &NeverAbort)
//!     .unwrap();
//! assert_eq!(dst.pixel(5, 4).unwrap()[0], 1.0);
//! ```

use tracing::debug;

use crate::error::{OpsError, OpsResult};
use crate::processor::{DstRow, PixelKernel, SourceImage};
use pixfx_core::{RectI, Sample};
use pixfx_math::{CoordinateSpace, Matrix3x3, Point3D, TransformParams, inverse_transform};

/// Inverse determinants below this are treated as singular.
const DET_EPSILON: f64 = 1e-12;

/// Resampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Filter {
    /// Nearest source pixel.
    Nearest,
    /// Bilinear blend of the four nearest source pixels.
    #[default]
    Bilinear,
}

/// Resamples source 0 through an affine transform.
#[derive(Debug, Clone)]
pub struct TransformKernel {
    canonical_inverse: Matrix3x3,
    space: CoordinateSpace,
    filter: Filter,
    pixel_inverse: Matrix3x3,
}

impl TransformKernel {
    /// Kernel for transform node parameters given in canonical coordinates.
    pub fn new(params: TransformParams, space: CoordinateSpace) -> Self {
        Self::from_canonical_inverse(inverse_transform(&params), space)
    }

    /// Kernel for a destination-to-source matrix in canonical coordinates.
    pub fn from_canonical_inverse(inverse: Matrix3x3, space: CoordinateSpace) -> Self {
        Self {
            canonical_inverse: inverse,
            space,
            filter: Filter::default(),
            pixel_inverse: Matrix3x3::IDENTITY,
        }
    }

    /// Sets the resampling filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Destination-to-source matrix in pixel space, valid after `pre_process`.
    pub fn pixel_inverse(&self) -> Matrix3x3 {
        self.pixel_inverse
    }

    /// True when no tap around `(sx, sy)` can land on a source pixel.
    #[inline]
    fn misses<T: Sample, const N: usize>(src: &SourceImage<'_, T, N>, sx: f64, sy: f64) -> bool {
        let b = src.bounds();
        !sx.is_finite()
            || !sy.is_finite()
            || sx < b.x1 as f64 - 1.0
            || sx > b.x2 as f64 + 1.0
            || sy < b.y1 as f64 - 1.0
            || sy > b.y2 as f64 + 1.0
    }

    #[inline]
    fn nearest<T: Sample, const N: usize>(src: &SourceImage<'_, T, N>, sx: f64, sy: f64, px: &mut [T]) {
        if Self::misses(src, sx, sy) {
            px.fill(T::ZERO);
            return;
        }
        match src.pixel(sx.floor() as i32, sy.floor() as i32) {
            Some(s) => px.copy_from_slice(s),
            None => px.fill(T::ZERO),
        }
    }

    #[inline]
    fn bilinear<T: Sample, const N: usize>(src: &SourceImage<'_, T, N>, sx: f64, sy: f64, px: &mut [T]) {
        if Self::misses(src, sx, sy) {
            px.fill(T::ZERO);
            return;
        }
        let fx = sx - 0.5;
        let fy = sy - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = (fx - x0) as f32;
        let ty = (fy - y0) as f32;
        let (x0, y0) = (x0 as i32, y0 as i32);
        let (x1, y1) = (x0.saturating_add(1), y0.saturating_add(1));

        let mut acc = [0.0f32; N];
        let taps = [
            (x0, y0, (1.0 - tx) * (1.0 - ty)),
            (x1, y0, tx * (1.0 - ty)),
            (x0, y1, (1.0 - tx) * ty),
            (x1, y1, tx * ty),
        ];
        for (x, y, w) in taps {
            if w == 0.0 {
                continue;
            }
            if let Some(s) = src.pixel(x, y) {
                for (a, v) in acc.iter_mut().zip(s) {
                    *a += v.to_f32() * w;
                }
            }
        }
        for (o, a) in px.iter_mut().zip(acc) {
            *o = T::from_f32(a);
        }
    }
}

impl PixelKernel for TransformKernel {
    fn pre_process(&mut self, window: RectI) -> OpsResult<()> {
        let det = self.canonical_inverse.determinant();
        if !det.is_finite() || det.abs() <= DET_EPSILON {
            return Err(OpsError::DegenerateTransform(det));
        }
        let space = &self.space;
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(space.pixel_aspect_ratio) || !valid(space.render_scale.x) || !valid(space.render_scale.y) {
            return Err(OpsError::InvalidParameter(format!(
                "coordinate space needs positive render scale and pixel aspect, got scale {}x{} aspect {}",
                space.render_scale.x, space.render_scale.y, space.pixel_aspect_ratio
            )));
        }
        let pixel_inverse = space.to_pixel_space(&self.canonical_inverse);
        if !pixel_inverse.is_finite() {
            return Err(OpsError::InvalidParameter("pixel-space inverse has non-finite entries".into()));
        }
        self.pixel_inverse = pixel_inverse;
        debug!(%window, filter = ?self.filter, "Prepared transform");
        Ok(())
    }

    fn process_row<T: Sample, const N: usize>(
        &self,
        row: &mut DstRow<'_, T, N>,
        sources: &[SourceImage<'_, T, N>],
    ) {
        let src = sources.first().copied().unwrap_or_else(SourceImage::absent);
        let cy = row.y() as f64 + 0.5;
        for (x, px) in row.pixels_mut() {
            let p = self.pixel_inverse * Point3D::point(x as f64 + 0.5, cy);
            let Some((sx, sy)) = p.project() else {
                px.fill(T::ZERO);
                continue;
            };
            match self.filter {
                Filter::Nearest => Self::nearest(&src, sx, sy, px),
                Filter::Bilinear => Self::bilinear(&src, sx, sy, px),
            }
        }
    }
}
