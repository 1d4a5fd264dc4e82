//! Pixel and canonical coordinate spaces.
//!
//! Hosts describe geometry in canonical coordinates, which do not depend on
//! the render scale (proxy rendering), the pixel aspect ratio, or whether a
//! frame is rendered as interlaced fields. Kernels address pixels. The two are
//! related by a diagonal scale:
//!
//! ```text
//! pixel -> canonical: (par / rsx, 1 / (rsy * field))     field = 0.5 when fielded, else 1
//! canonical -> pixel: (rsx / par, rsy * field)
//! ```
//!
//! A canonical transform `M` becomes a pixel transform as
//! `ToPixel . M . ToCanonical`, see [`CoordinateSpace::to_pixel_space`].

use crate::matrix::{Matrix3x3, Point3D};
use pixfx_core::{ImageBuffer, RectD, RectI, RenderScale, Sample};

#[inline]
fn field_factor(fielded: bool) -> f64 {
    if fielded { 0.5 } else { 1.0 }
}

/// Scale from pixel to canonical coordinates.
#[inline]
pub fn pixel_to_canonical(
    pixel_aspect_ratio: f64,
    render_scale_x: f64,
    render_scale_y: f64,
    fielded: bool,
) -> Matrix3x3 {
    Matrix3x3::diagonal(
        pixel_aspect_ratio / render_scale_x,
        1.0 / (render_scale_y * field_factor(fielded)),
        1.0,
    )
}

/// Scale from canonical to pixel coordinates, the per-axis reciprocal of
/// [`pixel_to_canonical`].
#[inline]
pub fn canonical_to_pixel(
    pixel_aspect_ratio: f64,
    render_scale_x: f64,
    render_scale_y: f64,
    fielded: bool,
) -> Matrix3x3 {
    Matrix3x3::diagonal(
        render_scale_x / pixel_aspect_ratio,
        render_scale_y * field_factor(fielded),
        1.0,
    )
}

/// Render metadata needed to move between the two spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordinateSpace {
    /// Pixel aspect ratio
    pub pixel_aspect_ratio: f64,
    /// Render scale of the pixel grid
    pub render_scale: RenderScale,
    /// Whether the pixel grid is one field of an interlaced frame
    pub fielded: bool,
}

impl Default for CoordinateSpace {
    fn default() -> Self {
        Self {
            pixel_aspect_ratio: 1.0,
            render_scale: RenderScale::FULL,
            fielded: false,
        }
    }
}

impl CoordinateSpace {
    /// Creates a coordinate space.
    pub fn new(pixel_aspect_ratio: f64, render_scale: RenderScale, fielded: bool) -> Self {
        Self {
            pixel_aspect_ratio,
            render_scale,
            fielded,
        }
    }

    /// Coordinate space of an image buffer.
    pub fn of_image<T: Sample>(image: &ImageBuffer<T>) -> Self {
        Self::new(image.pixel_aspect_ratio(), image.render_scale(), image.is_fielded())
    }

    /// Pixel to canonical matrix.
    pub fn to_canonical(&self) -> Matrix3x3 {
        pixel_to_canonical(
            self.pixel_aspect_ratio,
            self.render_scale.x,
            self.render_scale.y,
            self.fielded,
        )
    }

    /// Canonical to pixel matrix.
    pub fn to_pixel(&self) -> Matrix3x3 {
        canonical_to_pixel(
            self.pixel_aspect_ratio,
            self.render_scale.x,
            self.render_scale.y,
            self.fielded,
        )
    }

    /// Expresses a canonical-space transform in pixel space.
    pub fn to_pixel_space(&self, canonical: &Matrix3x3) -> Matrix3x3 {
        self.to_pixel() * *canonical * self.to_canonical()
    }
}

/// Bounding box of a rectangle mapped through `m`.
///
/// The four corners are transformed and projected. If a corner lands on or
/// behind the projection plane (`z <= 0`) the result is unbounded.
pub fn transform_bounds(m: &Matrix3x3, rect: &RectD) -> RectD {
    let corners = [
        Point3D::point(rect.x1, rect.y1),
        Point3D::point(rect.x2, rect.y1),
        Point3D::point(rect.x2, rect.y2),
        Point3D::point(rect.x1, rect.y2),
    ];
    let mut out = RectD::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for corner in corners {
        let p = *m * corner;
        if !(p.z > 0.0) {
            return RectD::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::INFINITY);
        }
        let (x, y) = (p.x / p.z, p.y / p.z);
        out.x1 = out.x1.min(x);
        out.y1 = out.y1.min(y);
        out.x2 = out.x2.max(x);
        out.y2 = out.y2.max(y);
    }
    out
}

/// Smallest pixel rectangle enclosing a canonical rectangle.
///
/// Infinite edges saturate to the `i32` range.
pub fn to_pixel_enclosing(rect: &RectD, render_scale: RenderScale, pixel_aspect_ratio: f64) -> RectI {
    let sx = render_scale.x / pixel_aspect_ratio;
    let sy = render_scale.y;
    RectI::new(
        (rect.x1 * sx).floor() as i32,
        (rect.y1 * sy).floor() as i32,
        (rect.x2 * sx).ceil() as i32,
        (rect.y2 * sy).ceil() as i32,
    )
}

/// Canonical rectangle covered by a pixel rectangle.
pub fn to_canonical(rect: &RectI, render_scale: RenderScale, pixel_aspect_ratio: f64) -> RectD {
    let sx = pixel_aspect_ratio / render_scale.x;
    let sy = 1.0 / render_scale.y;
    RectD::new(
        rect.x1 as f64 * sx,
        rect.y1 as f64 * sy,
        rect.x2 as f64 * sx,
        rect.y2 as f64 * sy,
    )
}
