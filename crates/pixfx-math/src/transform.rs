//! Elementary and composite 2D transform builders.
//!
//! Every "around a point" builder uses the same conjugation:
//! `T(p) . M . T(-p)`.
//!
//! Two kinds of composite builders exist:
//!
//! - [`get_transform`] keeps one fixed composition used by existing
//!   transform-style call sites.
//! - [`forward_transform`] / [`inverse_transform`] name the direction
//!   explicitly: source to destination, and destination to source. The
//!   inverse is built from inverted factors in reverse order, not by
//!   inverting the forward matrix.
//!
//! ```rust
//! use pixfx_math::{forward_transform, inverse_transform, Matrix3x3, TransformParams};
//! use pixfx_math::glam::DVec2;
//!
//! let params = TransformParams {
//!     translate: DVec2::new(12.0, -3.0),
//!     scale: DVec2::new(2.0, 0.5),
//!     skew_x: 0.1,
//!     center: DVec2::new(960.0, 540.0),
//!     ..TransformParams::from_degrees(30.0)
//! };
//! let round = inverse_transform(&params) * forward_transform(&params);
//! assert!(round.approx_eq(&Matrix3x3::IDENTITY, 1e-9));
//! ```

use crate::matrix::{Matrix3x3, Point3D};
use glam::DVec2;

/// Translation by `(x, y)`.
#[inline]
pub const fn translate(x: f64, y: f64) -> Matrix3x3 {
    Matrix3x3::new(1.0, 0.0, x, 0.0, 1.0, y, 0.0, 0.0, 1.0)
}

/// Rotation by `rads`, laid out as `[cos sin 0; -sin cos 0; 0 0 1]`.
///
/// ```rust
/// use pixfx_math::{rotate, Point3D};
///
/// let p = rotate(std::f64::consts::FRAC_PI_2) * Point3D::point(1.0, 0.0);
/// assert!(p.x.abs() < 1e-12);
/// assert!((p.y + 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn rotate(rads: f64) -> Matrix3x3 {
    let (s, c) = rads.sin_cos();
    Matrix3x3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Rotation by `rads` about `p`.
#[inline]
pub fn rotate_around_point(rads: f64, p: Point3D) -> Matrix3x3 {
    translate(p.x, p.y) * rotate(rads) * translate(-p.x, -p.y)
}

/// Non-uniform scale.
#[inline]
pub const fn scale(x: f64, y: f64) -> Matrix3x3 {
    Matrix3x3::diagonal(x, y, 1.0)
}

/// Uniform scale.
#[inline]
pub const fn scale_uniform(s: f64) -> Matrix3x3 {
    scale(s, s)
}

/// Non-uniform scale about `p`.
#[inline]
pub fn scale_around_point(sx: f64, sy: f64, p: Point3D) -> Matrix3x3 {
    translate(p.x, p.y) * scale(sx, sy) * translate(-p.x, -p.y)
}

/// Horizontal shear: `x' = x + k * y`.
#[inline]
pub const fn shear_x(k: f64) -> Matrix3x3 {
    Matrix3x3::new(1.0, k, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0)
}

/// Vertical shear: `y' = y + k * x`.
#[inline]
pub const fn shear_y(k: f64) -> Matrix3x3 {
    Matrix3x3::new(1.0, 0.0, 0.0, k, 1.0, 0.0, 0.0, 0.0, 1.0)
}

/// Order in which the two shears of a skew are applied to a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkewOrder {
    /// Horizontal shear first, then vertical.
    #[default]
    XY,
    /// Vertical shear first, then horizontal.
    YX,
}

/// Combined skew.
pub fn skew_xy(skew_x: f64, skew_y: f64, order: SkewOrder) -> Matrix3x3 {
    match order {
        SkewOrder::XY => shear_y(skew_y) * shear_x(skew_x),
        SkewOrder::YX => shear_x(skew_x) * shear_y(skew_y),
    }
}

/// Inverse of [`skew_xy`], built from the inverted shears.
pub fn skew_xy_inverse(skew_x: f64, skew_y: f64, order: SkewOrder) -> Matrix3x3 {
    match order {
        SkewOrder::XY => shear_x(-skew_x) * shear_y(-skew_y),
        SkewOrder::YX => shear_y(-skew_y) * shear_x(-skew_x),
    }
}

/// Composite transform with the fixed order
/// `T(center) . Scale(1/scale) . R(rads) . T(-center) . T(-translate) . ShearX(-shear_x)`.
///
/// The shear is applied to a point first and the pivot translation last. A
/// zero scale component produces infinite entries.
pub fn get_transform(
    translate_by: DVec2,
    scale_by: DVec2,
    shear: f64,
    rads: f64,
    center: DVec2,
) -> Matrix3x3 {
    translate(center.x, center.y)
        * scale(1.0 / scale_by.x, 1.0 / scale_by.y)
        * rotate(rads)
        * translate(-center.x, -center.y)
        * translate(-translate_by.x, -translate_by.y)
        * shear_x(-shear)
}

/// Parameters of a transform node, in canonical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    /// Translation applied after the pivot-relative operations
    pub translate: DVec2,
    /// Scale factors
    pub scale: DVec2,
    /// Horizontal skew
    pub skew_x: f64,
    /// Vertical skew
    pub skew_y: f64,
    /// Order of the two skews
    pub skew_order: SkewOrder,
    /// Rotation in radians
    pub rotate: f64,
    /// Pivot for scale, skew and rotation
    pub center: DVec2,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            translate: DVec2::ZERO,
            scale: DVec2::ONE,
            skew_x: 0.0,
            skew_y: 0.0,
            skew_order: SkewOrder::XY,
            rotate: 0.0,
            center: DVec2::ZERO,
        }
    }
}

impl TransformParams {
    /// Identity parameters with a rotation given in degrees.
    pub fn from_degrees(rotate_degrees: f64) -> Self {
        Self {
            rotate: rotate_degrees.to_radians(),
            ..Self::default()
        }
    }

    /// Rotation in degrees.
    pub fn rotate_degrees(&self) -> f64 {
        self.rotate.to_degrees()
    }

    /// Returns true if no component moves a point.
    pub fn is_identity(&self) -> bool {
        self.translate == DVec2::ZERO
            && self.scale == DVec2::ONE
            && self.skew_x == 0.0
            && self.skew_y == 0.0
            && self.rotate == 0.0
    }

    /// Returns true if the scale makes the transform non-invertible.
    pub fn is_degenerate(&self) -> bool {
        self.scale.x == 0.0 || self.scale.y == 0.0
    }
}

/// Source to destination:
/// `T(translate + center) . R(rotate) . Skew . Scale . T(-center)`.
pub fn forward_transform(p: &TransformParams) -> Matrix3x3 {
    translate(p.translate.x + p.center.x, p.translate.y + p.center.y)
        * rotate(p.rotate)
        * skew_xy(p.skew_x, p.skew_y, p.skew_order)
        * scale(p.scale.x, p.scale.y)
        * translate(-p.center.x, -p.center.y)
}

/// Destination to source, the inverse of [`forward_transform`]:
/// `T(center) . Scale^-1 . Skew^-1 . R(-rotate) . T(-translate - center)`.
///
/// Infinite entries when [`TransformParams::is_degenerate`].
pub fn inverse_transform(p: &TransformParams) -> Matrix3x3 {
    translate(p.center.x, p.center.y)
        * scale(1.0 / p.scale.x, 1.0 / p.scale.y)
        * skew_xy_inverse(p.skew_x, p.skew_y, p.skew_order)
        * rotate(-p.rotate)
        * translate(-p.translate.x - p.center.x, -p.translate.y - p.center.y)
}
