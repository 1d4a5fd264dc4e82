//! 3x3 homogeneous matrix and point types.
//!
//! # Convention
//!
//! Entries are named row by row and points are column vectors:
//!
//! ```text
//! | a b c |   | x |   | a*x + b*y + c*z |
//! | d e f | * | y | = | d*x + e*y + f*z |
//! | g h i |   | z |   | g*x + h*y + i*z |
//! ```
//!
//! # Usage
//!
//! ```rust
//! use pixfx_math::{Matrix3x3, Point3D};
//!
//! let m = Matrix3x3::new(2.0, 0.0, 5.0, 0.0, 2.0, -1.0, 0.0, 0.0, 1.0);
//! let p = m * Point3D::point(1.0, 1.0);
//! assert_eq!(p, Point3D::new(7.0, 1.0, 1.0));
//!
//! let inv = m.invert();
//! assert!((inv * m).approx_eq(&Matrix3x3::IDENTITY, 1e-12));
//! ```

use std::ops::{Mul, MulAssign};

/// Homogeneous 2D point.
///
/// `z` is 1 for positions and 0 for directions, which translations leave
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Homogeneous coordinate
    pub z: f64,
}

impl Point3D {
    /// Creates a point from all three coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Position `(x, y, 1)`.
    #[inline]
    pub const fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, 1.0)
    }

    /// Direction `(x, y, 0)`.
    #[inline]
    pub const fn vector(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Divides by `z`. Returns `None` for directions and points at infinity.
    #[inline]
    pub fn project(&self) -> Option<(f64, f64)> {
        if self.z == 0.0 {
            None
        } else {
            Some((self.x / self.z, self.y / self.z))
        }
    }

    /// Converts to a glam vector.
    #[inline]
    pub fn to_glam(&self) -> ::glam::DVec3 {
        ::glam::DVec3::new(self.x, self.y, self.z)
    }

    /// Creates from a glam vector.
    #[inline]
    pub fn from_glam(v: ::glam::DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// 3x3 matrix with row-major entries `a..i`.
///
/// A plain `Copy` value. Products return new matrices; `*=` is the only
/// in-place operation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix3x3 {
    /// Row 0, column 0
    pub a: f64,
    /// Row 0, column 1
    pub b: f64,
    /// Row 0, column 2
    pub c: f64,
    /// Row 1, column 0
    pub d: f64,
    /// Row 1, column 1
    pub e: f64,
    /// Row 1, column 2
    pub f: f64,
    /// Row 2, column 0
    pub g: f64,
    /// Row 2, column 1
    pub h: f64,
    /// Row 2, column 2
    pub i: f64,
}

impl Matrix3x3 {
    /// Zero matrix.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    /// Identity matrix.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);

    /// Creates a matrix from its entries, row by row.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
        g: f64,
        h: f64,
        i: f64,
    ) -> Self {
        Self { a, b, c, d, e, f, g, h, i }
    }

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(r: [[f64; 3]; 3]) -> Self {
        Self::new(
            r[0][0], r[0][1], r[0][2], r[1][0], r[1][1], r[1][2], r[2][0], r[2][1], r[2][2],
        )
    }

    /// Returns the rows as arrays.
    #[inline]
    pub const fn to_rows(&self) -> [[f64; 3]; 3] {
        [
            [self.a, self.b, self.c],
            [self.d, self.e, self.f],
            [self.g, self.h, self.i],
        ]
    }

    /// Diagonal matrix.
    #[inline]
    pub const fn diagonal(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, 0.0, 0.0, 0.0, y, 0.0, 0.0, 0.0, z)
    }

    /// `a(ei - hf) - b(di - gf) + c(dh - ge)`.
    ///
    /// No error condition, zero is a valid result.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * (self.e * self.i - self.h * self.f) - self.b * (self.d * self.i - self.g * self.f)
            + self.c * (self.d * self.h - self.g * self.e)
    }

    /// `s` times the adjugate (transposed cofactor matrix).
    pub fn scale_adjoint(&self, s: f64) -> Self {
        let m = self;
        Self::new(
            s * (m.e * m.i - m.h * m.f),
            s * (m.c * m.h - m.b * m.i),
            s * (m.b * m.f - m.c * m.e),
            s * (m.f * m.g - m.d * m.i),
            s * (m.a * m.i - m.c * m.g),
            s * (m.c * m.d - m.a * m.f),
            s * (m.d * m.h - m.e * m.g),
            s * (m.b * m.g - m.a * m.h),
            s * (m.a * m.e - m.b * m.d),
        )
    }

    /// Inverse via `scale_adjoint(1 / determinant)`.
    ///
    /// The determinant is not checked: a singular matrix yields infinite or
    /// NaN entries. Callers that cannot tolerate that must test the
    /// determinant first or use [`Matrix3x3::try_invert`].
    #[inline]
    pub fn invert(&self) -> Self {
        self.scale_adjoint(1.0 / self.determinant())
    }

    /// Inverse, or `None` when `|det| <= epsilon`.
    ///
    /// ```rust
    /// use pixfx_math::Matrix3x3;
    ///
    /// let singular = Matrix3x3::diagonal(1.0, 0.0, 1.0);
    /// assert!(singular.try_invert(1e-12).is_none());
    /// assert!(!singular.invert().is_finite());
    /// ```
    pub fn try_invert(&self, epsilon: f64) -> Option<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() <= epsilon {
            return None;
        }
        Some(self.scale_adjoint(1.0 / det))
    }

    /// Transpose.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::new(
            self.a, self.d, self.g, self.b, self.e, self.h, self.c, self.f, self.i,
        )
    }

    /// Applies the matrix to a homogeneous point.
    #[inline]
    pub fn transform(&self, p: Point3D) -> Point3D {
        Point3D::new(
            self.a * p.x + self.b * p.y + self.c * p.z,
            self.d * p.x + self.e * p.y + self.f * p.z,
            self.g * p.x + self.h * p.y + self.i * p.z,
        )
    }

    /// Matrix product `self * rhs`.
    #[inline]
    pub fn mul_mat(&self, rhs: &Self) -> Self {
        let (l, r) = (self, rhs);
        Self::new(
            l.a * r.a + l.b * r.d + l.c * r.g,
            l.a * r.b + l.b * r.e + l.c * r.h,
            l.a * r.c + l.b * r.f + l.c * r.i,
            l.d * r.a + l.e * r.d + l.f * r.g,
            l.d * r.b + l.e * r.e + l.f * r.h,
            l.d * r.c + l.e * r.f + l.f * r.i,
            l.g * r.a + l.h * r.d + l.i * r.g,
            l.g * r.b + l.h * r.e + l.i * r.h,
            l.g * r.c + l.h * r.f + l.i * r.i,
        )
    }

    /// Returns true if all entries are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.to_rows().iter().flatten().all(|v| v.is_finite())
    }

    /// Returns true if the bottom row is `(0, 0, 1)`.
    #[inline]
    pub fn is_affine(&self) -> bool {
        self.g == 0.0 && self.h == 0.0 && self.i == 1.0
    }

    /// Element-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.to_rows()
            .iter()
            .flatten()
            .zip(other.to_rows().iter().flatten())
            .all(|(x, y)| (x - y).abs() <= epsilon)
    }

    /// Converts to glam (column-major).
    #[inline]
    pub fn to_glam(&self) -> ::glam::DMat3 {
        ::glam::DMat3::from_cols_array_2d(&self.transpose().to_rows())
    }

    /// Creates from a glam matrix.
    #[inline]
    pub fn from_glam(m: ::glam::DMat3) -> Self {
        Self::from_rows(m.to_cols_array_2d()).transpose()
    }
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Matrix3x3 * Matrix3x3
impl Mul for Matrix3x3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl MulAssign for Matrix3x3 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.mul_mat(&rhs);
    }
}

// Matrix3x3 * Point3D
impl Mul<Point3D> for Matrix3x3 {
    type Output = Point3D;

    #[inline]
    fn mul(self, rhs: Point3D) -> Point3D {
        self.transform(rhs)
    }
}

// Matrix3x3 * f64
impl Mul<f64> for Matrix3x3 {
    type Output = Self;

    #[inline]
    #[rustfmt::skip]
    fn mul(self, s: f64) -> Self {
        Self::new(
            self.a * s, self.b * s, self.c * s,
            self.d * s, self.e * s, self.f * s,
            self.g * s, self.h * s, self.i * s,
        )
    }
}
