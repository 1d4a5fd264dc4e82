//! # pixfx-math
//!
//! 2D homogeneous transform algebra for transform-style plugins.
//!
//! - [`Matrix3x3`] - 3x3 matrix, row-major entries `a..i`
//! - [`Point3D`] - homogeneous point (`z = 1`) or direction (`z = 0`)
//! - Elementary builders: [`translate`], [`rotate`], [`scale`], [`shear_x`], ...
//! - Composite builders: [`get_transform`], [`forward_transform`], [`inverse_transform`]
//! - Coordinate spaces: [`pixel_to_canonical`], [`canonical_to_pixel`], [`CoordinateSpace`]
//!
//! # Convention
//!
//! Points are column vectors and matrices act from the left, so in a product
//! the rightmost matrix is applied first:
//!
//! ```text
//! p' = T(center) . R(rads) . T(-center) . p
//! ```
//!
//! All angles are radians. Convert degree parameters at the boundary with
//! `f64::to_radians` or [`TransformParams::from_degrees`].
//!
//! # Usage
//!
//! ```rust
//! use pixfx_math::{rotate_around_point, Point3D};
//!
//! let pivot = Point3D::point(50.0, 20.0);
//! let m = rotate_around_point(0.3, pivot);
//! let p = m * pivot;
//! assert!((p.x - 50.0).abs() < 1e-12 && (p.y - 20.0).abs() < 1e-12);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - interop with `DMat3` / `DVec3`
//! - `pixfx-core` - rectangle types for bounds helpers

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod coords;
mod matrix;
mod transform;

pub use coords::*;
pub use matrix::*;
pub use transform::*;

/// Re-export glam types used by the interop conversions.
pub mod glam {
    pub use ::glam::{DMat3, DVec2, DVec3};
}
