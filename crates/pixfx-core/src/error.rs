//! Error types for pixfx-core.
//!
//! # Usage
//!
//! ```rust
//! use pixfx_core::{Error, RectI, Result};
//!
//! fn check(bounds: RectI, x: i32, y: i32) -> Result<()> {
//!     if !bounds.contains(x, y) {
//!         return Err(Error::out_of_bounds(x, y, bounds));
//!     }
//!     Ok(())
//! }
//! assert!(check(RectI::new(0, 0, 4, 4), 5, 0).is_err());
//! ```

use crate::rect::RectI;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or addressing image buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside the buffer bounds.
    #[error("pixel ({x}, {y}) out of bounds {bounds}")]
    OutOfBounds {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
        /// Bounds of the addressed buffer
        bounds: RectI,
    },

    /// Bounds or component count cannot describe a buffer.
    #[error("invalid dimensions {bounds}: {reason}")]
    InvalidDimensions {
        /// Requested bounds
        bounds: RectI,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// Sample data does not match the declared bounds and components.
    #[error("buffer length mismatch: expected {expected} samples, got {got}")]
    BufferLength {
        /// Samples required by bounds x components
        expected: usize,
        /// Samples supplied
        got: usize,
    },

    /// Channel count has no matching component layout.
    #[error("unsupported component count: {0}")]
    UnsupportedComponents(usize),

    /// Bit depth is not handled by this operation.
    #[error("unsupported bit depth: {0}")]
    UnsupportedDepth(String),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: i32, y: i32, bounds: RectI) -> Self {
        Self::OutOfBounds { x, y, bounds }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(bounds: RectI, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            bounds,
            reason: reason.into(),
        }
    }

    /// Returns `true` for bounds-related errors.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
