//! Sample types a host can hand over.
//!
//! [`Sample`] is implemented for `u8`, `u16`, [`half::f16`] and `f32`. Kernels
//! are generic over it so that one kernel body is monomorphized per depth.
//!
//! Two value domains are exposed:
//!
//! - raw: `0..=255` for `u8`, `0..=65535` for `u16`, unbounded for floats
//! - normalized: raw divided by [`Sample::MAX_VALUE`]
//!
//! Conversions back to integer samples clamp to `[0, MAX_VALUE]` and round to
//! nearest by adding 0.5 before truncation. Float samples are never clamped,
//! they may carry scene-linear or negative values.
//!
//! ```
//! use pixfx_core::Sample;
//!
//! assert_eq!(<u8 as Sample>::from_f32(254.6), 255);
//! assert_eq!(<u8 as Sample>::from_f32(-3.0), 0);
//! assert_eq!(<u16 as Sample>::from_normalized(0.5), 32768);
//! assert_eq!(<f32 as Sample>::from_f32(7.5), 7.5);
//! ```

use crate::format::BitDepth;
use half::f16;

/// Trait for channel sample storage types.
pub trait Sample: Copy + Default + PartialEq + Send + Sync + std::fmt::Debug + 'static {
    /// Depth tag of this type.
    const DEPTH: BitDepth;

    /// Raw value representing 1.0.
    const MAX_VALUE: f32;

    /// Zero sample (black, transparent).
    const ZERO: Self;

    /// Raw value as `f32`.
    fn to_f32(self) -> f32;

    /// Converts a raw value, clamping and rounding for integer types.
    fn from_f32(v: f32) -> Self;

    /// Value divided by [`Sample::MAX_VALUE`].
    #[inline]
    fn to_normalized(self) -> f32 {
        self.to_f32() / Self::MAX_VALUE
    }

    /// Converts a normalized value.
    #[inline]
    fn from_normalized(v: f32) -> Self {
        Self::from_f32(v * Self::MAX_VALUE)
    }
}

/// Clamps to `[0, max]` and rounds half up.
#[inline]
fn quantize(v: f32, max: f32) -> f32 {
    // NaN fails both comparisons and ends up at zero.
    if v > 0.0 {
        (v.min(max) + 0.5).floor()
    } else {
        0.0
    }
}

impl Sample for u8 {
    const DEPTH: BitDepth = BitDepth::U8;
    const MAX_VALUE: f32 = 255.0;
    const ZERO: Self = 0;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        quantize(v, Self::MAX_VALUE) as u8
    }
}

impl Sample for u16 {
    const DEPTH: BitDepth = BitDepth::U16;
    const MAX_VALUE: f32 = 65535.0;
    const ZERO: Self = 0;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        quantize(v, Self::MAX_VALUE) as u16
    }
}

impl Sample for f16 {
    const DEPTH: BitDepth = BitDepth::F16;
    const MAX_VALUE: f32 = 1.0;
    const ZERO: Self = f16::ZERO;

    #[inline]
    fn to_f32(self) -> f32 {
        f16::to_f32(self)
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        f16::from_f32(v)
    }
}

impl Sample for f32 {
    const DEPTH: BitDepth = BitDepth::F32;
    const MAX_VALUE: f32 = 1.0;
    const ZERO: Self = 0.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }
}
