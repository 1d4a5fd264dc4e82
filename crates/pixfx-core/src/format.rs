//! Image format tags.
//!
//! - [`BitDepth`] - storage type of one channel sample
//! - [`Components`] - channel layout of one pixel
//! - [`ImageFormat`] - the pair, compared before any pixel work begins
//!
//! ```rust
//! use pixfx_core::{BitDepth, Components, ImageFormat};
//!
//! let fmt = ImageFormat::new(BitDepth::U8, Components::Rgba);
//! assert_eq!(fmt.components.count(), 4);
//! assert_eq!(fmt.depth.max_value(), 255.0);
//! ```

use crate::error::{Error, Result};

/// Bit depth of a channel sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitDepth {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 16-bit half float.
    F16,
    /// 32-bit float.
    #[default]
    F32,
}

impl BitDepth {
    /// Number of bits per sample.
    #[inline]
    pub const fn bits(&self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 | Self::F16 => 16,
            Self::F32 => 32,
        }
    }

    /// Whether samples are floating point.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F16 | Self::F32)
    }

    /// Value that represents 1.0. Floats use 1.0 itself.
    #[inline]
    pub const fn max_value(&self) -> f32 {
        match self {
            Self::U8 => 255.0,
            Self::U16 => 65535.0,
            Self::F16 | Self::F32 => 1.0,
        }
    }

    /// Short lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::F16 => "f16",
            Self::F32 => "f32",
        }
    }
}

impl std::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Channel layout of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Components {
    /// Single alpha channel.
    Alpha,
    /// Two generic channels (motion vectors, disparity).
    Xy,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    #[default]
    Rgba,
}

impl Components {
    /// Number of channels.
    #[inline]
    pub const fn count(&self) -> usize {
        match self {
            Self::Alpha => 1,
            Self::Xy => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Layout for a channel count.
    pub fn from_count(n: usize) -> Result<Self> {
        match n {
            1 => Ok(Self::Alpha),
            2 => Ok(Self::Xy),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            _ => Err(Error::UnsupportedComponents(n)),
        }
    }

    /// Whether the last channel is alpha.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::Alpha | Self::Rgba)
    }
}

impl std::fmt::Display for Components {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Alpha => "A",
            Self::Xy => "XY",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        };
        f.write_str(s)
    }
}

/// Bit depth and channel layout of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageFormat {
    /// Sample storage type
    pub depth: BitDepth,
    /// Channel layout
    pub components: Components,
}

impl ImageFormat {
    /// Creates a format tag.
    #[inline]
    pub const fn new(depth: BitDepth, components: Components) -> Self {
        Self { depth, components }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.components, self.depth)
    }
}
