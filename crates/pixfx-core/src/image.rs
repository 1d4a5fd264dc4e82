//! Bounded image buffers.
//!
//! [`ImageBuffer`] stands in for a host-owned image: a bounding rectangle in
//! pixel coordinates (which need not start at the origin), a channel layout,
//! contiguous row-major samples and the render metadata a host attaches to an
//! image (render scale, pixel aspect ratio, field flag).
//!
//! Pixel addressing mirrors the host "get pixel address" capability: a lookup
//! outside the bounds returns `None` instead of a dangling address.
//!
//! ```rust
//! use pixfx_core::{Components, ImageBuffer, RectI};
//!
//! let mut img = ImageBuffer::<u8>::new(RectI::new(-2, -2, 2, 2), Components::Rgba).unwrap();
//! img.pixel_mut(-2, 1).unwrap().copy_from_slice(&[1, 2, 3, 4]);
//! assert_eq!(img.pixel(-2, 1), Some(&[1u8, 2, 3, 4][..]));
//! assert_eq!(img.pixel(2, 0), None);
//! ```

use crate::error::{Error, Result};
use crate::format::{Components, ImageFormat};
use crate::rect::RectI;
use crate::sample::Sample;

/// Render scale requested by the host, 1.0 for full resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderScale {
    /// Horizontal scale
    pub x: f64,
    /// Vertical scale
    pub y: f64,
}

impl RenderScale {
    /// Full resolution.
    pub const FULL: Self = Self { x: 1.0, y: 1.0 };

    /// Creates a render scale.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for RenderScale {
    fn default() -> Self {
        Self::FULL
    }
}

/// Image buffer with pixel-space bounds.
#[derive(Clone)]
pub struct ImageBuffer<T: Sample> {
    bounds: RectI,
    components: Components,
    data: Vec<T>,
    render_scale: RenderScale,
    pixel_aspect_ratio: f64,
    fielded: bool,
}

impl<T: Sample> ImageBuffer<T> {
    /// Creates a zero-filled buffer.
    pub fn new(bounds: RectI, components: Components) -> Result<Self> {
        let len = Self::sample_count(bounds, components)?;
        Ok(Self::from_parts(bounds, components, vec![T::ZERO; len]))
    }

    /// Creates a buffer filled with one sample value.
    pub fn filled(bounds: RectI, components: Components, value: T) -> Result<Self> {
        let len = Self::sample_count(bounds, components)?;
        Ok(Self::from_parts(bounds, components, vec![value; len]))
    }

    /// Wraps existing samples.
    ///
    /// `data` must hold exactly `width * height * components` samples.
    pub fn from_data(bounds: RectI, components: Components, data: Vec<T>) -> Result<Self> {
        let expected = Self::sample_count(bounds, components)?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self::from_parts(bounds, components, data))
    }

    fn from_parts(bounds: RectI, components: Components, data: Vec<T>) -> Self {
        Self {
            bounds,
            components,
            data,
            render_scale: RenderScale::FULL,
            pixel_aspect_ratio: 1.0,
            fielded: false,
        }
    }

    fn sample_count(bounds: RectI, components: Components) -> Result<usize> {
        if bounds.x2 < bounds.x1 || bounds.y2 < bounds.y1 {
            return Err(Error::invalid_dimensions(bounds, "inverted rectangle"));
        }
        let max = i32::MAX as i64;
        if bounds.x2 as i64 - bounds.x1 as i64 > max || bounds.y2 as i64 - bounds.y1 as i64 > max {
            return Err(Error::invalid_dimensions(bounds, "span exceeds i32 range"));
        }
        (bounds.width() as usize)
            .checked_mul(bounds.height() as usize)
            .and_then(|v| v.checked_mul(components.count()))
            .ok_or_else(|| Error::invalid_dimensions(bounds, "buffer size overflows"))
    }

    /// Sets the render scale the image was produced at.
    pub fn with_render_scale(mut self, scale: RenderScale) -> Self {
        self.render_scale = scale;
        self
    }

    /// Sets the pixel aspect ratio.
    pub fn with_pixel_aspect_ratio(mut self, par: f64) -> Self {
        self.pixel_aspect_ratio = par;
        self
    }

    /// Marks the image as one field of an interlaced frame.
    pub fn with_fielded(mut self, fielded: bool) -> Self {
        self.fielded = fielded;
        self
    }

    /// Pixel-space bounds.
    #[inline]
    pub fn bounds(&self) -> RectI {
        self.bounds
    }

    /// Channel layout.
    #[inline]
    pub fn components(&self) -> Components {
        self.components
    }

    /// Format tag (depth and layout).
    #[inline]
    pub fn format(&self) -> ImageFormat {
        ImageFormat::new(T::DEPTH, self.components)
    }

    /// Render scale.
    #[inline]
    pub fn render_scale(&self) -> RenderScale {
        self.render_scale
    }

    /// Pixel aspect ratio.
    #[inline]
    pub fn pixel_aspect_ratio(&self) -> f64 {
        self.pixel_aspect_ratio
    }

    /// Whether the image is a single field.
    #[inline]
    pub fn is_fielded(&self) -> bool {
        self.fielded
    }

    /// Samples per row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.bounds.width() as usize * self.components.count()
    }

    /// All samples, row-major from `y1`.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let col = (x - self.bounds.x1) as usize;
        let row = (y - self.bounds.y1) as usize;
        Some(row * self.row_len() + col * self.components.count())
    }

    /// Samples of the pixel at `(x, y)`, `None` outside the bounds.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<&[T]> {
        let n = self.components.count();
        self.offset(x, y).map(|o| &self.data[o..o + n])
    }

    /// Mutable samples of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel_mut(&mut self, x: i32, y: i32) -> Option<&mut [T]> {
        let n = self.components.count();
        self.offset(x, y).map(move |o| &mut self.data[o..o + n])
    }

    /// Checked pixel read.
    pub fn try_pixel(&self, x: i32, y: i32) -> Result<&[T]> {
        self.pixel(x, y)
            .ok_or_else(|| Error::out_of_bounds(x, y, self.bounds))
    }

    /// Samples of row `y`, `None` outside the bounds.
    pub fn row(&self, y: i32) -> Option<&[T]> {
        if y < self.bounds.y1 || y >= self.bounds.y2 {
            return None;
        }
        let len = self.row_len();
        let start = (y - self.bounds.y1) as usize * len;
        Some(&self.data[start..start + len])
    }

    /// Fills every sample with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T: Sample> std::fmt::Debug for ImageBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("bounds", &self.bounds)
            .field("format", &self.format())
            .field("render_scale", &self.render_scale)
            .field("pixel_aspect_ratio", &self.pixel_aspect_ratio)
            .field("fielded", &self.fielded)
            .finish()
    }
}
