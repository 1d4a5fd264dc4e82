//! Rectangle types for render windows and regions of definition.
//!
//! - [`RectI`] - integer pixel rectangle, half-open on the right and top
//! - [`RectD`] - the same shape in canonical (resolution independent) units
//!
//! # Coordinate System
//!
//! Rectangles follow the host convention: `x1 <= x < x2`, `y1 <= y < y2`.
//! A rectangle with `x1 >= x2` or `y1 >= y2` is empty. Empty rectangles are
//! valid values meaning "nothing to do".
//!
//! ```rust
//! use pixfx_core::RectI;
//!
//! let window = RectI::new(0, 0, 100, 50);
//! assert_eq!(window.width(), 100);
//! assert!(window.contains(99, 49));
//! assert!(!window.contains(100, 49));
//!
//! let clip = window.intersect(&RectI::new(50, 25, 200, 200));
//! assert_eq!(clip, RectI::new(50, 25, 100, 50));
//! ```

/// Integer pixel rectangle `(x1, y1, x2, y2)` with half-open semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct RectI {
    /// Left edge (inclusive)
    pub x1: i32,
    /// Bottom edge (inclusive)
    pub y1: i32,
    /// Right edge (exclusive)
    pub x2: i32,
    /// Top edge (exclusive)
    pub y2: i32,
}

impl RectI {
    /// The empty rectangle at the origin.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// Creates a rectangle from its edges.
    #[inline]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Creates a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width in pixels, zero when empty, saturating at `i32::MAX`.
    #[inline]
    pub const fn width(&self) -> i32 {
        saturate(span(self.x1, self.x2))
    }

    /// Height in pixels, zero when empty, saturating at `i32::MAX`.
    #[inline]
    pub const fn height(&self) -> i32 {
        saturate(span(self.y1, self.y2))
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        span(self.x1, self.x2) * span(self.y1, self.y2)
    }

    /// Returns `true` if no pixel is covered.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// Returns `true` if `(x, y)` lies inside.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Returns `true` if `other` lies fully inside. Empty rectangles are
    /// contained in everything.
    #[inline]
    pub const fn contains_rect(&self, other: &RectI) -> bool {
        other.is_empty()
            || (other.x1 >= self.x1
                && other.y1 >= self.y1
                && other.x2 <= self.x2
                && other.y2 <= self.y2)
    }

    /// Returns `true` if the two rectangles share at least one pixel.
    #[inline]
    pub const fn overlaps(&self, other: &RectI) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x1 < other.x2
            && other.x1 < self.x2
            && self.y1 < other.y2
            && other.y1 < self.y2
    }

    /// Intersection of two rectangles. Returns [`RectI::EMPTY`] when they
    /// do not overlap.
    #[inline]
    pub fn intersect(&self, other: &RectI) -> RectI {
        let r = RectI::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        );
        if r.is_empty() { RectI::EMPTY } else { r }
    }

    /// Bounding box of both rectangles. Empty operands are ignored.
    #[inline]
    pub fn union(&self, other: &RectI) -> RectI {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        RectI::new(
            self.x1.min(other.x1),
            self.y1.min(other.y1),
            self.x2.max(other.x2),
            self.y2.max(other.y2),
        )
    }

    /// Returns this rectangle moved by `(dx, dy)`.
    #[inline]
    pub const fn translate(&self, dx: i32, dy: i32) -> RectI {
        RectI::new(self.x1 + dx, self.y1 + dy, self.x2 + dx, self.y2 + dy)
    }

    /// Converts to a canonical-unit rectangle without scaling.
    #[inline]
    pub fn to_rect_d(&self) -> RectD {
        RectD::new(self.x1 as f64, self.y1 as f64, self.x2 as f64, self.y2 as f64)
    }
}

impl std::fmt::Display for RectI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Rectangle in canonical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct RectD {
    /// Left edge
    pub x1: f64,
    /// Bottom edge
    pub y1: f64,
    /// Right edge
    pub x2: f64,
    /// Top edge
    pub y2: f64,
}

impl RectD {
    /// Creates a rectangle from its edges.
    #[inline]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width, zero when empty.
    #[inline]
    pub fn width(&self) -> f64 {
        (self.x2 - self.x1).max(0.0)
    }

    /// Height, zero when empty.
    #[inline]
    pub fn height(&self) -> f64 {
        (self.y2 - self.y1).max(0.0)
    }

    /// Returns `true` if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        // NaN edges compare false both ways, so they count as empty.
        !(self.x1 < self.x2 && self.y1 < self.y2)
    }

    /// Intersection of two rectangles, `None` if they do not overlap.
    pub fn intersect(&self, other: &RectD) -> Option<RectD> {
        let r = RectD::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        );
        if r.is_empty() { None } else { Some(r) }
    }

    /// Bounding box of both rectangles.
    pub fn union(&self, other: &RectD) -> RectD {
        RectD::new(
            self.x1.min(other.x1),
            self.y1.min(other.y1),
            self.x2.max(other.x2),
            self.y2.max(other.y2),
        )
    }
}

impl std::fmt::Display for RectD {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Length of `lo..hi`, computed wide so full-range edges do not overflow.
#[inline]
const fn span(lo: i32, hi: i32) -> u64 {
    if hi > lo { (hi as i64 - lo as i64) as u64 } else { 0 }
}

#[inline]
const fn saturate(len: u64) -> i32 {
    if len > i32::MAX as u64 { i32::MAX } else { len as i32 }
}
