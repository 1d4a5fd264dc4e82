//! Pixel copy.

use crate::processor::{DstRow, PixelKernel, SourceImage};
use pixfx_core::Sample;

/// Copies source 0 into the destination.
///
/// Destination pixel `(x, y)` reads source pixel `(x - dx, y - dy)`. Pixels
/// with no source sample, including an unconnected source, become zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Copier {
    dx: i32,
    dy: i32,
}

impl Copier {
    /// Plain copy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy shifted by `(dx, dy)` pixels.
    pub fn with_offset(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl PixelKernel for Copier {
    fn process_row<T: Sample, const N: usize>(
        &self,
        row: &mut DstRow<'_, T, N>,
        sources: &[SourceImage<'_, T, N>],
    ) {
        let src = sources.first().copied().unwrap_or_else(SourceImage::absent);
        let sy = row.y().checked_sub(self.dy);
        for (x, px) in row.pixels_mut() {
            let sample = sy.zip(x.checked_sub(self.dx)).and_then(|(sy, sx)| src.pixel(sx, sy));
            match sample {
                Some(s) => px.copy_from_slice(s),
                None => px.fill(T::ZERO),
            }
        }
    }
}
