//! Constant colour fill.

use super::channel_values;
use super::mask_mix::MaskMix;
use crate::processor::{DstRow, PixelKernel, SourceImage};
use pixfx_core::Sample;

/// Fills the window with a normalized RGBA colour.
///
/// With a partial mix or a connected mask (source 1), the colour is blended
/// into source 0 through [`MaskMix`]. The mask may be single-channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    rgba: [f32; 4],
    blend: MaskMix,
}

impl Fill {
    /// Fill with a normalized RGBA colour.
    pub fn new(rgba: [f32; 4]) -> Self {
        Self {
            rgba,
            blend: MaskMix::default(),
        }
    }

    /// Transparent black.
    pub fn black() -> Self {
        Self::new([0.0; 4])
    }

    /// Sets the mask and mix blend.
    pub fn with_blend(mut self, blend: MaskMix) -> Self {
        self.blend = blend;
        self
    }

    /// Fill colour.
    pub fn rgba(&self) -> [f32; 4] {
        self.rgba
    }
}

impl PixelKernel for Fill {
    fn mask_slots(&self) -> &[usize] {
        &[1]
    }

    fn process_row<T: Sample, const N: usize>(
        &self,
        row: &mut DstRow<'_, T, N>,
        sources: &[SourceImage<'_, T, N>],
    ) {
        let raw = channel_values::<N>(self.rgba).map(|v| v * T::MAX_VALUE);
        let src = sources.first().copied().unwrap_or_else(SourceImage::absent);
        let mask = sources.get(1).copied().unwrap_or_else(SourceImage::absent);

        if self.blend.is_passthrough(mask.is_connected()) {
            let value = raw.map(T::from_f32);
            for (_, px) in row.pixels_mut() {
                px.copy_from_slice(&value);
            }
            return;
        }

        let y = row.y();
        for (x, px) in row.pixels_mut() {
            let m = MaskMix::mask_value(&mask, x, y);
            self.blend.apply(&raw, src.pixel(x, y), m, px);
        }
    }
}
