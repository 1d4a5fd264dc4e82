//! Mask and mix blending.

use crate::processor::SourceImage;
use pixfx_core::Sample;

/// Blends processed values back into the original:
/// `out = src + (processed - src) * mask * mix`.
///
/// The mask weight is the last channel of the mask pixel, normalized. An
/// unconnected mask weighs 1; a connected mask weighs 0 outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskMix {
    /// Global blend amount in `[0, 1]`
    pub mix: f32,
    /// Uses `1 - mask`
    pub mask_invert: bool,
}

impl Default for MaskMix {
    fn default() -> Self {
        Self {
            mix: 1.0,
            mask_invert: false,
        }
    }
}

impl MaskMix {
    /// Creates a blend with the given mix.
    pub fn new(mix: f32) -> Self {
        Self {
            mix,
            ..Self::default()
        }
    }

    /// Inverts the mask.
    pub fn inverted(mut self) -> Self {
        self.mask_invert = true;
        self
    }

    /// Mask value at `(x, y)`, `None` for an unconnected mask.
    #[inline]
    pub fn mask_value<T: Sample, const N: usize>(mask: &SourceImage<'_, T, N>, x: i32, y: i32) -> Option<f32> {
        if !mask.is_connected() {
            return None;
        }
        Some(
            mask.pixel(x, y)
                .and_then(|px| px.last())
                .map_or(0.0, |v| v.to_normalized()),
        )
    }

    /// Blend weight for a mask value.
    #[inline]
    pub fn weight(&self, mask: Option<f32>) -> f32 {
        let m = match mask {
            Some(m) if self.mask_invert => 1.0 - m,
            Some(m) => m,
            None => 1.0,
        };
        m.clamp(0.0, 1.0) * self.mix.clamp(0.0, 1.0)
    }

    /// Returns true when the blend passes processed values through.
    pub fn is_passthrough(&self, mask_connected: bool) -> bool {
        self.mix >= 1.0 && !mask_connected
    }

    /// Writes the blend of raw `processed` values and `src` into `out`.
    ///
    /// A missing source pixel counts as zero.
    #[inline]
    pub fn apply<T: Sample>(&self, processed: &[f32], src: Option<&[T]>, mask: Option<f32>, out: &mut [T]) {
        let w = self.weight(mask);
        for (c, o) in out.iter_mut().enumerate() {
            let s = src.map_or(0.0, |px| px[c].to_f32());
            *o = T::from_f32(s + (processed[c] - s) * w);
        }
    }
}
