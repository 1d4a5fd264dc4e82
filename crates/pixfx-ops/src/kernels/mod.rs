//! Ready-made kernels.
//!
//! - [`Copier`] - copies source 0, optionally offset
//! - [`Fill`] - constant colour, optionally mixed through a mask
//! - [`TransformKernel`] - resamples source 0 through an affine transform
//! - [`MaskMix`] - blends processed values back into the source

mod copier;
mod fill;
mod mask_mix;
mod transform;

pub use copier::Copier;
pub use fill::Fill;
pub use mask_mix::MaskMix;
pub use transform::{Filter, TransformKernel};

/// Expands normalized RGBA to `N` channels.
///
/// A single channel takes alpha, two channels take red and green.
#[inline]
pub(crate) fn channel_values<const N: usize>(rgba: [f32; 4]) -> [f32; N] {
    if N == 1 {
        [rgba[3]; N]
    } else {
        std::array::from_fn(|c| rgba[c.min(3)])
    }
}
