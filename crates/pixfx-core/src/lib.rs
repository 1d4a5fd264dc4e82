//! # pixfx-core
//!
//! Core types shared by the pixfx plugin-support crates.
//!
//! - [`RectI`], [`RectD`] - half-open pixel rectangles and canonical rectangles
//! - [`BitDepth`], [`Components`] - image format tags
//! - [`Sample`] - trait for the sample types a host can hand over (u8, u16, f16, f32)
//! - [`ImageBuffer`] - bounded image buffer standing in for a host-owned image
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies:
//!
//! ```text
//! pixfx-core (this crate)
//!    ^
//!    +-- pixfx-math (matrices, coordinate spaces)
//!    +-- pixfx-ops (tiled processing, kernels)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - serialization for rectangles and format tags

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod image;
pub mod rect;
pub mod sample;

pub use error::*;
pub use format::*;
pub use image::*;
pub use rect::*;
pub use sample::Sample;

/// Prelude module for convenient imports.
///
/// ```
/// use pixfx_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::format::{BitDepth, Components, ImageFormat};
    pub use crate::image::{ImageBuffer, RenderScale};
    pub use crate::rect::{RectD, RectI};
    pub use crate::sample::Sample;
}
