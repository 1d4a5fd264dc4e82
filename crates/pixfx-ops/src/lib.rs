//! # pixfx-ops
//!
//! Tiled parallel pixel processing for image-effect plugins.
//!
//! A host asks a plugin to fill a render window of a destination image from
//! zero or more source images. This crate splits the window into disjoint
//! tiles, runs a [`PixelKernel`] over them on a worker pool, and keeps the
//! guarantees a host relies on:
//!
//! - every pixel of the window is written exactly once, nothing outside it
//! - format mismatches are reported before any pixel is touched
//! - an abort request stops workers at the next scanline
//! - output does not depend on the number of tiles
//!
//! # Modules
//!
//! - [`processor`] - [`ImageProcessor`], [`PixelKernel`], row and source views
//! - [`tiling`] - window partitioning and partition checks
//! - [`any`] - runtime-typed images and depth/channel dispatch
//! - [`kernels`] - copy, fill, affine transform, mask/mix
//! - [`config`] - worker and tiling configuration, environment overrides
//! - [`abort`] - cancellation signals
//!
//! # Example
//!
//! ```rust
//! use pixfx_core::{BitDepth, Components, ImageFormat, RectI};
//! use pixfx_ops::{AnyImage, Copier, ImageProcessor, NeverAbort, RenderStatus};
//!
//! let format = ImageFormat::new(BitDepth::U16, Components::Rgb);
//! let src = AnyImage::new(RectI::from_size(128, 64), format).unwrap();
//! let mut dst = AnyImage::new(RectI::from_size(128, 64), format).unwrap();
//!
//! let status = ImageProcessor::default()
//!     .process_any(&mut Copier::new(), &mut dst, &[Some(&src)], RectI::from_size(128, 64), &NeverAbort)
//!     .unwrap();
//! assert_eq!(status, RenderStatus::Completed);
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - run tiles on a rayon pool; without it tiles run
//!   sequentially on the calling thread
//! - `serde` - serialization for configuration types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod abort;
pub mod any;
pub mod config;
pub mod error;
pub mod kernels;
pub mod processor;
pub mod tiling;

pub use abort::{Abort, AbortHandle, NeverAbort};
pub use any::{AnyImage, AnySample};
pub use config::{ProcessorConfig, TileMode};
pub use error::{OpsError, OpsResult};
pub use kernels::{Copier, Fill, Filter, MaskMix, TransformKernel};
pub use processor::{DstRow, ImageProcessor, PixelKernel, RenderStatus, SourceImage};
pub use tiling::{TileStrategy, partition, validate_partition};
