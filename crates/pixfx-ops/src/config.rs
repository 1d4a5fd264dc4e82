//! Processor configuration.
//!
//! Controls how many workers a render uses and how the render window is cut
//! into tiles. Settings can be overridden from the environment:
//!
//! - `PIXFX_THREADS` - worker count (0 or unset uses every core)
//! - `PIXFX_TILE_SIZE` - square tile size in pixels, switches to grid tiling
//!
//! ```rust
//! use pixfx_ops::{ProcessorConfig, TileMode};
//!
//! let config = ProcessorConfig::default()
//!     .with_threads(4)
//!     .with_tile_mode(TileMode::Grid { tile_width: 256, tile_height: 256 });
//! assert_eq!(config.threads, Some(4));
//! ```

use std::env;

use crate::tiling::TileStrategy;
use pixfx_core::RectI;

/// Smallest tile side accepted from the environment.
const MIN_ENV_TILE: u32 = 16;
/// Largest tile side accepted from the environment.
const MAX_ENV_TILE: u32 = 16384;

/// How the render window is partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileMode {
    /// One horizontal strip per worker, fewer for small windows.
    #[default]
    Auto,
    /// Fixed number of horizontal strips.
    Rows(usize),
    /// Fixed-size rectangular tiles, clipped at the window edges.
    Grid {
        /// Tile width in pixels
        tile_width: u32,
        /// Tile height in pixels
        tile_height: u32,
    },
    /// Whole window as one tile, processed on the calling thread's pool.
    Single,
}

/// Configuration of an [`crate::ImageProcessor`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessorConfig {
    /// Worker count, `None` for the global pool.
    pub threads: Option<usize>,
    /// Partitioning mode.
    pub tile_mode: TileMode,
    /// Below this many pixels per strip, [`TileMode::Auto`] uses fewer strips.
    pub min_pixels_per_tile: u64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            threads: None,
            tile_mode: TileMode::Auto,
            min_pixels_per_tile: 4096,
        }
    }
}

impl ProcessorConfig {
    /// Default configuration with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(n) = threads_override() {
            config.threads = Some(n);
        }
        if let Some(size) = tile_size_override() {
            config.tile_mode = TileMode::Grid {
                tile_width: size,
                tile_height: size,
            };
        }
        config
    }

    /// Sets the worker count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Sets the partitioning mode.
    pub fn with_tile_mode(mut self, mode: TileMode) -> Self {
        self.tile_mode = mode;
        self
    }

    /// Sets the minimum strip size for [`TileMode::Auto`].
    pub fn with_min_pixels_per_tile(mut self, pixels: u64) -> Self {
        self.min_pixels_per_tile = pixels;
        self
    }

    /// Concrete partition strategy for a window and worker count.
    pub fn strategy_for(&self, window: RectI, workers: usize) -> TileStrategy {
        match self.tile_mode {
            TileMode::Auto => {
                let by_size = (window.area() / self.min_pixels_per_tile.max(1)).max(1);
                let count = (workers.max(1) as u64).min(by_size) as usize;
                if count <= 1 {
                    TileStrategy::Single
                } else {
                    TileStrategy::Rows { count }
                }
            }
            TileMode::Rows(count) => TileStrategy::Rows { count },
            TileMode::Grid {
                tile_width,
                tile_height,
            } => TileStrategy::Grid {
                tile_width,
                tile_height,
            },
            TileMode::Single => TileStrategy::Single,
        }
    }
}

/// Worker count from `PIXFX_THREADS`, `None` when unset, zero or invalid.
pub fn threads_override() -> Option<usize> {
    env::var("PIXFX_THREADS")
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
}

/// Grid tile size from `PIXFX_TILE_SIZE`.
pub fn tile_size_override() -> Option<u32> {
    env::var("PIXFX_TILE_SIZE")
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .map(|s| s.clamp(MIN_ENV_TILE, MAX_ENV_TILE))
}
