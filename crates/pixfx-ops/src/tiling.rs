//! Render window partitioning.
//!
//! A partition is a set of non-empty rectangles, pairwise disjoint and
//! contained in the render window, whose areas sum to the window area. Each
//! tile is processed by exactly one worker, which writes only the destination
//! pixels inside its tile.
//!
//! # Example
//!
//! ```rust
//! use pixfx_core::RectI;
//! use pixfx_ops::tiling::{partition, validate_partition, TileStrategy};
//!
//! let window = RectI::new(0, 0, 100, 10);
//! let tiles = partition(window, TileStrategy::Rows { count: 4 });
//! assert_eq!(tiles.len(), 4);
//! assert_eq!(tiles[0], RectI::new(0, 0, 100, 3));
//! assert_eq!(tiles[3], RectI::new(0, 9, 100, 10));
//! validate_partition(window, &tiles).unwrap();
//! ```

use crate::error::{OpsError, OpsResult};
use pixfx_core::RectI;

/// Concrete partitioning of one render window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileStrategy {
    /// The whole window.
    Single,
    /// Horizontal strips of `ceil(height / count)` rows, the last one shorter.
    Rows {
        /// Requested strip count
        count: usize,
    },
    /// Fixed-size tiles in row-major order, clipped at the right and bottom.
    Grid {
        /// Tile width in pixels
        tile_width: u32,
        /// Tile height in pixels
        tile_height: u32,
    },
}

/// Splits `window` into tiles.
///
/// Returns no tiles for an empty window. A strip count above the window
/// height is clamped, so every strip holds at least one row; the number of
/// strips may also come out below `count` when the rows do not divide evenly.
pub fn partition(window: RectI, strategy: TileStrategy) -> Vec<RectI> {
    if window.is_empty() {
        return Vec::new();
    }
    match strategy {
        TileStrategy::Single => vec![window],
        TileStrategy::Rows { count } => {
            let dy = window.height();
            let n = count.clamp(1, dy as usize) as i32;
            let step = (dy + n - 1) / n;
            let mut tiles = Vec::with_capacity(n as usize);
            let mut y = window.y1;
            while y < window.y2 {
                let y2 = (y + step).min(window.y2);
                tiles.push(RectI::new(window.x1, y, window.x2, y2));
                y = y2;
            }
            tiles
        }
        TileStrategy::Grid {
            tile_width,
            tile_height,
        } => {
            let tw = tile_width.clamp(1, i32::MAX as u32) as i32;
            let th = tile_height.clamp(1, i32::MAX as u32) as i32;
            let mut tiles = Vec::new();
            let mut y = window.y1;
            while y < window.y2 {
                let y2 = y.saturating_add(th).min(window.y2);
                let mut x = window.x1;
                while x < window.x2 {
                    let x2 = x.saturating_add(tw).min(window.x2);
                    tiles.push(RectI::new(x, y, x2, y2));
                    x = x2;
                }
                y = y2;
            }
            tiles
        }
    }
}

/// Checks that `tiles` exactly cover `window` without overlap.
pub fn validate_partition(window: RectI, tiles: &[RectI]) -> OpsResult<()> {
    let mut area = 0u64;
    for (i, tile) in tiles.iter().enumerate() {
        if tile.is_empty() {
            return Err(OpsError::InvalidPartition(format!("tile {i} is empty")));
        }
        if !window.contains_rect(tile) {
            return Err(OpsError::InvalidPartition(format!(
                "tile {i} {tile} outside window {window}"
            )));
        }
        area += tile.area();
    }
    if area != window.area() {
        return Err(OpsError::InvalidPartition(format!(
            "tiles cover {area} pixels, window has {}",
            window.area()
        )));
    }
    for (i, a) in tiles.iter().enumerate() {
        for (j, b) in tiles.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                return Err(OpsError::InvalidPartition(format!("tiles {i} and {j} overlap")));
            }
        }
    }
    Ok(())
}

/// Exclusive view of the destination rows covered by one tile.
pub(crate) struct TileRows<'a, T> {
    pub(crate) rect: RectI,
    /// One slice per scanline, top to bottom, `rect.width() * n` samples each.
    pub(crate) rows: Vec<&'a mut [T]>,
}

/// Splits destination storage into one exclusive view per tile.
///
/// `data` holds `bounds` with `n` samples per pixel. The tiles must form a
/// valid partition of a window inside `bounds`. Each scanline is cut with
/// successive `split_at_mut` calls, so the views never alias.
pub(crate) fn split_tiles<'a, T>(
    data: &'a mut [T],
    bounds: RectI,
    n: usize,
    tiles: &[RectI],
) -> Vec<TileRows<'a, T>> {
    let mut out: Vec<TileRows<'a, T>> = tiles
        .iter()
        .map(|&rect| TileRows {
            rect,
            rows: Vec::with_capacity(rect.height() as usize),
        })
        .collect();

    let row_len = bounds.width() as usize * n;
    if row_len == 0 || tiles.is_empty() {
        return out;
    }

    let mut order: Vec<usize> = (0..tiles.len()).collect();
    order.sort_by_key(|&i| tiles[i].x1);

    let y_min = tiles.iter().map(|t| t.y1).min().unwrap_or(bounds.y1);
    let y_max = tiles.iter().map(|t| t.y2).max().unwrap_or(bounds.y1);
    let start = (y_min - bounds.y1) as usize * row_len;
    let end = (y_max - bounds.y1) as usize * row_len;

    for (offset, row) in data[start..end].chunks_exact_mut(row_len).enumerate() {
        let y = y_min + offset as i32;
        let mut rest: &'a mut [T] = row;
        let mut x = bounds.x1;
        for &i in &order {
            let tile = tiles[i];
            if y < tile.y1 || y >= tile.y2 {
                continue;
            }
            let skip = (tile.x1 - x) as usize * n;
            let take = tile.width() as usize * n;
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(skip);
            let (segment, tail) = tail.split_at_mut(take);
            out[i].rows.push(segment);
            rest = tail;
            x = tile.x2;
        }
    }
    out
}
