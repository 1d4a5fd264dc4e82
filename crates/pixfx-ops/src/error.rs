//! Error types for tiled processing.

use pixfx_core::{BitDepth, Components, RenderScale};
use thiserror::Error;

/// Error type for a render call.
///
/// Every variant except [`OpsError::Core`] raised by a kernel is detected
/// before the parallel phase starts, so no destination pixel has been
/// written when it is returned.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Source sample type differs from the destination.
    #[error("bit depth mismatch: destination is {expected}, source {index} is {got}")]
    DepthMismatch {
        /// Source slot
        index: usize,
        /// Destination depth
        expected: BitDepth,
        /// Source depth
        got: BitDepth,
    },

    /// Source channel layout differs from the destination.
    #[error("component mismatch: destination is {expected}, source {index} is {got}")]
    ComponentMismatch {
        /// Source slot
        index: usize,
        /// Destination layout
        expected: Components,
        /// Source layout
        got: Components,
    },

    /// Source was rendered at another scale than the destination.
    #[error("render scale mismatch: destination {expected:?}, source {index} {got:?}")]
    RenderScaleMismatch {
        /// Source slot
        index: usize,
        /// Destination render scale
        expected: RenderScale,
        /// Source render scale
        got: RenderScale,
    },

    /// Kernel instantiation does not match the destination channel count.
    #[error("kernel instantiated for {expected} channels, destination has {got}")]
    ChannelCount {
        /// Channel count of the instantiation
        expected: usize,
        /// Destination channel count
        got: usize,
    },

    /// Tiles do not exactly cover the render window.
    #[error("invalid tile partition: {0}")]
    InvalidPartition(String),

    /// Transform cannot be inverted.
    #[error("degenerate transform (determinant {0})")]
    DegenerateTransform(f64),

    /// Worker pool could not be created.
    #[error("thread pool: {0}")]
    ThreadPool(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer level error.
    #[error(transparent)]
    Core(#[from] pixfx_core::Error),
}

/// Result type for tiled processing.
pub type OpsResult<T> = Result<T, OpsError>;
