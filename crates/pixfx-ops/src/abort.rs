//! Cooperative cancellation.
//!
//! The processor polls an [`Abort`] before every scanline of every tile. Any
//! `Fn() -> bool + Sync` closure works, as does an [`AbortHandle`] shared
//! with the thread that wants to cancel.
//!
//! ```rust
//! use pixfx_ops::{Abort, AbortHandle};
//!
//! let handle = AbortHandle::new();
//! let worker_view = handle.clone();
//! assert!(!worker_view.aborted());
//! handle.abort();
//! assert!(worker_view.aborted());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Poll-checkable abort signal.
pub trait Abort: Sync {
    /// Returns `true` once the render should stop.
    fn aborted(&self) -> bool;
}

/// Never aborts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverAbort;

impl Abort for NeverAbort {
    #[inline]
    fn aborted(&self) -> bool {
        false
    }
}

impl Abort for AtomicBool {
    #[inline]
    fn aborted(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<F> Abort for F
where
    F: Fn() -> bool + Sync,
{
    #[inline]
    fn aborted(&self) -> bool {
        self()
    }
}

/// Shared abort flag.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
}

impl AbortHandle {
    /// Creates a flag in the running state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn abort(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Clears the flag for the next render.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

impl Abort for AbortHandle {
    #[inline]
    fn aborted(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
