//! Cooperative cancellation for long-running solves.
//!
//! A [`CancelToken`] is a shared flag checked by the solver at every search
//! node.  Cancelling never interrupts a node mid-expansion; the search
//! unwinds at the next check, so cancellation latency is one node visit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag.  Cloning yields a handle to the same flag, so
/// one clone can be handed to the worker and another kept by the caller.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.  Idempotent; safe from any thread.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
