//! Cooperative shutdown flag.
//! The CLI's Ctrl-C handler sets it; the batch executor checks it between files so a
//! run stops at a file boundary instead of mid-move. Each run gets its own flag.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - `request()` is safe to call from signal handlers.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop request. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a cooperative shutdown (idempotent).
    #[inline]
    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check whether a shutdown has been requested.
    #[inline]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
