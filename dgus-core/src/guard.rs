//! Re-entrance guard for receive processing
//!
//! A handler may run for long enough that the firmware's idle hook wants to
//! pump the panel again, for example while it waits for command queue space.
//! The engine is mutably borrowed for the whole of receive processing, so the
//! hook cannot reach it directly; it checks a `static` guard instead, shared
//! with the engine through
//! [`ScreenEngine::with_rx_guard`](crate::ScreenEngine::with_rx_guard).
//! [`ScreenEngine::process_rx`](crate::ScreenEngine::process_rx) holds the
//! guard while it parses and dispatches and returns immediately if the guard
//! is already taken.

use portable_atomic::{AtomicBool, Ordering};

/// Scoped busy flag
#[derive(Debug, Default)]
pub struct RxGuard {
    busy: AtomicBool,
}

impl RxGuard {
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Claim the guard. `None` if it is already held.
    pub fn try_enter(&self) -> Option<RxToken<'_>> {
        if self.busy.swap(true, Ordering::Acquire) {
            None
        } else {
            Some(RxToken { guard: self })
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Relaxed)
    }
}

/// Held while receive processing runs; releases the guard on drop
#[derive(Debug)]
pub struct RxToken<'a> {
    guard: &'a RxGuard,
}

impl Drop for RxToken<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}
