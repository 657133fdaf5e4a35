//! Trailing-edge debounce for submit triggers.
//!
//! Each [`Debouncer::trigger`] hands out a ticket and invalidates the ones
//! before it. Whoever holds a ticket waits out the window and then asks
//! [`Debouncer::is_current`]; only the last trigger of a burst gets `true`.
//! The wait itself is left to the caller so the same type works with tokio
//! and with browser timers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Ticket returned by [`Debouncer::trigger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: AtomicU64::new(0),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Register a trigger. Earlier tickets stop being current.
    pub fn trigger(&self) -> DebounceTicket {
        DebounceTicket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// `true` if no trigger or cancel happened since `ticket` was issued.
    pub fn is_current(&self, ticket: DebounceTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    /// Invalidate every outstanding ticket.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Wait out the window, then report whether `ticket` should fire.
    #[cfg(feature = "native")]
    pub async fn settle(&self, ticket: DebounceTicket) -> bool {
        tokio::time::sleep(self.window).await;
        self.is_current(ticket)
    }
}
