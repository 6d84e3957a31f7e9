//! Debouncing for server-side station filtering.
//!
//! Each input change takes a ticket and waits out the interval. Only the
//! newest ticket survives the wait, and only the newest ticket may apply a
//! response, so a slow reply to an older keystroke cannot overwrite a newer
//! one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// A pending debounced call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Generation-counting debouncer.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    /// Create a debouncer with the given quiet interval.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// The quiet interval.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Supersede every earlier ticket and return a new one.
    pub fn issue(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer ticket has been issued since `ticket`.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Issue a ticket and wait out the interval.
    ///
    /// Returns `None` if another call arrived during the wait.
    pub async fn settle(&self) -> Option<Ticket> {
        let ticket = self.issue();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.is_current(ticket).then_some(ticket)
    }
}
