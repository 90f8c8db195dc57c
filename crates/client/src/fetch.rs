//! Stale-response guard
//!
//! Screens fire a fresh request on every filter change without cancelling the
//! one in flight. Responses can therefore arrive out of order, and applying a
//! superseded response would overwrite newer data. The gate gives each request
//! a ticket; only the latest ticket is admitted when its response lands.

use std::sync::atomic::{AtomicU64, Ordering};

/// Proof of issue for a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic per-screen request counter
#[derive(Debug, Default)]
pub struct RequestGate {
    generation: AtomicU64,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request, superseding all earlier tickets
    pub fn issue(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a response holding this ticket may still be applied
    pub fn admit(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation.load(Ordering::SeqCst)
    }
}
