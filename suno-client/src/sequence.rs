//! Request sequencing
//!
//! Each outgoing request takes a ticket from a monotonically increasing
//! counter. When the response comes back it is only applied if its ticket
//! is still the newest one issued, so a slow response can never overwrite
//! the result of a request made after it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket handed out by [`RequestSequencer::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Latest-request-wins sequencer
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket newer than every ticket issued before.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the newest one.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Invalidates every outstanding ticket.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let seq = RequestSequencer::new();
        let first = seq.begin();
        assert!(seq.is_current(first));

        let second = seq.begin();
        assert!(second > first);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_invalidate_drops_outstanding() {
        let seq = RequestSequencer::new();
        let ticket = seq.begin();
        seq.invalidate();
        assert!(!seq.is_current(ticket));
        assert!(seq.is_current(seq.begin()));
    }

    #[test]
    fn test_tickets_unique_across_threads() {
        let seq = std::sync::Arc::new(RequestSequencer::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let seq = seq.clone();
                std::thread::spawn(move || (0..100).map(|_| seq.begin().value()).collect::<Vec<_>>())
            })
            .collect();
        let mut all: Vec<u64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
    }
}
