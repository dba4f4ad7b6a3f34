//! Last-request-wins staleness control for overlapping plan requests.
//!
//! A map session fires a new plan whenever the user edits the origin or
//! destination; results from superseded requests must be discarded when they
//! eventually arrive. Each session owns a monotonically increasing
//! generation counter: a ticket taken at request start is only accepted if
//! no newer request began in the meantime. Sessions are independent, so
//! multiple map instances in one process cannot interfere with each other.

use std::sync::atomic::{AtomicU64, Ordering};

/// Marks one plan request within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanTicket {
    generation: u64,
}

/// Per-session generation counter.
///
/// # Examples
/// ```
/// use roadside_data::PlannerSession;
///
/// let session = PlannerSession::new();
/// let first = session.begin();
/// let second = session.begin();
///
/// // The first request was superseded before it finished.
/// assert!(!session.accept(first));
/// assert!(session.accept(second));
/// ```
#[derive(Debug, Default)]
pub struct PlannerSession {
    generation: AtomicU64,
}

impl PlannerSession {
    /// Create a session with no requests in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new plan request, superseding any earlier ones.
    pub fn begin(&self) -> PlanTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        PlanTicket { generation }
    }

    /// Whether a finished request's results are still current.
    ///
    /// Returns `false` for any ticket other than the most recent; the caller
    /// then drops the results instead of applying them.
    #[must_use]
    pub fn accept(&self, ticket: PlanTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_only_request_is_accepted() {
        let session = PlannerSession::new();
        let ticket = session.begin();
        assert!(session.accept(ticket));
    }

    #[test]
    fn a_newer_request_supersedes_an_older_one() {
        let session = PlannerSession::new();
        let stale = session.begin();
        let current = session.begin();
        assert!(!session.accept(stale));
        assert!(session.accept(current));
    }

    #[test]
    fn acceptance_is_repeatable_until_superseded() {
        let session = PlannerSession::new();
        let ticket = session.begin();
        assert!(session.accept(ticket));
        assert!(session.accept(ticket));
        session.begin();
        assert!(!session.accept(ticket));
    }

    #[test]
    fn sessions_are_isolated() {
        let left = PlannerSession::new();
        let right = PlannerSession::new();
        let left_ticket = left.begin();
        right.begin();
        right.begin();
        assert!(left.accept(left_ticket));
    }
}
