//! In-flight tracking for advisor requests.
//!
//! Each visitor may have at most one outstanding advisor request. A second
//! submission while the first is pending is refused rather than queued or
//! raced.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

/// Set of visitors with an advisor request in flight.
#[derive(Clone, Default)]
pub struct AdvisorGate {
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
}

impl AdvisorGate {
    /// Create an empty gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `visitor` busy.
    ///
    /// Returns `None` if the visitor already has a request in flight. The
    /// returned guard clears the busy flag when dropped, whether the request
    /// succeeded or failed.
    #[must_use]
    pub fn try_acquire(&self, visitor: Uuid) -> Option<InFlightGuard> {
        let inserted = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(visitor);

        inserted.then(|| InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
            visitor,
        })
    }

    /// Whether `visitor` has a request in flight.
    #[must_use]
    pub fn is_busy(&self, visitor: Uuid) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&visitor)
    }
}

/// Busy flag for one visitor; released on drop.
pub struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
    visitor: Uuid,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.visitor);
    }
}
