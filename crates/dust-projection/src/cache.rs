//! Projection cache keyed by exact month-boundary timestamp.
//!
//! The cache holds at most one run generation, tagged with the reference
//! timestamp (index 0) of the run that opened it. A run opens with
//! [`ProjectionCache::begin_run`], which keeps the current generation only
//! if it was opened for the same reference and otherwise clears the map and
//! bumps the generation number. Month `k` of one run is never reused as
//! index 0 of another: the assumption depends on the run's own index.
//!
//! Reads and inserts during a run carry its [`RunTicket`]. Both are refused
//! once the ticket's generation has been superseded, so a slow run can never
//! mix its months with a newer run's entries.
//!
//! The lock is held only for map operations, never while months are
//! computed.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::engine::MonthlySnapshot;

/// Proof that a run started against a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTicket {
    generation: u64,
    reused: bool,
}

impl RunTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when the run continues a generation opened for the same reference.
    pub fn reused(&self) -> bool {
        self.reused
    }
}

#[derive(Debug, Default)]
struct Generation {
    id: u64,
    /// Index 0 of the run that opened this generation.
    reference: Option<u64>,
    entries: HashMap<u64, MonthlySnapshot>,
}

/// Memo of global monthly snapshots, injected into the projector.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    inner: Mutex<Generation>,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, timestamp: u64) -> Option<MonthlySnapshot> {
        self.inner.lock().entries.get(&timestamp).cloned()
    }

    /// Entry under `timestamp`, only while `ticket`'s generation is current.
    pub fn lookup_for(&self, ticket: &RunTicket, timestamp: u64) -> Option<MonthlySnapshot> {
        let guard = self.inner.lock();
        if guard.id != ticket.generation {
            return None;
        }
        guard.entries.get(&timestamp).cloned()
    }

    /// All snapshots for `timestamps` of the run opened at `reference`, in
    /// order. `None` if the generation belongs to another reference or any
    /// entry is missing.
    pub fn lookup_window(&self, reference: u64, timestamps: &[u64]) -> Option<Vec<MonthlySnapshot>> {
        let guard = self.inner.lock();
        if guard.reference != Some(reference) {
            return None;
        }
        timestamps
            .iter()
            .map(|ts| guard.entries.get(ts).cloned())
            .collect()
    }

    /// Open a run whose index 0 is `reference`.
    pub fn begin_run(&self, reference: u64) -> RunTicket {
        let mut guard = self.inner.lock();
        if guard.reference == Some(reference) {
            return RunTicket {
                generation: guard.id,
                reused: true,
            };
        }
        let dropped = guard.entries.len();
        guard.entries.clear();
        guard.id = guard.id.wrapping_add(1);
        guard.reference = Some(reference);
        debug!(generation = guard.id, reference, dropped, "projection cache cleared");
        RunTicket {
            generation: guard.id,
            reused: false,
        }
    }

    /// Store `snapshot` under `timestamp` if `ticket` is still current.
    ///
    /// Returns false when the ticket's generation has been superseded.
    pub fn insert(&self, ticket: &RunTicket, timestamp: u64, snapshot: MonthlySnapshot) -> bool {
        let mut guard = self.inner.lock();
        if guard.id != ticket.generation {
            warn!(
                stale = ticket.generation,
                current = guard.id,
                timestamp,
                "dropping projection from superseded run"
            );
            return false;
        }
        guard.entries.insert(timestamp, snapshot);
        true
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Current generation number.
    pub fn generation(&self) -> u64 {
        self.inner.lock().id
    }
}
