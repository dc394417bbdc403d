//! Run-wide evacuation statistics: guarded counter and append-only log.
//!
//! Written by agent workers at the moment of exit, read by the orchestrator's
//! poll loop.  Final statistics are computed from here rather than from
//! worker join results, so a straggling worker can never skew the report.
//!
//! Ordering: the log entry is appended before the counter is bumped, so any
//! reader that observes `evacuated() == n` will find at least `n` entries in
//! the log.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{AgentId, DoorId};

/// One line of the global evacuation log: which agent left through which
/// door, in overall arrival order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExitRecord {
    pub agent: AgentId,
    pub door:  DoorId,
}

/// Global evacuated counter plus the ordered exit log.
#[derive(Default)]
pub struct EvacTally {
    evacuated: AtomicUsize,
    log:       Mutex<Vec<ExitRecord>>,
}

impl EvacTally {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<ExitRecord>> {
        // Appends are single-step; recover from poisoning rather than cascade.
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one exit.  Called by the exiting agent's own worker, exactly
    /// once, as the last thing it does before terminating.
    pub fn record_exit(&self, agent: AgentId, door: DoorId) {
        self.log().push(ExitRecord { agent, door });
        self.evacuated.fetch_add(1, Ordering::AcqRel);
    }

    /// How many agents have exited so far.  Monotonically non-decreasing.
    #[inline]
    pub fn evacuated(&self) -> usize {
        self.evacuated.load(Ordering::Acquire)
    }

    /// Snapshot of the ordered log.
    pub fn exit_log(&self) -> Vec<ExitRecord> {
        self.log().clone()
    }
}
