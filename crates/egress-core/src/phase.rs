//! The global phase value and the cooperative stop signal.
//!
//! # Protocol
//!
//! One `PhaseController` is shared by every agent worker and the
//! orchestrator.  The phase only moves forward:
//!
//! ```text
//! Normal ──► Evacuating ──► Finished
//! ```
//!
//! Workers poll the phase at the top of every tick and never block on it.
//! The companion stop flag is set exactly once, together with `Finished`, so
//! a worker has two independent chances per tick to notice shutdown.  No
//! preemptive cancellation exists anywhere: a tick performs at most one
//! atomic state mutation and then returns to the top of the loop.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

// ── SimPhase ──────────────────────────────────────────────────────────────────

/// Global simulation stage.  `Ord` makes forward-only transitions a single
/// comparison.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimPhase {
    /// Agents wander at random.
    Normal,
    /// Agents route toward the nearest reachable door.
    Evacuating,
    /// Terminal stage; every worker stops.
    Finished,
}

impl fmt::Display for SimPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimPhase::Normal => "normal",
            SimPhase::Evacuating => "evacuating",
            SimPhase::Finished => "finished",
        };
        f.write_str(name)
    }
}

// ── PhaseController ───────────────────────────────────────────────────────────

/// Guarded phase value plus the run/stop flag, polled by every worker.
pub struct PhaseController {
    phase:   Mutex<SimPhase>,
    running: AtomicBool,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseController {
    /// Start in `Normal` with the run flag set.
    pub fn new() -> Self {
        Self {
            phase:   Mutex::new(SimPhase::Normal),
            running: AtomicBool::new(true),
        }
    }

    fn phase(&self) -> MutexGuard<'_, SimPhase> {
        // The guarded value is a plain enum; a panicked holder cannot leave
        // it torn, so recover from poisoning instead of cascading.
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current phase.  Workers call this at the top of every tick.
    pub fn current(&self) -> SimPhase {
        *self.phase()
    }

    /// Advance to `next` if it is strictly later than the current phase.
    ///
    /// Returns whether the phase changed; a regression or a repeat is a
    /// silent no-op, which keeps the progression monotonic under any caller
    /// interleaving.
    pub fn advance_to(&self, next: SimPhase) -> bool {
        let mut phase = self.phase();
        if next > *phase {
            *phase = next;
            true
        } else {
            false
        }
    }

    /// `false` once the orchestrator has ordered shutdown.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Order cooperative shutdown.  Set exactly once per run, alongside the
    /// advance to `Finished`.
    pub fn halt(&self) {
        self.running.store(false, Ordering::Release);
    }
}
