//! Read-only views of simulation state: the live snapshot and the final
//! report.
//!
//! Both are fully cloned out from under the guards, so a rendering or
//! reporting layer can hold them as long as it likes without blocking a
//! single agent.

use std::time::Duration;

use egress_core::{Cell, ExitRecord, SimPhase};
use egress_grid::DoorStats;

/// A point-in-time view of the run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimSnapshot {
    pub phase: SimPhase,
    /// Every occupied cell — doors and live agents alike.
    pub occupied: Vec<Cell>,
    /// Per-door positions, counters, and evacuee lists.
    pub doors: Vec<DoorStats>,
    /// Global evacuated count so far.
    pub evacuated: usize,
    /// The ordered agent → door exit log so far.
    pub log: Vec<ExitRecord>,
}

/// Final statistics, computed from the shared guarded state after shutdown —
/// never from worker join results.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimReport {
    pub total_agents: usize,
    pub evacuated: usize,
    /// Agents still inside when the run finished.
    pub stranded: usize,
    pub doors: Vec<DoorStats>,
    pub log: Vec<ExitRecord>,
    /// Wall-clock duration of the whole run, spawn to report.
    pub elapsed: Duration,
}

impl SimReport {
    /// Fraction of agents that made it out, in `[0, 1]`.
    pub fn evacuation_rate(&self) -> f64 {
        if self.total_agents == 0 {
            0.0
        } else {
            self.evacuated as f64 / self.total_agents as f64
        }
    }
}
