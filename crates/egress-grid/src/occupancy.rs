//! The shared occupancy set and its atomic move primitive.
//!
//! # Exclusion model
//!
//! One mutex guards the whole set.  Every operation is a single short
//! check-and-set — the guard is never held across a sleep or a routing
//! call — so at drill scale (dozens of agents) contention is negligible.
//! Partition by region only if profiling ever shows otherwise.
//!
//! `try_move` is the serialization point that keeps cell ownership exclusive:
//! of two workers racing for the same destination cell, exactly one observes
//! it free and commits.  The loser's plan is stale and must be recomputed
//! from live state — that reconciliation lives in the agent state machine,
//! not here.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashSet;

use egress_core::{Cell, GridBounds, SimRng};

/// The authoritative set of occupied cells — doors for the whole run, agents
/// while they are alive.  A cell is in the set iff something occupies it.
pub struct OccupancyGrid {
    bounds: GridBounds,
    cells:  Mutex<FxHashSet<Cell>>,
}

impl OccupancyGrid {
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            cells: Mutex::new(FxHashSet::default()),
        }
    }

    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    fn cells(&self) -> MutexGuard<'_, FxHashSet<Cell>> {
        // Every critical section is a single set operation; a panicked holder
        // cannot leave the set half-updated, so recover from poisoning.
        self.cells.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `true` iff nothing currently occupies `cell`.
    pub fn is_free(&self, cell: Cell) -> bool {
        !self.cells().contains(&cell)
    }

    /// Atomically vacate `from` and claim `to`, iff `to` is free.
    ///
    /// The check and both updates happen under one guard acquisition, so of
    /// two concurrent calls targeting the same `to`, exactly one succeeds.
    /// This is the only way a live agent's cell ever changes.
    pub fn try_move(&self, from: Cell, to: Cell) -> bool {
        let mut cells = self.cells();
        if cells.contains(&to) {
            return false;
        }
        cells.remove(&from);
        cells.insert(to);
        true
    }

    /// Vacate `cell` for good — used when an agent steps out through a door
    /// and its interior cell becomes free again.
    pub fn release(&self, cell: Cell) {
        self.cells().remove(&cell);
    }

    /// Claim `cell` if free; returns `false` when something already holds it.
    /// Setup only: door placement and initial agent spawns.
    pub fn reserve(&self, cell: Cell) -> bool {
        self.cells().insert(cell)
    }

    /// Claim a uniformly random free interior cell, giving up after
    /// `max_attempts` rejected draws on a crowded interior.
    pub fn claim_random_interior(&self, rng: &mut SimRng, max_attempts: usize) -> Option<Cell> {
        for _ in 0..max_attempts {
            let x = rng.gen_range(1..self.bounds.width - 1);
            let y = rng.gen_range(1..self.bounds.height - 1);
            let cell = Cell::new(x, y);
            if self.reserve(cell) {
                return Some(cell);
            }
        }
        None
    }

    /// Clone out the currently occupied cells, doors included.
    pub fn occupied(&self) -> Vec<Cell> {
        self.cells().iter().copied().collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells().len()
    }
}
