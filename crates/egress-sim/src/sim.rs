//! The `Sim` struct: shared world, worker lifecycle, and the phase timeline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use egress_agent::{Agent, Outcome, WorldView};
use egress_core::{EvacTally, PhaseController, SimConfig, SimPhase};
use egress_grid::{DoorRegistry, OccupancyGrid, Router};

use crate::observer::SimObserver;
use crate::report::{SimReport, SimSnapshot};

/// Poll cadence while waiting out the shutdown grace period.
const GRACE_POLL: Duration = Duration::from_millis(10);

// ── SimShared ─────────────────────────────────────────────────────────────────

/// State shared between the orchestrator and every agent worker.
///
/// Each field carries its own guard and no operation anywhere holds two
/// guards at once, which rules out lock-ordering deadlocks by construction.
pub struct SimShared<R: Router> {
    pub grid:   OccupancyGrid,
    pub doors:  DoorRegistry,
    pub phase:  PhaseController,
    pub tally:  EvacTally,
    pub router: R,
}

impl<R: Router> SimShared<R> {
    fn view(&self) -> WorldView<'_, R> {
        WorldView {
            grid:   &self.grid,
            doors:  &self.doors,
            phase:  &self.phase,
            tally:  &self.tally,
            router: &self.router,
        }
    }

    fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            phase:     self.phase.current(),
            occupied:  self.grid.occupied(),
            doors:     self.doors.stats(),
            evacuated: self.tally.evacuated(),
            log:       self.tally.exit_log(),
        }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The assembled simulation.  Created by [`SimBuilder`][crate::SimBuilder];
/// consumed by [`run`][Self::run].
pub struct Sim<R: Router> {
    pub config: SimConfig,
    pub shared: Arc<SimShared<R>>,
    pub(crate) agents: Vec<Agent>,
}

impl<R: Router + 'static> Sim<R> {
    /// Clone out a read-only view of the current state.
    pub fn snapshot(&self) -> SimSnapshot {
        self.shared.snapshot()
    }

    /// Drive the full timeline and return the final report.
    ///
    /// Consumes the sim: agents move onto their worker threads and the
    /// report is the run's lasting artifact.  The report is assembled from
    /// the shared guarded state, so it is complete and consistent even if a
    /// straggling worker outlives the grace period.
    pub fn run<O: SimObserver>(mut self, observer: &mut O) -> SimReport {
        let started = Instant::now();
        let total = self.agents.len();
        let live = Arc::new(AtomicUsize::new(total));

        // ── Spawn one worker per agent ────────────────────────────────────
        let handles: Vec<JoinHandle<Outcome>> = self
            .agents
            .drain(..)
            .map(|agent| {
                let shared = Arc::clone(&self.shared);
                let live = Arc::clone(&live);
                thread::spawn(move || {
                    let outcome = agent.run(shared.view());
                    live.fetch_sub(1, Ordering::AcqRel);
                    outcome
                })
            })
            .collect();

        observer.on_phase(SimPhase::Normal);

        // ── Wander period ─────────────────────────────────────────────────
        self.sleep_observed(self.config.pre_evac, observer);

        // ── Evacuation window ─────────────────────────────────────────────
        self.shared.phase.advance_to(SimPhase::Evacuating);
        observer.on_phase(SimPhase::Evacuating);

        let deadline = Instant::now() + self.config.evac_timeout;
        while self.shared.tally.evacuated() < total {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep(self.config.poll_interval.min(deadline - now));
            observer.on_snapshot(&self.shared.snapshot());
        }

        // ── Shutdown ──────────────────────────────────────────────────────
        self.shared.phase.advance_to(SimPhase::Finished);
        self.shared.phase.halt();
        observer.on_phase(SimPhase::Finished);

        // Workers notice the stop signal within one of their own tick
        // delays; wait a bounded grace period, then join only the workers
        // that actually finished.  A straggler is abandoned, never blocked
        // on.
        let grace_deadline = Instant::now() + self.config.shutdown_grace;
        while live.load(Ordering::Acquire) > 0 && Instant::now() < grace_deadline {
            thread::sleep(GRACE_POLL);
        }
        for handle in handles {
            if handle.is_finished() {
                let _ = handle.join();
            }
        }

        let report = self.report(total, started.elapsed());
        observer.on_sim_end(&report);
        report
    }

    /// Sleep `total` in poll-interval slices, snapshotting for the observer
    /// after each slice.
    fn sleep_observed<O: SimObserver>(&self, total: Duration, observer: &mut O) {
        let deadline = Instant::now() + total;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep(self.config.poll_interval.min(deadline - now));
            observer.on_snapshot(&self.shared.snapshot());
        }
    }

    fn report(&self, total: usize, elapsed: Duration) -> SimReport {
        let evacuated = self.shared.tally.evacuated();
        SimReport {
            total_agents: total,
            evacuated,
            stranded: total - evacuated,
            doors: self.shared.doors.stats(),
            log: self.shared.tally.exit_log(),
            elapsed,
        }
    }
}
