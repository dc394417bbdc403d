//! Simulation observer trait for progress reporting and data collection.

use egress_core::SimPhase;

use crate::report::{SimReport, SimSnapshot};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run], always from the
/// orchestrator thread — never from an agent worker.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — phase printer
///
/// ```rust,ignore
/// struct PhasePrinter;
///
/// impl SimObserver for PhasePrinter {
///     fn on_phase(&mut self, phase: SimPhase) {
///         println!("phase → {phase}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// The global phase just advanced to `phase`.
    fn on_phase(&mut self, _phase: SimPhase) {}

    /// Called once per orchestrator poll with a freshly cloned snapshot —
    /// during both the wander period and the evacuation window.
    fn on_snapshot(&mut self, _snapshot: &SimSnapshot) {}

    /// Called once after shutdown with the final report.
    fn on_sim_end(&mut self, _report: &SimReport) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
