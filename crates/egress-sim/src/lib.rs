//! `egress-sim` — orchestrator for the egress evacuation simulator.
//!
//! # Timeline
//!
//! ```text
//! build      — validate config, seed grid + doors + agents     (SimBuilder)
//! spawn      — one OS thread per agent, all in phase Normal
//! wander     — sleep the pre-evacuation interval
//! evacuate   — advance phase to Evacuating; poll until every agent
//!              has exited or the evacuation window elapses
//! shutdown   — advance to Finished + set the stop flag; wait a bounded
//!              grace period for workers to notice; join only the workers
//!              that actually finished
//! report     — final statistics from the shared guarded state
//! ```
//!
//! The orchestrator never dictates an individual agent's step; agents
//! schedule themselves and coordinate only through the shared guarded state.
//! Observer hooks fire at phase changes, at every poll, and once at the end.

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{SimReport, SimSnapshot};
pub use sim::{Sim, SimShared};
