//! `egress-agent` — the per-agent behavioral state machine.
//!
//! Each simulated agent runs this machine on its own dedicated worker
//! thread:
//!
//! ```text
//! loop:
//!   stop signal set?   → Stopped (terminal)
//!   phase Normal       → wander step: one random free neighbor, one try_move
//!   phase Evacuating   → evacuate step: follow a cached route to the
//!                        nearest door; may end in Exited (terminal)
//!   phase Finished     → Stopped (terminal)
//!   sleep this agent's own fixed delay
//! ```
//!
//! Cross-agent coordination is entirely indirect through the shared
//! occupancy set: no agent ever reads another agent's state, and the only
//! write an agent performs outside its own fields is a single guarded
//! check-and-set per tick.

pub mod agent;
pub mod world;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::{Agent, Outcome};
pub use world::WorldView;
