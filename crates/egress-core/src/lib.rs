//! `egress-core` — foundational types for the egress evacuation simulator.
//!
//! This crate is a dependency of every other `egress-*` crate.  It has no
//! `egress-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                             |
//! |------------|------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `DoorId`                                  |
//! | [`cell`]   | `Cell`, `GridBounds`, the fixed step order           |
//! | [`phase`]  | `SimPhase`, `PhaseController`                        |
//! | [`rng`]    | `AgentRng` (per-worker), `SimRng` (setup)            |
//! | [`tally`]  | `EvacTally`, `ExitRecord`                            |
//! | [`config`] | `SimConfig` and its validation floors                |
//! | [`error`]  | `ConfigError`, `ConfigResult`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |

pub mod cell;
pub mod config;
pub mod error;
pub mod ids;
pub mod phase;
pub mod rng;
pub mod tally;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, GridBounds, STEP_ORDER};
pub use config::{SimConfig, MIN_DOORS, MIN_SIDE};
pub use error::{ConfigError, ConfigResult};
pub use ids::{AgentId, DoorId};
pub use phase::{PhaseController, SimPhase};
pub use rng::{AgentRng, SimRng};
pub use tally::{EvacTally, ExitRecord};
