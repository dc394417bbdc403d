//! `egress-grid` — the spatial half of the egress simulator.
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`occupancy`] | `OccupancyGrid` — the shared cell set and `try_move`  |
//! | [`doors`]     | `Door`, `DoorRegistry`, per-door exit ledgers         |
//! | [`router`]    | `Router` trait, `BfsRouter`, `Route`, `nearest_exit`  |
//! | [`error`]     | `GridError`, `GridResult`                             |
//!
//! # Concurrency contract
//!
//! Everything in this crate is shared by all agent workers at once.  The
//! occupancy set sits behind one mutex whose critical sections are single
//! check-and-set operations; each door carries its own mutex.  Nothing here
//! ever holds two guards at the same time.

pub mod doors;
pub mod error;
pub mod occupancy;
pub mod router;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use doors::{Door, DoorRegistry, DoorStats};
pub use error::{GridError, GridResult};
pub use occupancy::OccupancyGrid;
pub use router::{nearest_exit, BfsRouter, Route, Router, DEFAULT_EXPANSION_BUDGET};
