//! Spatial-subsystem error type.
//!
//! Everything here is a *setup* failure.  Mid-run conditions (unreachable
//! doors, contested moves) are not errors — they are absorbed by the agent
//! state machine.

use thiserror::Error;

use egress_core::{Cell, DoorId};

/// Errors produced by `egress-grid`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("{requested} doors requested but only {available} usable boundary cells exist")]
    ExitPlacement { requested: usize, available: usize },

    #[error("cell {0} cannot hold a door (must be a free non-corner boundary cell)")]
    BadDoorCell(Cell),

    #[error("cell {0} cannot hold an agent spawn (must be a free interior cell)")]
    BadSpawnCell(Cell),

    #[error("no free interior cell found after {attempts} placement attempts")]
    SpawnExhausted { attempts: usize },

    #[error("door {0} is not in the registry")]
    UnknownDoor(DoorId),
}

/// Shorthand result type for `egress-grid`.
pub type GridResult<T> = Result<T, GridError>;
