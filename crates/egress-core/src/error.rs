//! Construction-time error type.
//!
//! `ConfigError` is the only error kind that crosses the orchestrator
//! boundary.  Everything else that can go "wrong" mid-run — no door
//! currently reachable, a move contested by another agent — is absorbed by
//! the agent state machine as normal operation, not surfaced as an error.

use thiserror::Error;

/// Rejected configuration, reported before any simulation state is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{axis} must be at least {min} cells, got {got}")]
    SideTooSmall {
        axis: &'static str,
        got:  i32,
        min:  i32,
    },

    #[error("at least one agent is required")]
    NoAgents,

    #[error("at least {min} door(s) required, got {got}")]
    TooFewDoors { got: usize, min: usize },

    #[error("{requested} doors requested but the boundary has only {available} non-corner cells")]
    DoorsExceedBoundary { requested: usize, available: usize },

    #[error("{requested} agents requested but the interior has only {available} cells")]
    AgentsExceedInterior { requested: usize, available: usize },

    #[error("step delay range is empty or starts at zero")]
    BadDelayRange,

    #[error("evacuation window must be non-zero")]
    ZeroEvacWindow,

    #[error("poll interval must be non-zero")]
    ZeroPollInterval,
}

/// Shorthand result for validation.
pub type ConfigResult<T> = Result<T, ConfigError>;
