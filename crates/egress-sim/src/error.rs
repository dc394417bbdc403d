//! Orchestrator-boundary error type.

use thiserror::Error;

use egress_core::ConfigError;
use egress_grid::GridError;

/// Errors surfaced while building a simulation.  Nothing errors after
/// [`build`][crate::SimBuilder::build] succeeds — everything mid-run is
/// absorbed by the agent state machines.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("setup failed: {0}")]
    Grid(#[from] GridError),

    #[error("{what} length {got} does not match configured count {expected}")]
    CellCountMismatch {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },
}

/// Shorthand result type for `egress-sim`.
pub type SimResult<T> = Result<T, SimError>;
