//! Simulation configuration and its construction-time validation.
//!
//! Unsatisfiable parameter combinations are rejected here, before any shared
//! state exists — never discovered mid-run.

use std::time::Duration;

use crate::cell::GridBounds;
use crate::error::{ConfigError, ConfigResult};

/// Hard floor on grid side length.  Anything narrower leaves too little
/// interior for wandering to be meaningful.
pub const MIN_SIDE: i32 = 8;

/// Minimum number of exit doors.
pub const MIN_DOORS: usize = 1;

/// Top-level simulation configuration.
///
/// All fields are plain data; construct literally (possibly starting from
/// [`Default`]) and call [`validate`][Self::validate] — the builder does this
/// before building anything.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Grid width in cells, wall ring included.
    pub width:  i32,
    /// Grid height in cells, wall ring included.
    pub height: i32,

    /// Number of agent workers to spawn.
    pub agent_count: usize,
    /// Number of exit doors placed on the boundary.
    pub door_count:  usize,

    /// Master RNG seed.  The same seed yields the same door placement, agent
    /// spawns, and per-agent decision streams.
    pub seed: u64,

    /// Free-wander period before the evacuation order is given.
    pub pre_evac: Duration,
    /// Bounded window for the evacuation itself; agents still inside when it
    /// elapses are counted as stranded.
    pub evac_timeout: Duration,

    /// Each agent's fixed step delay is drawn uniformly from
    /// `[step_delay_min, step_delay_max]` at creation.
    pub step_delay_min: Duration,
    pub step_delay_max: Duration,

    /// Orchestrator poll cadence while waiting on evacuations (also the
    /// snapshot cadence for observers).
    pub poll_interval: Duration,
    /// Bounded wait for workers to observe the stop signal at shutdown.
    pub shutdown_grace: Duration,
}

impl Default for SimConfig {
    /// A small indoor drill: 15×10 grid, 8 agents, 3 doors, 10 s of
    /// wandering, a 30 s evacuation window, 0.5–1.5 s agent steps.
    fn default() -> Self {
        Self {
            width:          15,
            height:         10,
            agent_count:    8,
            door_count:     3,
            seed:           42,
            pre_evac:       Duration::from_secs(10),
            evac_timeout:   Duration::from_secs(30),
            step_delay_min: Duration::from_millis(500),
            step_delay_max: Duration::from_millis(1500),
            poll_interval:  Duration::from_millis(500),
            shutdown_grace: Duration::from_secs(2),
        }
    }
}

impl SimConfig {
    /// The grid rectangle this configuration describes.
    #[inline]
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.width, self.height)
    }

    /// Reject unsatisfiable parameter combinations.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width < MIN_SIDE {
            return Err(ConfigError::SideTooSmall { axis: "width", got: self.width, min: MIN_SIDE });
        }
        if self.height < MIN_SIDE {
            return Err(ConfigError::SideTooSmall { axis: "height", got: self.height, min: MIN_SIDE });
        }
        if self.agent_count == 0 {
            return Err(ConfigError::NoAgents);
        }
        if self.door_count < MIN_DOORS {
            return Err(ConfigError::TooFewDoors { got: self.door_count, min: MIN_DOORS });
        }

        let bounds = self.bounds();
        let slots = bounds.edge_cell_count();
        if self.door_count > slots {
            return Err(ConfigError::DoorsExceedBoundary {
                requested: self.door_count,
                available: slots,
            });
        }
        let interior = bounds.interior_cell_count();
        if self.agent_count > interior {
            return Err(ConfigError::AgentsExceedInterior {
                requested: self.agent_count,
                available: interior,
            });
        }

        if self.step_delay_min.is_zero() || self.step_delay_min > self.step_delay_max {
            return Err(ConfigError::BadDelayRange);
        }
        if self.evac_timeout.is_zero() {
            return Err(ConfigError::ZeroEvacWindow);
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }

        Ok(())
    }
}
