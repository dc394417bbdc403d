//! Fluent builder that validates configuration and seeds the shared world.

use std::sync::Arc;

use egress_agent::Agent;
use egress_core::{AgentId, Cell, EvacTally, PhaseController, SimConfig, SimRng};
use egress_grid::{BfsRouter, DoorRegistry, GridError, OccupancyGrid, Router};

use crate::error::{SimError, SimResult};
use crate::sim::{Sim, SimShared};

/// Attempts per agent when rejection-sampling a free interior spawn cell.
const SPAWN_ATTEMPTS: usize = 100;

/// Fluent builder for [`Sim<R>`].
///
/// # Overrides (have defaults)
///
/// | Method            | Default                                    |
/// |-------------------|--------------------------------------------|
/// | `.door_cells(v)`  | uniform random non-corner boundary cells   |
/// | `.agent_cells(v)` | uniform random free interior cells         |
/// | `.router(r)`      | [`BfsRouter`] with the default budget      |
///
/// # Example
///
/// ```rust,ignore
/// let report = SimBuilder::new(SimConfig::default())
///     .build()?
///     .run(&mut NoopObserver);
/// ```
pub struct SimBuilder<R: Router = BfsRouter> {
    config:      SimConfig,
    router:      R,
    door_cells:  Option<Vec<Cell>>,
    agent_cells: Option<Vec<Cell>>,
}

impl SimBuilder<BfsRouter> {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            router:      BfsRouter::default(),
            door_cells:  None,
            agent_cells: None,
        }
    }
}

impl<R: Router> SimBuilder<R> {
    /// Swap the routing engine.
    pub fn router<R2: Router>(self, router: R2) -> SimBuilder<R2> {
        SimBuilder {
            config:      self.config,
            router,
            door_cells:  self.door_cells,
            agent_cells: self.agent_cells,
        }
    }

    /// Place doors at explicit cells instead of sampling.  Length must equal
    /// `config.door_count`; each cell must be a distinct non-corner boundary
    /// cell.
    pub fn door_cells(mut self, cells: Vec<Cell>) -> Self {
        self.door_cells = Some(cells);
        self
    }

    /// Spawn agents at explicit cells instead of sampling.  Length must
    /// equal `config.agent_count`; each cell must be a distinct interior
    /// cell.
    pub fn agent_cells(mut self, cells: Vec<Cell>) -> Self {
        self.agent_cells = Some(cells);
        self
    }

    /// Validate the configuration, seed grid, doors, and agents, and return
    /// a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<R>> {
        self.config.validate()?;

        if let Some(cells) = &self.door_cells {
            if cells.len() != self.config.door_count {
                return Err(SimError::CellCountMismatch {
                    what:     "door cells",
                    expected: self.config.door_count,
                    got:      cells.len(),
                });
            }
        }
        if let Some(cells) = &self.agent_cells {
            if cells.len() != self.config.agent_count {
                return Err(SimError::CellCountMismatch {
                    what:     "agent cells",
                    expected: self.config.agent_count,
                    got:      cells.len(),
                });
            }
        }

        let mut rng = SimRng::new(self.config.seed);
        let grid = OccupancyGrid::new(self.config.bounds());

        // ── Doors first: they hold their cells for the whole run ──────────
        let doors = match &self.door_cells {
            Some(cells) => DoorRegistry::with_cells(&grid, cells)?,
            None => DoorRegistry::place(&grid, self.config.door_count, &mut rng)?,
        };

        // ── Agent spawns ──────────────────────────────────────────────────
        let mut agents = Vec::with_capacity(self.config.agent_count);
        for i in 0..self.config.agent_count {
            let cell = match &self.agent_cells {
                Some(cells) => {
                    let cell = cells[i];
                    if !grid.bounds().is_interior(cell) || !grid.reserve(cell) {
                        return Err(GridError::BadSpawnCell(cell).into());
                    }
                    cell
                }
                None => grid
                    .claim_random_interior(&mut rng, SPAWN_ATTEMPTS)
                    .ok_or(GridError::SpawnExhausted { attempts: SPAWN_ATTEMPTS })?,
            };
            agents.push(Agent::new(
                AgentId(i as u32),
                cell,
                self.config.seed,
                self.config.step_delay_min,
                self.config.step_delay_max,
            ));
        }

        Ok(Sim {
            config: self.config,
            shared: Arc::new(SimShared {
                grid,
                doors,
                phase: PhaseController::new(),
                tally: EvacTally::new(),
                router: self.router,
            }),
            agents,
        })
    }
}
