//! The agent itself: identity, owned position, and the tick functions.

use std::thread;
use std::time::Duration;

use egress_core::{AgentId, AgentRng, Cell, DoorId, SimPhase};
use egress_grid::{nearest_exit, Route, Router};

use crate::world::WorldView;

/// Terminal fate of one agent worker.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// Reached a door during the evacuation phase.
    Exited(DoorId),
    /// Still inside when the run finished.
    Stopped,
}

/// A cached evacuation plan.  Target and route live and die together: any
/// staleness or contention discards both, forcing a fresh nearest-door
/// search from live state on the next tick.
pub(crate) struct Plan {
    door:  DoorId,
    route: Route,
}

/// One simulated agent.
///
/// Position, plan, delay, and RNG are owned exclusively by the worker thread
/// running [`Agent::run`]; nothing else ever writes them.  Other components
/// learn of this agent's whereabouts only through the occupancy set.
pub struct Agent {
    id:    AgentId,
    pub(crate) cell: Cell,
    delay: Duration,
    rng:   AgentRng,
    pub(crate) plan: Option<Plan>,
}

impl Agent {
    /// Create an agent at `cell` with a step delay drawn uniformly from
    /// `[delay_min, delay_max]` (millisecond resolution) using the agent's
    /// own deterministic RNG.
    pub fn new(
        id:        AgentId,
        cell:      Cell,
        run_seed:  u64,
        delay_min: Duration,
        delay_max: Duration,
    ) -> Self {
        let mut rng = AgentRng::new(run_seed, id);
        let delay = Duration::from_millis(
            rng.gen_range(delay_min.as_millis() as u64..=delay_max.as_millis() as u64),
        );
        Self { id, cell, delay, rng, plan: None }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// The agent's current cell.  Meaningless once the agent has exited.
    #[inline]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// This agent's fixed per-tick delay.
    #[inline]
    pub fn step_delay(&self) -> Duration {
        self.delay
    }

    /// Drive the state machine until a terminal state is reached.  Blocks
    /// the calling thread; meant to be the entire body of one worker thread.
    pub fn run<R: Router + ?Sized>(mut self, world: WorldView<'_, R>) -> Outcome {
        loop {
            if !world.phase.is_running() {
                return Outcome::Stopped;
            }
            match world.phase.current() {
                SimPhase::Normal => self.wander(&world),
                SimPhase::Evacuating => {
                    if let Some(door) = self.evacuate(&world) {
                        return Outcome::Exited(door);
                    }
                }
                SimPhase::Finished => return Outcome::Stopped,
            }
            thread::sleep(self.delay);
        }
    }

    /// One wander tick: uniform pick among the currently free interior
    /// neighbors, committed with a single `try_move`.  Losing the race means
    /// staying put until the next tick — no retry within the same tick.
    pub(crate) fn wander<R: Router + ?Sized>(&mut self, world: &WorldView<'_, R>) {
        let bounds = world.grid.bounds();
        let open: Vec<Cell> = self
            .cell
            .neighbors()
            .into_iter()
            .filter(|&c| bounds.is_interior(c) && world.grid.is_free(c))
            .collect();
        let Some(&next) = self.rng.choose(&open) else {
            return;
        };
        if world.grid.try_move(self.cell, next) {
            self.cell = next;
        }
    }

    /// One evacuation tick.  Returns the door id when the agent steps out.
    ///
    /// The plan is taken out of its slot at the top and put back only if it
    /// survives the tick, so every discard path is simply "don't restore".
    pub(crate) fn evacuate<R: Router + ?Sized>(
        &mut self,
        world: &WorldView<'_, R>,
    ) -> Option<DoorId> {
        let mut plan = match self.plan.take() {
            Some(plan) => plan,
            // No cached plan: search for the nearest reachable door.  Finding
            // none is a normal transient (congestion may clear); retry next
            // tick.
            None => {
                let (door, route) =
                    nearest_exit(world.router, world.grid, world.doors, self.cell)?;
                Plan { door, route }
            }
        };

        // The route assumed we would still be at its implied start.  A next
        // hop that is not adjacent means the plan is stale — discard it
        // outright rather than attempting local repair.
        let next = plan.route.peek()?;
        if self.cell.manhattan(next) != 1 {
            return None;
        }
        plan.route.advance();

        let exit = world.doors.get(plan.door)?;
        if next == exit.cell() {
            // Stepping out: vacate the interior cell first so it is
            // immediately reusable, then record the exit on the door ledger
            // and the run tally.
            world.grid.release(self.cell);
            exit.register_exit(self.id);
            world.tally.record_exit(self.id, plan.door);
            return Some(plan.door);
        }

        if world.grid.try_move(self.cell, next) {
            self.cell = next;
            // Keep consuming the cached route on subsequent ticks.
            self.plan = Some(plan);
        } else {
            // Contested: another agent claimed the cell between planning and
            // commit.  Drop the whole plan, forcing a fresh search next tick.
            drop(plan);
        }
        None
    }
}
