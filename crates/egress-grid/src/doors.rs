//! Exit doors and their per-door exit ledgers.
//!
//! Doors sit on non-corner boundary cells, stay reserved in the occupancy set
//! for the whole run, and each carries its own mutex — two agents exiting
//! through different doors never contend.  Within one door, the ledger
//! reflects a valid total order of arrivals at that door.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::seq::index;

use egress_core::{AgentId, Cell, DoorId, SimRng};

use crate::error::{GridError, GridResult};
use crate::occupancy::OccupancyGrid;

// ── Door ──────────────────────────────────────────────────────────────────────

/// Exit count and evacuee order for one door.
#[derive(Default)]
struct Ledger {
    exits:    u32,
    evacuees: Vec<AgentId>,
}

/// One exit door: fixed identity and cell, guarded mutable ledger.
pub struct Door {
    id:     DoorId,
    cell:   Cell,
    ledger: Mutex<Ledger>,
}

impl Door {
    fn new(id: DoorId, cell: Cell) -> Self {
        Self {
            id,
            cell,
            ledger: Mutex::new(Ledger::default()),
        }
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn id(&self) -> DoorId {
        self.id
    }

    #[inline]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Count of agents that have left through this door.  Never decreases.
    pub fn exits(&self) -> u32 {
        self.ledger().exits
    }

    /// Evacuee ids in arrival order at this door.
    pub fn evacuees(&self) -> Vec<AgentId> {
        self.ledger().evacuees.clone()
    }

    /// Record `agent` stepping out: bump the counter and append to the
    /// ordered list, under this door's own guard.
    pub fn register_exit(&self, agent: AgentId) {
        let mut ledger = self.ledger();
        ledger.exits += 1;
        ledger.evacuees.push(agent);
    }
}

/// Point-in-time statistics for one door.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorStats {
    pub id:       DoorId,
    pub cell:     Cell,
    pub exits:    u32,
    pub evacuees: Vec<AgentId>,
}

// ── DoorRegistry ──────────────────────────────────────────────────────────────

/// The fixed set of doors for one run.  Immutable after placement; the order
/// of the backing `Vec` is the enumeration (and routing tie-break) order.
pub struct DoorRegistry {
    doors: Vec<Door>,
}

impl DoorRegistry {
    /// Place `count` doors on distinct non-corner boundary cells drawn
    /// uniformly without replacement, reserving each in `grid`.
    pub fn place(grid: &OccupancyGrid, count: usize, rng: &mut SimRng) -> GridResult<Self> {
        let slots = grid.bounds().edge_cells();
        if count > slots.len() {
            return Err(GridError::ExitPlacement {
                requested: count,
                available: slots.len(),
            });
        }
        let cells: Vec<Cell> = index::sample(rng.inner(), slots.len(), count)
            .iter()
            .map(|i| slots[i])
            .collect();
        Self::with_cells(grid, &cells)
    }

    /// Place doors at explicit cells — used by tests and demos that need a
    /// known layout.  Every cell must be a distinct, free, non-corner
    /// boundary cell.
    pub fn with_cells(grid: &OccupancyGrid, cells: &[Cell]) -> GridResult<Self> {
        let bounds = grid.bounds();
        let mut doors = Vec::with_capacity(cells.len());
        for (i, &cell) in cells.iter().enumerate() {
            if !bounds.is_boundary(cell) || bounds.is_corner(cell) || !grid.reserve(cell) {
                return Err(GridError::BadDoorCell(cell));
            }
            doors.push(Door::new(DoorId(i as u16), cell));
        }
        Ok(Self { doors })
    }

    /// Doors in placement order.
    #[inline]
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn get(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    /// Record `agent` leaving through `door`.
    pub fn register_exit(&self, door: DoorId, agent: AgentId) -> GridResult<()> {
        let d = self.get(door).ok_or(GridError::UnknownDoor(door))?;
        d.register_exit(agent);
        Ok(())
    }

    /// Snapshot every door's ledger.
    pub fn stats(&self) -> Vec<DoorStats> {
        self.doors
            .iter()
            .map(|d| {
                let ledger = d.ledger();
                DoorStats {
                    id:       d.id,
                    cell:     d.cell,
                    exits:    ledger.exits,
                    evacuees: ledger.evacuees.clone(),
                }
            })
            .collect()
    }
}
