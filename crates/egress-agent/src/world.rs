//! Borrowed view of the shared world, as one agent worker sees it.

use egress_core::{EvacTally, PhaseController};
use egress_grid::{DoorRegistry, OccupancyGrid, Router};

/// Everything an agent worker may touch.  All fields are internally guarded
/// shared state; the view itself is plain borrows and freely copyable.
pub struct WorldView<'a, R: Router + ?Sized> {
    pub grid:   &'a OccupancyGrid,
    pub doors:  &'a DoorRegistry,
    pub phase:  &'a PhaseController,
    pub tally:  &'a EvacTally,
    pub router: &'a R,
}

impl<R: Router + ?Sized> Clone for WorldView<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Router + ?Sized> Copy for WorldView<'_, R> {}
