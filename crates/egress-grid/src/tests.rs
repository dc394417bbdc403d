//! Unit and concurrency tests for egress-grid.

use egress_core::{Cell, GridBounds, SimRng};

use crate::{BfsRouter, DoorRegistry, OccupancyGrid, Router};

fn grid(width: i32, height: i32) -> OccupancyGrid {
    OccupancyGrid::new(GridBounds::new(width, height))
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use super::*;

    #[test]
    fn reserve_release_roundtrip() {
        let g = grid(10, 10);
        let c = Cell::new(3, 3);

        assert!(g.is_free(c));
        assert!(g.reserve(c));
        assert!(!g.is_free(c));
        assert!(!g.reserve(c), "double reserve must fail");

        g.release(c);
        assert!(g.is_free(c));
        assert_eq!(g.occupied_count(), 0);
    }

    #[test]
    fn try_move_vacates_and_claims() {
        let g = grid(10, 10);
        let from = Cell::new(2, 2);
        let to = Cell::new(2, 3);
        g.reserve(from);

        assert!(g.try_move(from, to));
        assert!(g.is_free(from));
        assert!(!g.is_free(to));
        assert_eq!(g.occupied_count(), 1);
    }

    #[test]
    fn try_move_into_occupied_fails() {
        let g = grid(10, 10);
        let from = Cell::new(2, 2);
        let to = Cell::new(2, 3);
        g.reserve(from);
        g.reserve(to);

        assert!(!g.try_move(from, to));
        // Nothing moved.
        assert!(!g.is_free(from));
        assert!(!g.is_free(to));
    }

    /// Two workers racing for the same destination cell: exactly one wins,
    /// and the loser subsequently sees the cell as taken.
    #[test]
    fn contested_move_has_exactly_one_winner() {
        use std::sync::Barrier;

        for _ in 0..100 {
            let g = grid(10, 10);
            let a = Cell::new(2, 3);
            let b = Cell::new(4, 3);
            let target = Cell::new(3, 3);
            g.reserve(a);
            g.reserve(b);

            let barrier = Barrier::new(2);
            let (won_a, won_b) = std::thread::scope(|s| {
                let ha = s.spawn(|| {
                    barrier.wait();
                    g.try_move(a, target)
                });
                let hb = s.spawn(|| {
                    barrier.wait();
                    g.try_move(b, target)
                });
                (ha.join().unwrap(), hb.join().unwrap())
            });

            assert!(won_a ^ won_b, "exactly one racer must win");
            assert!(!g.is_free(target));
            assert_eq!(g.occupied_count(), 2);
            // The loser stayed where it was.
            if won_a {
                assert!(!g.is_free(b));
            } else {
                assert!(!g.is_free(a));
            }
        }
    }

    #[test]
    fn random_interior_claims_are_distinct_and_interior() {
        let g = grid(10, 10);
        let mut rng = SimRng::new(7);
        let mut claimed = Vec::new();
        for _ in 0..20 {
            let cell = g.claim_random_interior(&mut rng, 100).unwrap();
            assert!(g.bounds().is_interior(cell));
            claimed.push(cell);
        }
        let unique: std::collections::HashSet<_> = claimed.iter().collect();
        assert_eq!(unique.len(), claimed.len());
        assert_eq!(g.occupied_count(), 20);
    }

    #[test]
    fn random_interior_gives_up_when_full() {
        let g = grid(8, 8);
        let mut rng = SimRng::new(7);
        // Fill the entire 6×6 interior.
        for x in 1..7 {
            for y in 1..7 {
                assert!(g.reserve(Cell::new(x, y)));
            }
        }
        assert!(g.claim_random_interior(&mut rng, 200).is_none());
    }
}

// ── Doors ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod doors {
    use super::*;
    use crate::GridError;
    use egress_core::{AgentId, DoorId};

    #[test]
    fn placement_reserves_distinct_edge_cells() {
        let g = grid(12, 10);
        let mut rng = SimRng::new(1);
        let registry = DoorRegistry::place(&g, 4, &mut rng).unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(g.occupied_count(), 4);
        let bounds = g.bounds();
        let mut cells = std::collections::HashSet::new();
        for door in registry.doors() {
            assert!(bounds.is_boundary(door.cell()));
            assert!(!bounds.is_corner(door.cell()));
            assert!(cells.insert(door.cell()), "duplicate door cell");
        }
    }

    #[test]
    fn placement_rejects_impossible_count() {
        let g = grid(10, 8);
        let mut rng = SimRng::new(1);
        let available = g.bounds().edge_cell_count();
        let result = DoorRegistry::place(&g, available + 1, &mut rng);
        assert_eq!(
            result.err(),
            Some(GridError::ExitPlacement { requested: available + 1, available })
        );
    }

    #[test]
    fn explicit_cells_validated() {
        let g = grid(10, 10);
        // Corner.
        assert!(matches!(
            DoorRegistry::with_cells(&g, &[Cell::new(0, 0)]).err(),
            Some(GridError::BadDoorCell(_))
        ));
        // Interior.
        assert!(matches!(
            DoorRegistry::with_cells(&g, &[Cell::new(4, 4)]).err(),
            Some(GridError::BadDoorCell(_))
        ));
        // Duplicate.
        assert!(matches!(
            DoorRegistry::with_cells(&g, &[Cell::new(3, 0), Cell::new(3, 0)]).err(),
            Some(GridError::BadDoorCell(_))
        ));
    }

    #[test]
    fn exits_append_in_order() {
        let g = grid(10, 10);
        let registry =
            DoorRegistry::with_cells(&g, &[Cell::new(3, 0), Cell::new(0, 4)]).unwrap();

        registry.register_exit(DoorId(0), AgentId(5)).unwrap();
        registry.register_exit(DoorId(0), AgentId(2)).unwrap();

        let door = registry.get(DoorId(0)).unwrap();
        assert_eq!(door.exits(), 2);
        assert_eq!(door.evacuees(), vec![AgentId(5), AgentId(2)]);
        // The other door is untouched.
        assert_eq!(registry.get(DoorId(1)).unwrap().exits(), 0);

        assert_eq!(
            registry.register_exit(DoorId(9), AgentId(0)).err(),
            Some(GridError::UnknownDoor(DoorId(9)))
        );
    }

    #[test]
    fn concurrent_exits_through_one_door_all_land() {
        use std::sync::Arc;

        let g = grid(10, 10);
        let registry = Arc::new(DoorRegistry::with_cells(&g, &[Cell::new(3, 0)]).unwrap());

        let mut handles = Vec::new();
        for t in 0..8u32 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                for i in 0..25 {
                    registry.get(DoorId(0)).unwrap().register_exit(AgentId(t * 25 + i));
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let door = registry.get(DoorId(0)).unwrap();
        assert_eq!(door.exits(), 200);
        assert_eq!(door.evacuees().len(), 200);
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use super::*;
    use crate::nearest_exit;
    use egress_core::DoorId;

    #[test]
    fn straight_line_is_minimum_hops() {
        let g = grid(12, 10);
        let router = BfsRouter::default();
        // (2,4) → door at (0,4): hops (1,4), (0,4).
        let route = router.route(&g, Cell::new(2, 4), Cell::new(0, 4)).unwrap();
        assert_eq!(route.len(), 2);
        let mut route = route;
        assert_eq!(route.advance(), Some(Cell::new(1, 4)));
        assert_eq!(route.advance(), Some(Cell::new(0, 4)));
        assert_eq!(route.advance(), None);
    }

    #[test]
    fn route_length_equals_manhattan_on_empty_grid() {
        let g = grid(12, 10);
        let router = BfsRouter::default();
        let from = Cell::new(2, 2);
        let to = Cell::new(8, 7);
        let route = router.route(&g, from, to).unwrap();
        assert_eq!(route.len() as u32, from.manhattan(to));
    }

    #[test]
    fn repeated_queries_are_identical() {
        let g = grid(12, 10);
        g.reserve(Cell::new(5, 5));
        g.reserve(Cell::new(6, 4));
        let router = BfsRouter::default();

        let first = router.route(&g, Cell::new(2, 2), Cell::new(10, 7));
        for _ in 0..10 {
            assert_eq!(router.route(&g, Cell::new(2, 2), Cell::new(10, 7)), first);
        }
    }

    #[test]
    fn detours_around_an_occupied_wall() {
        let g = grid(12, 10);
        // Vertical wall at x=5, y=1..=7 with a gap at y=8.
        for y in 1..8 {
            g.reserve(Cell::new(5, y));
        }
        let router = BfsRouter::default();
        let route = router.route(&g, Cell::new(3, 2), Cell::new(10, 2)).unwrap();

        // Must pass through the gap at (5, 8).
        let mut cells = Vec::new();
        let mut r = route.clone();
        while let Some(c) = r.advance() {
            cells.push(c);
        }
        assert!(cells.contains(&Cell::new(5, 8)));
        // Shortest detour: to the gap (8 hops) and onward to the goal (11).
        assert_eq!(route.len(), 19);
    }

    #[test]
    fn same_cell_and_unreachable_yield_none() {
        let g = grid(10, 10);
        let router = BfsRouter::default();
        assert!(router.route(&g, Cell::new(3, 3), Cell::new(3, 3)).is_none());

        // Seal (3,3) in completely.
        for n in Cell::new(3, 3).neighbors() {
            g.reserve(n);
        }
        assert!(router.route(&g, Cell::new(3, 3), Cell::new(7, 0)).is_none());
    }

    #[test]
    fn exhausted_budget_yields_none() {
        let g = grid(40, 40);
        let router = BfsRouter { expansion_budget: 3 };
        assert!(router.route(&g, Cell::new(1, 1), Cell::new(38, 38)).is_none());
    }

    #[test]
    fn route_ends_at_destination_and_excludes_start() {
        let g = grid(12, 10);
        let router = BfsRouter::default();
        let from = Cell::new(4, 4);
        let to = Cell::new(8, 0);
        let mut route = router.route(&g, from, to).unwrap();

        let mut previous = from;
        let mut last = from;
        while let Some(c) = route.advance() {
            assert_ne!(c, from);
            assert_eq!(previous.manhattan(c), 1, "non-adjacent hop");
            previous = c;
            last = c;
        }
        assert_eq!(last, to);
    }

    #[test]
    fn nearest_exit_prefers_shortest_then_registry_order() {
        let g = grid(12, 10);
        let doors = DoorRegistry::with_cells(
            &g,
            &[Cell::new(1, 0), Cell::new(11, 5), Cell::new(5, 9)],
        )
        .unwrap();
        let router = BfsRouter::default();

        // (2,2) is closest to door 0 at (1,0).
        let (id, route) = nearest_exit(&router, &g, &doors, Cell::new(2, 2)).unwrap();
        assert_eq!(id, DoorId(0));
        assert_eq!(route.len() as u32, Cell::new(2, 2).manhattan(Cell::new(1, 0)));

        // Equidistant from doors 0 and 1 → the earlier door wins.
        let g2 = grid(12, 10);
        let doors2 =
            DoorRegistry::with_cells(&g2, &[Cell::new(4, 0), Cell::new(6, 0)]).unwrap();
        let probe = Cell::new(5, 2); // 3 hops to either door
        let (id, route) = nearest_exit(&router, &g2, &doors2, probe).unwrap();
        assert_eq!(id, DoorId(0));
        assert_eq!(route.len(), 3);
    }

    #[test]
    fn nearest_exit_none_when_sealed_in() {
        let g = grid(12, 8);
        let doors = DoorRegistry::with_cells(
            &g,
            &[Cell::new(6, 0), Cell::new(11, 3), Cell::new(6, 7)],
        )
        .unwrap();
        // Seal a pocket around (2,2).
        for n in Cell::new(2, 2).neighbors() {
            g.reserve(n);
        }
        let router = BfsRouter::default();
        assert!(nearest_exit(&router, &g, &doors, Cell::new(2, 2)).is_none());
    }
}
