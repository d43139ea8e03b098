//! Board topology and path properties.
//!
//! These tests check the layout invariants for every roster size and the
//! shape of every seat's route.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use rust_ludo::board::{
    build_cells, canonical_ring, get_cell, path_for_seat, Board, CellKind, ENTRY_CELLS, HOME_CELLS, LAP_LEN,
    ROUTE_LEN,
};
use rust_ludo::core::{Coord, Player, PlayerId, Seat};

fn roster(count: usize) -> Vec<Player> {
    (1..=count)
        .map(|i| Player::new(PlayerId::numbered(i), format!("Player {i}"), "#000000"))
        .collect()
}

proptest! {
    #[test]
    fn prop_cell_counts(count in 1usize..=4) {
        let cells = build_cells(&roster(count));

        prop_assert_eq!(cells.len(), 225);

        let quadrants: FxHashSet<_> = cells
            .iter()
            .filter(|c| c.kind == CellKind::Yard)
            .filter_map(|c| c.owner.clone())
            .collect();
        prop_assert_eq!(quadrants.len(), 4);

        let owned_homes = cells
            .iter()
            .filter(|c| c.kind == CellKind::Home && c.owner.is_some())
            .count();
        prop_assert_eq!(owned_homes, 4);

        prop_assert_eq!(cells.iter().filter(|c| c.safe).count(), 26);
    }

    #[test]
    fn prop_layout_depends_only_on_order(count in 1usize..=4) {
        prop_assert_eq!(build_cells(&roster(count)), build_cells(&roster(count)));
    }

    #[test]
    fn prop_yard_slots_are_row_major(count in 1usize..=4, seat in 0u8..4) {
        let cells = build_cells(&roster(count));
        let owner = cells
            .iter()
            .find(|c| c.entry && c.at == ENTRY_CELLS[seat as usize])
            .and_then(|c| c.owner.clone());
        prop_assert!(owner.is_some());

        let slots: Vec<(Coord, u8)> = cells
            .iter()
            .filter(|c| c.owner == owner && c.kind == CellKind::Yard)
            .filter_map(|c| c.yard_index.map(|i| (c.at, i)))
            .collect();
        prop_assert_eq!(slots.len(), 4);
        prop_assert_eq!(slots.iter().map(|(_, i)| *i).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }
}

#[test]
fn test_unfilled_seats_get_placeholder_owners() {
    let cells = build_cells(&roster(1));

    let home = get_cell(&cells, HOME_CELLS[3]).unwrap();
    assert_eq!(home.owner, Some(PlayerId::placeholder(Seat::new(3))));

    let entry = get_cell(&cells, ENTRY_CELLS[0]).unwrap();
    assert!(entry.entry);
    assert!(entry.safe);
    assert_eq!(entry.owner, Some(PlayerId::numbered(1)));
}

#[test]
fn test_center_block_is_home() {
    let cells = build_cells(&roster(2));
    for y in 6..=8 {
        for x in 6..=8 {
            assert_eq!(get_cell(&cells, Coord::new(x, y)).unwrap().kind, CellKind::Home);
        }
    }
    assert!(get_cell(&cells, Coord::new(15, 0)).is_none());
}

#[test]
fn test_paths_are_duplicate_free() {
    for seat in Seat::all(4) {
        let path = path_for_seat(seat);
        assert!(!path.is_empty());
        assert_eq!(path.len(), ROUTE_LEN);

        let unique: FxHashSet<_> = path.steps().iter().collect();
        assert_eq!(unique.len(), path.len());
    }
}

#[test]
fn test_paths_cover_ring_except_own_tip() {
    let ring: FxHashSet<Coord> = canonical_ring().into_iter().collect();
    for seat in Seat::all(4) {
        let path = path_for_seat(seat);
        let lap: FxHashSet<Coord> = path.steps()[..LAP_LEN].iter().copied().collect();
        assert!(lap.is_subset(&ring));
        assert_eq!(ring.difference(&lap).count(), 2);
    }
}

#[test]
fn test_every_path_step_is_walkable() {
    let board = Board::new(&roster(4));
    for seat in Seat::all(4) {
        for at in board.path(seat).unwrap().steps() {
            let cell = board.cell(*at).unwrap();
            assert_ne!(cell.kind, CellKind::Yard, "{seat} route crosses a yard at {at}");
        }
    }
}
