//! Board topology and per-seat paths.
//!
//! Both are pure builders: given the ordered roster they always produce the
//! same cells and routes. `Board` bundles them so the engine can regenerate
//! everything in one step whenever the roster changes.

pub mod topology;
pub mod path;

pub use path::{canonical_ring, path_for_seat, Path, HOME_LANE_LEN, LAP_LEN, RING_LEN, ROUTE_LEN};
pub use topology::{build_cells, get_cell, yard_quadrant, Cell, CellKind, ENTRY_CELLS, HOME_CELLS, SAFE_CELLS};

use im::Vector;

use crate::core::{Coord, Player, PlayerId, Seat, SeatMap};

/// Cells plus one route per occupied seat.
#[derive(Clone, Debug)]
pub struct Board {
    cells: Vector<Cell>,
    paths: SeatMap<Path>,
}

impl Board {
    /// Build the board for an ordered roster of at most four players.
    #[must_use]
    pub fn new(players: &[Player]) -> Self {
        Self {
            cells: build_cells(players).into_iter().collect(),
            paths: SeatMap::new(players.len(), Path::for_seat),
        }
    }

    #[must_use]
    pub fn cells(&self) -> &Vector<Cell> {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, at: Coord) -> Option<&Cell> {
        self.cells.get(at.cell_index()?)
    }

    /// Route for an occupied seat.
    #[must_use]
    pub fn path(&self, seat: Seat) -> Option<&Path> {
        self.paths.get(seat)
    }

    /// Yard slot indices owned by `player`, ascending and deduplicated.
    #[must_use]
    pub fn yard_slots(&self, player: &PlayerId) -> Vec<u8> {
        let mut slots: Vec<u8> = self
            .cells
            .iter()
            .filter(|c| c.kind == CellKind::Yard && c.owner.as_ref() == Some(player))
            .filter_map(|c| c.yard_index)
            .collect();
        slots.sort_unstable();
        slots.dedup();
        slots
    }
}
