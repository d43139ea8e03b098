//! Static cell layout of the 15×15 board.
//!
//! The layout is a total function of the ordered player list: seats fix
//! which corner quadrant, home cell and entry cell a player owns. Seats
//! without a player still get a full quadrant owned by a placeholder id so
//! the board always renders the same shape.

use serde::{Deserialize, Serialize};

use crate::core::{Coord, Player, PlayerId, Seat, CELL_COUNT, GRID_SIZE, MAX_SEATS};

/// What a cell is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Yard,
    Track,
    Home,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub at: Coord,
    pub kind: CellKind,
    pub owner: Option<PlayerId>,
    /// Tokens here cannot be captured.
    pub safe: bool,
    /// Parking slot (0..=3) inside a yard.
    pub yard_index: Option<u8>,
    /// First track cell for the owner's tokens.
    pub entry: bool,
}

/// Each seat's personal home cell inside the central block.
pub const HOME_CELLS: [Coord; MAX_SEATS] = [
    Coord::new(6, 6),
    Coord::new(8, 6),
    Coord::new(6, 8),
    Coord::new(8, 8),
];

/// Entry cells, top / right / bottom / left by seat.
pub const ENTRY_CELLS: [Coord; MAX_SEATS] = [
    Coord::new(6, 2),
    Coord::new(12, 6),
    Coord::new(8, 12),
    Coord::new(2, 8),
];

/// Top-left corner of each seat's 2×2 block of parking slots.
const YARD_SLOT_ORIGINS: [Coord; MAX_SEATS] = [
    Coord::new(1, 1),
    Coord::new(10, 1),
    Coord::new(1, 10),
    Coord::new(10, 10),
];

/// Capture-immune cells.
pub const SAFE_CELLS: [Coord; 26] = [
    Coord::new(1, 6),
    Coord::new(2, 6),
    Coord::new(3, 6),
    Coord::new(4, 6),
    Coord::new(5, 6),
    Coord::new(6, 1),
    Coord::new(6, 2),
    Coord::new(6, 3),
    Coord::new(6, 4),
    Coord::new(6, 5),
    Coord::new(13, 8),
    Coord::new(12, 8),
    Coord::new(11, 8),
    Coord::new(10, 8),
    Coord::new(9, 8),
    Coord::new(8, 13),
    Coord::new(8, 12),
    Coord::new(8, 11),
    Coord::new(8, 10),
    Coord::new(8, 9),
    Coord::new(6, 8),
    Coord::new(8, 6),
    Coord::new(7, 1),
    Coord::new(13, 7),
    Coord::new(7, 13),
    Coord::new(1, 7),
];

/// Which seat's yard quadrant contains `at`, if any.
#[must_use]
pub fn yard_quadrant(at: Coord) -> Option<Seat> {
    let left = at.x < 6;
    let right = at.x > 8;
    let top = at.y < 6;
    let bottom = at.y > 8;

    match (left, right, top, bottom) {
        (true, _, true, _) => Some(Seat::new(0)),
        (_, true, true, _) => Some(Seat::new(1)),
        (true, _, _, true) => Some(Seat::new(2)),
        (_, true, _, true) => Some(Seat::new(3)),
        _ => None,
    }
}

/// Owner of a seat: the seated player, or the seat's placeholder.
fn seat_owner(players: &[Player], seat: Seat) -> PlayerId {
    players
        .get(seat.index())
        .map(|p| p.id.clone())
        .unwrap_or_else(|| PlayerId::placeholder(seat))
}

/// Build all 225 cells in row-major order.
///
/// Callers must pass at most four players with distinct ids.
#[must_use]
pub fn build_cells(players: &[Player]) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(CELL_COUNT);

    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let at = Coord::new(x, y);
            let (kind, owner) = match yard_quadrant(at) {
                Some(seat) => (CellKind::Yard, Some(seat_owner(players, seat))),
                None => (CellKind::Track, None),
            };
            cells.push(Cell {
                at,
                kind,
                owner,
                safe: false,
                yard_index: None,
                entry: false,
            });
        }
    }

    // Central 3x3 block.
    for y in 6..=8 {
        for x in 6..=8 {
            if let Some(cell) = cell_mut(&mut cells, Coord::new(x, y)) {
                cell.kind = CellKind::Home;
                cell.owner = None;
            }
        }
    }

    for seat in Seat::all(MAX_SEATS) {
        let owner = seat_owner(players, seat);

        if let Some(cell) = cell_mut(&mut cells, HOME_CELLS[seat.index()]) {
            cell.kind = CellKind::Home;
            cell.owner = Some(owner.clone());
        }

        let origin = YARD_SLOT_ORIGINS[seat.index()];
        for yy in 0..2u8 {
            for xx in 0..2u8 {
                let at = Coord::new(origin.x + xx, origin.y + yy);
                if let Some(cell) = cell_mut(&mut cells, at) {
                    if cell.kind == CellKind::Yard {
                        cell.yard_index = Some(yy * 2 + xx);
                        cell.owner = Some(owner.clone());
                    }
                }
            }
        }

        if let Some(cell) = cell_mut(&mut cells, ENTRY_CELLS[seat.index()]) {
            cell.entry = true;
            cell.owner = Some(owner);
        }
    }

    for at in SAFE_CELLS {
        if let Some(cell) = cell_mut(&mut cells, at) {
            cell.safe = true;
        }
    }

    cells
}

/// Look up a cell by coordinate in a row-major cell list.
#[must_use]
pub fn get_cell(cells: &[Cell], at: Coord) -> Option<&Cell> {
    cells.get(at.cell_index()?)
}

fn cell_mut(cells: &mut [Cell], at: Coord) -> Option<&mut Cell> {
    cells.get_mut(at.cell_index()?)
}
