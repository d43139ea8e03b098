//! Per-seat routes around the board.
//!
//! All seats share one 52-cell ring: the two outer lanes of each arm of the
//! cross plus the arm's tip cell. A seat's route is the ring rotated to
//! start at the seat's entry cell, cut off at the tip of the seat's own arm,
//! followed by the seat's private home lane and finally its home cell.
//!
//! ```text
//! entry ─► 50 shared ring cells ─► 5 home-lane cells ─► home cell
//! ```
//!
//! Landing exactly on the last step finishes the token; there is no bounce.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::topology::HOME_CELLS;
use crate::core::{Coord, Seat};

/// Cells in the shared ring.
pub const RING_LEN: usize = 52;

/// Ring cells a token travels before turning into its home lane.
pub const LAP_LEN: usize = 50;

/// Private cells between the ring and the home cell.
pub const HOME_LANE_LEN: usize = 5;

/// Steps in a full route, home cell included.
pub const ROUTE_LEN: usize = LAP_LEN + HOME_LANE_LEN + 1;

/// Index into the canonical ring of each seat's entry cell.
const SEAT_OFFSETS: [usize; 4] = [2, 41, 28, 15];

/// Seat 0's home lane; other seats use quarter-turn rotations of it.
const HOME_LANE: [Coord; HOME_LANE_LEN] = [
    Coord::new(7, 1),
    Coord::new(7, 2),
    Coord::new(7, 3),
    Coord::new(7, 4),
    Coord::new(7, 5),
];

/// The shared ring in travel order, starting at the top arm's left tip.
///
/// Built arm by arm; consecutive segments share their corner cell, and the
/// duplicates are dropped.
#[must_use]
pub fn canonical_ring() -> Vec<Coord> {
    let mut naive: Vec<Coord> = Vec::with_capacity(64);

    // Top arm, left lane, heading to the center.
    naive.extend((0..=5).map(|y| Coord::new(6, y)));
    // Left arm, upper lane, heading out.
    naive.extend((0..=5).rev().map(|x| Coord::new(x, 6)));
    naive.extend((6..=8).map(|y| Coord::new(0, y)));
    // Left arm, lower lane, heading in.
    naive.extend((0..=5).map(|x| Coord::new(x, 8)));
    // Bottom arm.
    naive.extend((9..=14).map(|y| Coord::new(6, y)));
    naive.extend((6..=8).map(|x| Coord::new(x, 14)));
    naive.extend((9..=14).rev().map(|y| Coord::new(8, y)));
    // Right arm.
    naive.extend((9..=14).map(|x| Coord::new(x, 8)));
    naive.extend((6..=8).rev().map(|y| Coord::new(14, y)));
    naive.extend((9..=14).rev().map(|x| Coord::new(x, 6)));
    // Top arm, right lane, back to the tip.
    naive.extend((0..=5).rev().map(|y| Coord::new(8, y)));
    naive.extend((6..=8).rev().map(|x| Coord::new(x, 0)));

    dedup_in_order(naive)
}

fn dedup_in_order(coords: impl IntoIterator<Item = Coord>) -> Vec<Coord> {
    let mut seen = FxHashSet::default();
    coords.into_iter().filter(|c| seen.insert(*c)).collect()
}

/// A seat's full route, from entry cell to home cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    seat: Seat,
    steps: Vec<Coord>,
}

impl Path {
    /// Generate the route for `seat`. Seats beyond the fourth wrap around.
    #[must_use]
    pub fn for_seat(seat: Seat) -> Self {
        let turns = seat.index() % SEAT_OFFSETS.len();
        let offset = SEAT_OFFSETS[turns];
        let ring = canonical_ring();

        let lap = ring.iter().cycle().skip(offset).take(LAP_LEN).copied();
        let lane = HOME_LANE.iter().map(|c| c.rotate(turns));
        // Home cells keep the board's fixed seat order rather than the lane
        // rotation, so seat 3's last step jumps from (5,7) across the center
        // to (8,8).
        let home = std::iter::once(HOME_CELLS[turns]);

        Self {
            seat,
            steps: dedup_in_order(lap.chain(lane).chain(home)),
        }
    }

    #[must_use]
    pub fn seat(&self) -> Seat {
        self.seat
    }

    #[must_use]
    pub fn steps(&self) -> &[Coord] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Coord> {
        self.steps.get(index).copied()
    }

    /// Where tokens leaving the yard land.
    #[must_use]
    pub fn entry(&self) -> Option<Coord> {
        self.steps.first().copied()
    }

    /// The final step. Reaching it finishes the token.
    #[must_use]
    pub fn home(&self) -> Option<Coord> {
        self.steps.last().copied()
    }

    /// The seat's private lane into home.
    #[must_use]
    pub fn home_lane(&self) -> &[Coord] {
        let end = self.steps.len().saturating_sub(1);
        &self.steps[LAP_LEN.min(end)..end]
    }

    #[must_use]
    pub fn index_of(&self, at: Coord) -> Option<usize> {
        self.steps.iter().position(|&c| c == at)
    }

    #[must_use]
    pub fn is_home_step(&self, index: usize) -> bool {
        index + 1 == self.steps.len()
    }
}

/// Route for the player at `seat`.
#[must_use]
pub fn path_for_seat(seat: Seat) -> Path {
    Path::for_seat(seat)
}
