//! Grid coordinates.

use serde::{Deserialize, Serialize};

/// Board side length in cells.
pub const GRID_SIZE: u8 = 15;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = GRID_SIZE as usize * GRID_SIZE as usize;

/// A cell position on the 15×15 grid. `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Check if the coordinate lies on the grid.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.x < GRID_SIZE && self.y < GRID_SIZE
    }

    /// Row-major index into a cell list, or `None` when off the grid.
    #[must_use]
    pub const fn cell_index(self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.y as usize * GRID_SIZE as usize + self.x as usize)
        } else {
            None
        }
    }

    /// Rotate a quarter turn clockwise about the board center.
    ///
    /// ```
    /// use rust_ludo::core::Coord;
    ///
    /// assert_eq!(Coord::new(6, 2).rotate_quarter(), Coord::new(12, 6));
    /// assert_eq!(Coord::new(7, 7).rotate_quarter(), Coord::new(7, 7));
    /// ```
    #[must_use]
    pub const fn rotate_quarter(self) -> Self {
        Self {
            x: GRID_SIZE - 1 - self.y,
            y: self.x,
        }
    }

    /// Rotate `turns` quarter turns clockwise.
    #[must_use]
    pub fn rotate(self, turns: usize) -> Self {
        (0..turns % 4).fold(self, |c, _| c.rotate_quarter())
    }
}

impl From<(u8, u8)> for Coord {
    fn from((x, y): (u8, u8)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_index() {
        assert_eq!(Coord::new(0, 0).cell_index(), Some(0));
        assert_eq!(Coord::new(14, 14).cell_index(), Some(CELL_COUNT - 1));
        assert_eq!(Coord::new(3, 1).cell_index(), Some(18));
        assert_eq!(Coord::new(15, 0).cell_index(), None);
    }

    #[test]
    fn test_full_rotation_is_identity() {
        let c = Coord::new(2, 8);
        assert_eq!(c.rotate(4), c);
        assert_eq!(c.rotate(2), Coord::new(12, 6));
    }
}
