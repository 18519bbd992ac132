//! A placed ship, with its cells and hits tracked in `BitGrid`s.

use core::fmt;

use crate::bitgrid::BitGrid;
use crate::common::EnvError;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `i` of a ship starting at (`row`, `col`).
    #[inline]
    pub fn offset(self, row: usize, col: usize, i: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        }
    }
}

/// A ship placed on an N×N grid.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    size: usize,
    orientation: Orientation,
    row: usize,
    col: usize,
    mask: BitGrid,
    hits: BitGrid,
    sunk: bool,
}

impl Ship {
    /// Place a ship of `size` cells at (`row`, `col`) with `orientation` on a
    /// `grid_size×grid_size` grid.
    pub fn new(
        size: usize,
        orientation: Orientation,
        row: usize,
        col: usize,
        grid_size: usize,
    ) -> Result<Self, EnvError> {
        let fits_from = |start: usize| start.checked_add(size).is_some_and(|end| end <= grid_size);
        let fits = match orientation {
            Orientation::Horizontal => row < grid_size && fits_from(col),
            Orientation::Vertical => col < grid_size && fits_from(row),
        };
        if size == 0 || !fits {
            return Err(EnvError::ShipOutOfBounds);
        }

        let mask = BitGrid::from_iter(grid_size, (0..size).map(|i| orientation.offset(row, col, i)))?;
        Ok(Ship {
            size,
            orientation,
            row,
            col,
            mask,
            hits: BitGrid::new(grid_size),
            sunk: false,
        })
    }

    /// Record a hit at (`row`, `col`).
    ///
    /// Hitting an already-hit cell changes nothing. The caller guarantees the
    /// cell belongs to this ship.
    pub fn register_hit(&mut self, row: usize, col: usize) {
        debug_assert!(self.covers(row, col));
        if self.hits.get(row, col).unwrap_or(true) {
            return;
        }
        let _ = self.hits.set(row, col);
        self.sunk = self.hit_count() == self.size;
    }

    /// Forget every hit, leaving the ship afloat at the same position.
    pub fn clear_hits(&mut self) {
        self.hits.clear_all();
        self.sunk = false;
    }

    /// Returns true if the ship occupies (`row`, `col`).
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.mask.get(row, col).unwrap_or(false)
    }

    pub fn is_hit(&self, row: usize, col: usize) -> bool {
        self.hits.get(row, col).unwrap_or(false)
    }

    pub fn hit_count(&self) -> usize {
        self.hits.count_ones()
    }

    /// True once every cell has been hit.
    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Origin of the ship (row, col).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> &BitGrid {
        &self.mask
    }

    /// Covered cells, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mask.iter_set_bits()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ size: {}, origin: ({}, {}), orientation: {:?}, hits: {}, sunk: {} }}",
            self.size,
            self.row,
            self.col,
            self.orientation,
            self.hit_count(),
            self.sunk,
        )
    }
}
