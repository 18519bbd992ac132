//! Hidden truth board (ship placement) and the agent-visible board.

use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;

use crate::bitgrid::BitGrid;
use crate::common::{CellState, EnvError};
use crate::config::EnvConfig;
use crate::ship::{Orientation, Ship};

/// Ground-truth occupancy grid plus the ships that fill it.
///
/// Every occupied cell belongs to exactly one ship.
#[derive(Clone, PartialEq, Eq)]
pub struct HiddenBoard {
    size: usize,
    occupancy: BitGrid,
    ships: Vec<Ship>,
}

impl HiddenBoard {
    /// Create an empty board (no ships placed).
    pub fn new(size: usize) -> Self {
        HiddenBoard {
            size,
            occupancy: BitGrid::new(size),
            ships: Vec::new(),
        }
    }

    /// Randomly place the configured fleet, in fleet order.
    ///
    /// Each ship gets at most `config.max_placement_attempts` tries; running
    /// out reports [`EnvError::InfeasiblePlacement`] instead of looping.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &EnvConfig) -> Result<Self, EnvError> {
        config.validate()?;
        let mut board = HiddenBoard::new(config.grid_size);
        for &size in &config.fleet {
            let (r, c, orient) = board.random_placement(rng, size, config.max_placement_attempts)?;
            board.place(size, r, c, orient)?;
        }
        Ok(board)
    }

    /// Place a ship of `size` at (row, col) and orientation. Returns its index.
    pub fn place(
        &mut self,
        size: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<usize, EnvError> {
        let ship = Ship::new(size, orientation, row, col, self.size)?;
        if self.occupancy.intersects(ship.mask())? {
            return Err(EnvError::ShipOverlaps);
        }
        self.occupancy.union_with(ship.mask())?;
        self.ships.push(ship);
        Ok(self.ships.len() - 1)
    }

    /// Returns a random non-overlapping (row, col, Orientation) for a ship of
    /// `size`, trying at most `max_attempts` candidates.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        size: usize,
        max_attempts: usize,
    ) -> Result<(usize, usize, Orientation), EnvError> {
        if size == 0 || size > self.size {
            return Err(EnvError::ShipOutOfBounds);
        }
        for _ in 0..max_attempts {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (self.size - 1, self.size - size),
                Orientation::Vertical => (self.size - size, self.size - 1),
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            let free = (0..size).all(|i| {
                let (rr, cc) = orient.offset(r, c, i);
                !self.is_occupied(rr, cc)
            });
            if free {
                return Ok((r, c, orient));
            }
        }
        log::warn!("giving up placing ship of size {} after {} attempts", size, max_attempts);
        Err(EnvError::InfeasiblePlacement {
            size,
            attempts: max_attempts,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub(crate) fn ship_mut(&mut self, index: usize) -> Option<&mut Ship> {
        self.ships.get_mut(index)
    }

    /// Board occupancy mask of all ships.
    pub fn occupancy(&self) -> &BitGrid {
        &self.occupancy
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.occupancy.get(row, col).unwrap_or(false)
    }

    pub fn occupied_count(&self) -> usize {
        self.occupancy.count_ones()
    }

    /// Index of the ship covering (row, col), if any.
    pub fn ship_at(&self, row: usize, col: usize) -> Option<usize> {
        self.ships.iter().position(|s| s.covers(row, col))
    }

    /// Clear the hits on every ship, keeping the placement.
    pub fn clear_hits(&mut self) {
        self.ships.iter_mut().for_each(Ship::clear_hits);
    }

    pub fn sunk_count(&self) -> usize {
        self.ships.iter().filter(|s| s.is_sunk()).count()
    }
}

impl fmt::Debug for HiddenBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "HiddenBoard {{\n  occupancy:\n{},\n  ships: {:?}\n}}",
            self.occupancy, self.ships
        )
    }
}

/// The only board a policy observes.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "Vec<Vec<u8>>", try_from = "Vec<Vec<u8>>")
)]
pub struct VisibleBoard {
    cells: Array2<CellState>,
}

impl VisibleBoard {
    /// All-`Unknown` board.
    pub fn new(size: usize) -> Self {
        VisibleBoard {
            cells: Array2::from_elem((size, size), CellState::Unknown),
        }
    }

    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    /// State at (row, col); out-of-range cells read as `None`.
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get((row, col)).copied()
    }

    pub fn is_unknown(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(CellState::Unknown))
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, state: CellState) {
        self.cells[(row, col)] = state;
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// Coordinates of every `Unknown` cell, row-major.
    pub fn unknown_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .indexed_iter()
            .filter(|(_, s)| !s.is_known())
            .map(|(rc, _)| rc)
            .collect()
    }

    /// Integer matrix view: 0=Unknown, 1=Miss, 2=Hit, 3=SunkPart.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&s| u8::from(s)).collect())
            .collect()
    }

    pub fn cells(&self) -> &Array2<CellState> {
        &self.cells
    }
}

impl Index<(usize, usize)> for VisibleBoard {
    type Output = CellState;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.cells[index]
    }
}

impl From<VisibleBoard> for Vec<Vec<u8>> {
    fn from(board: VisibleBoard) -> Self {
        board.to_matrix()
    }
}

impl TryFrom<Vec<Vec<u8>>> for VisibleBoard {
    type Error = EnvError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        let n = rows.len();
        let mut board = VisibleBoard::new(n);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(EnvError::ShapeMismatch {
                    left: (n, n),
                    right: (n, row.len()),
                });
            }
            for (c, &v) in row.iter().enumerate() {
                board.set(r, c, CellState::try_from(v)?);
            }
        }
        Ok(board)
    }
}

impl fmt::Debug for VisibleBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VisibleBoard:")?;
        write!(f, "{}", self)
    }
}

impl fmt::Display for VisibleBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        for r in 0..n {
            for c in 0..n {
                let ch = match self.cells[(r, c)] {
                    CellState::Unknown => '.',
                    CellState::Miss => 'o',
                    CellState::Hit => 'X',
                    CellState::SunkPart => '#',
                };
                write!(f, "{} ", ch)?;
            }
            if r + 1 < n {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
