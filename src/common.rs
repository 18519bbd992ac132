//! Common types: cell states, step outcome tags and the environment error.

use core::fmt;
use thiserror::Error;

use crate::bitgrid::BitGridError;

/// State of one cell on the agent-visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CellState {
    /// Not targeted yet.
    #[default]
    Unknown = 0,
    /// Targeted, no ship there.
    Miss = 1,
    /// Targeted and hit a ship that is still afloat.
    Hit = 2,
    /// Part of a ship that has been sunk.
    SunkPart = 3,
}

impl CellState {
    /// Returns true for every state other than `Unknown`.
    pub const fn is_known(self) -> bool {
        !matches!(self, CellState::Unknown)
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> Self {
        state as u8
    }
}

impl TryFrom<u8> for CellState {
    type Error = EnvError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CellState::Unknown),
            1 => Ok(CellState::Miss),
            2 => Ok(CellState::Hit),
            3 => Ok(CellState::SunkPart),
            _ => Err(EnvError::InvalidConfig("cell state must be in 0..=3")),
        }
    }
}

/// Classification of a step's event, passed to the reward function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum Outcome {
    /// Target cell was already known.
    Redundant,
    /// Target hit a ship without sinking it.
    Hit,
    /// Target was open water.
    Miss,
    /// Target sank a ship.
    Sunk,
    /// Bonus event on the step that sinks the last ship.
    AllSunk,
}

impl Outcome {
    /// Tag string for this outcome.
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Redundant => "redundant",
            Outcome::Hit => "hit",
            Outcome::Miss => "miss",
            Outcome::Sunk => "sunk",
            Outcome::AllSunk => "all_sunk",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by environment, board and solver operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// Action index is outside `[0, grid_size²)`.
    #[error("action {action} is outside the action space [0, {limit})")]
    InvalidAction { action: usize, limit: usize },
    /// A ship could not be placed within the retry bound.
    #[error("unable to place ship of size {size} after {attempts} attempts")]
    InfeasiblePlacement { size: usize, attempts: usize },
    /// Configuration values are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Two grids that must share a shape do not.
    #[error("grid shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Ship placement is out of bounds.
    #[error("ship placement is out of bounds")]
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    #[error("ship placement overlaps with another ship")]
    ShipOverlaps,
    /// A policy was asked for an action with no untried cell left.
    #[error("no untried target cells remain")]
    NoTargetsLeft,
    /// Underlying bit grid error.
    #[error(transparent)]
    BitGrid(#[from] BitGridError),
}
