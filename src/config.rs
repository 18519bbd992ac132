use alloc::vec::Vec;

use crate::common::EnvError;

pub const DEFAULT_GRID_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const FLEET: [usize; NUM_SHIPS] = [5, 4, 3, 3, 2];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Placement attempts allowed per ship before giving up.
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 1000;

/// Diffusion passes used by the heuristic solver.
pub const DIFFUSION_STEPS: usize = 10;

/// Session configuration for [`BattleshipEnv`](crate::BattleshipEnv).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvConfig {
    pub grid_size: usize,
    pub fleet: Vec<usize>,
    pub max_placement_attempts: usize,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            fleet: FLEET.to_vec(),
            max_placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
        }
    }
}

impl EnvConfig {
    /// Standard fleet on a grid of the given size.
    pub fn with_grid_size(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }

    /// Number of actions, `grid_size²`.
    pub fn action_space(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Sum of the fleet's ship sizes.
    pub fn fleet_cells(&self) -> usize {
        self.fleet.iter().sum()
    }

    /// Reject configurations that can never produce a board.
    ///
    /// Passing this check does not guarantee placement succeeds: a fleet
    /// that fits by cell count may still be too crowded for rejection
    /// sampling, which is what `max_placement_attempts` bounds.
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.grid_size == 0 {
            return Err(EnvError::InvalidConfig("grid size must be positive"));
        }
        let cells = self
            .grid_size
            .checked_mul(self.grid_size)
            .ok_or(EnvError::InvalidConfig("grid size is too large"))?;
        if self.fleet.is_empty() {
            return Err(EnvError::InvalidConfig("fleet must contain at least one ship"));
        }
        if self.fleet.iter().any(|&len| len == 0) {
            return Err(EnvError::InvalidConfig("ship sizes must be positive"));
        }
        if self.fleet.iter().any(|&len| len > self.grid_size) {
            return Err(EnvError::InvalidConfig("ship is longer than the grid"));
        }
        let fleet_cells = self.fleet.iter().try_fold(0usize, |acc, &len| acc.checked_add(len));
        if fleet_cells.map_or(true, |total| total > cells) {
            return Err(EnvError::InvalidConfig("fleet has more cells than the grid"));
        }
        if self.max_placement_attempts == 0 {
            return Err(EnvError::InvalidConfig("placement attempts must be positive"));
        }
        Ok(())
    }
}
