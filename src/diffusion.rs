// Utility estimation for the heuristic policy.
// Rewards observed at targeted cells spread through untargeted neighbours by
// repeated local averaging; the result ranks where to fire next.

use alloc::vec::Vec;
use ndarray::Array2;
use rand::Rng;

use crate::{bitgrid::BitGrid, common::EnvError, config::DIFFUSION_STEPS};

/// Utility assigned to cells that already produced a reward.
pub const EXCLUDED_UTILITY: f64 = f64::NEG_INFINITY;

const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Fixed-iteration diffusion over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffusionSolver {
    pub iterations: usize,
}

impl Default for DiffusionSolver {
    fn default() -> Self {
        Self {
            iterations: DIFFUSION_STEPS,
        }
    }
}

impl DiffusionSolver {
    pub const fn new(iterations: usize) -> Self {
        Self { iterations }
    }

    /// Compute the utility grid from the targeted cells and the rewards
    /// observed there (0 elsewhere).
    ///
    /// Each pass replaces every untargeted cell with the mean of its in-bounds
    /// 4-neighbours from the previous pass; targeted cells hold their value.
    /// After the last pass, every cell with a nonzero observed reward is set
    /// to [`EXCLUDED_UTILITY`]. There is no convergence check.
    pub fn compute_utility(
        &self,
        bombed: &BitGrid,
        known_rewards: &Array2<f64>,
    ) -> Result<Array2<f64>, EnvError> {
        let n = bombed.size();
        if known_rewards.dim() != (n, n) {
            return Err(EnvError::ShapeMismatch {
                left: (n, n),
                right: known_rewards.dim(),
            });
        }

        let mut util = known_rewards.clone();
        for _ in 0..self.iterations {
            let mut next = util.clone();
            for r in 0..n {
                for c in 0..n {
                    if bombed.get(r, c)? {
                        continue;
                    }
                    let mut sum = 0.0;
                    let mut count = 0usize;
                    for (rr, cc) in neighbours(r, c, n) {
                        sum += util[(rr, cc)];
                        count += 1;
                    }
                    if count > 0 {
                        next[(r, c)] = sum / count as f64;
                    }
                }
            }
            util = next;
        }

        for ((r, c), &reward) in known_rewards.indexed_iter() {
            if reward != 0.0 {
                util[(r, c)] = EXCLUDED_UTILITY;
            }
        }
        Ok(util)
    }
}

/// [`DiffusionSolver::compute_utility`] with the default iteration count.
pub fn compute_utility(bombed: &BitGrid, known_rewards: &Array2<f64>) -> Result<Array2<f64>, EnvError> {
    DiffusionSolver::default().compute_utility(bombed, known_rewards)
}

/// Pick uniformly at random among the cells holding the grid's maximum.
///
/// NaN entries are ignored. Returns `None` for an empty grid.
pub fn select_max<R: Rng + ?Sized>(utility: &Array2<f64>, rng: &mut R) -> Option<(usize, usize)> {
    let max = utility
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))?;
    let ties: Vec<(usize, usize)> = utility
        .indexed_iter()
        .filter(|(_, v)| **v == max)
        .map(|(rc, _)| rc)
        .collect();
    if ties.is_empty() {
        return None;
    }
    Some(ties[rng.random_range(0..ties.len())])
}

fn neighbours(row: usize, col: usize, n: usize) -> impl Iterator<Item = (usize, usize)> {
    NEIGHBOURS.iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < n && c < n).then_some((r, c))
    })
}
