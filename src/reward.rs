//! Pluggable reward functions.

use crate::board::VisibleBoard;
use crate::common::Outcome;

/// Maps a step event to a scalar reward.
///
/// `board` is the visible board after the step's mutation has been applied.
pub trait RewardFn {
    fn evaluate(&self, board: &VisibleBoard, row: usize, col: usize, outcome: Outcome) -> f64;
}

impl<F> RewardFn for F
where
    F: Fn(&VisibleBoard, usize, usize, Outcome) -> f64,
{
    fn evaluate(&self, board: &VisibleBoard, row: usize, col: usize, outcome: Outcome) -> f64 {
        self(board, row, col, outcome)
    }
}

/// Same reward for every outcome. The default of `-1.0` penalises each
/// step, so fewer steps means a higher return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantReward(pub f64);

impl Default for ConstantReward {
    fn default() -> Self {
        ConstantReward(-1.0)
    }
}

impl RewardFn for ConstantReward {
    fn evaluate(&self, _board: &VisibleBoard, _row: usize, _col: usize, _outcome: Outcome) -> f64 {
        self.0
    }
}

/// Separate reward per outcome.
///
/// With positive hits and negative misses, diffusion pulls the heuristic
/// towards hits and away from open water. Values of zero make a targeted
/// cell indistinguishable from an untargeted one to the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapedReward {
    pub redundant: f64,
    pub miss: f64,
    pub hit: f64,
    pub sunk: f64,
    pub all_sunk: f64,
}

impl Default for ShapedReward {
    fn default() -> Self {
        ShapedReward {
            redundant: -5.0,
            miss: -1.0,
            hit: 4.0,
            sunk: -0.5,
            all_sunk: 10.0,
        }
    }
}

impl RewardFn for ShapedReward {
    fn evaluate(&self, _board: &VisibleBoard, _row: usize, _col: usize, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Redundant => self.redundant,
            Outcome::Miss => self.miss,
            Outcome::Hit => self.hit,
            Outcome::Sunk => self.sunk,
            Outcome::AllSunk => self.all_sunk,
        }
    }
}
