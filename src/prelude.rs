//! Commonly used types and utilities for ease of import.

pub use crate::{
    compute_utility, select_max, BattleshipEnv, CellState, DiffusionPolicy, DiffusionSolver, EnvConfig,
    EnvError, Outcome, Policy, RandomPolicy, RewardFn, StepResult, VisibleBoard,
};
