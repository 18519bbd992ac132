use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::{
    bitgrid::BitGrid,
    board::VisibleBoard,
    common::{EnvError, Outcome},
    diffusion::{select_max, DiffusionSolver},
    env::StepResult,
};

/// Interface implemented by target-selection strategies.
pub trait Policy {
    /// Short identifier used in reports.
    fn name(&self) -> &'static str;

    /// Forget everything and prepare for a fresh `grid_size×grid_size` board.
    fn reset(&mut self, grid_size: usize);

    /// Choose the next action index (`row * grid_size + col`).
    fn select_action(&mut self, rng: &mut SmallRng) -> Result<usize, EnvError>;

    /// Inform the policy of the result of its last action.
    fn observe(&mut self, action: usize, step: &StepResult) -> Result<(), EnvError>;
}

/// Uniform choice among the cells that are still `Unknown`.
pub fn random_unknown<R: Rng + ?Sized>(board: &VisibleBoard, rng: &mut R) -> Result<usize, EnvError> {
    let candidates = board.unknown_cells();
    if candidates.is_empty() {
        return Err(EnvError::NoTargetsLeft);
    }
    let (r, c) = candidates[rng.random_range(0..candidates.len())];
    Ok(r * board.size() + c)
}

/// Fires at a uniformly random untried cell every turn.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    observation: VisibleBoard,
}

impl RandomPolicy {
    pub fn new(grid_size: usize) -> Self {
        Self {
            observation: VisibleBoard::new(grid_size),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn reset(&mut self, grid_size: usize) {
        self.observation = VisibleBoard::new(grid_size);
    }

    fn select_action(&mut self, rng: &mut SmallRng) -> Result<usize, EnvError> {
        random_unknown(&self.observation, rng)
    }

    fn observe(&mut self, _action: usize, step: &StepResult) -> Result<(), EnvError> {
        self.observation = step.observation.clone();
        Ok(())
    }
}

/// Heuristic policy driven by the diffusion solver.
///
/// The targeted cells, the reward seen at each of them and the latest
/// observation live in three separate containers, each updated after every
/// step.
#[derive(Debug, Clone)]
pub struct DiffusionPolicy {
    solver: DiffusionSolver,
    bombed: BitGrid,
    known_rewards: Array2<f64>,
    observation: VisibleBoard,
}

impl DiffusionPolicy {
    pub fn new(grid_size: usize, solver: DiffusionSolver) -> Self {
        Self {
            solver,
            bombed: BitGrid::new(grid_size),
            known_rewards: Array2::zeros((grid_size, grid_size)),
            observation: VisibleBoard::new(grid_size),
        }
    }

    /// Current utility grid, as the next `select_action` would see it.
    pub fn utility(&self) -> Result<Array2<f64>, EnvError> {
        self.solver.compute_utility(&self.bombed, &self.known_rewards)
    }

    pub fn bombed(&self) -> &BitGrid {
        &self.bombed
    }

    pub fn known_rewards(&self) -> &Array2<f64> {
        &self.known_rewards
    }
}

impl Policy for DiffusionPolicy {
    fn name(&self) -> &'static str {
        "diffusion"
    }

    fn reset(&mut self, grid_size: usize) {
        *self = Self::new(grid_size, self.solver);
    }

    fn select_action(&mut self, rng: &mut SmallRng) -> Result<usize, EnvError> {
        // nothing to diffuse from on the opening move
        if self.bombed.is_empty() {
            return random_unknown(&self.observation, rng);
        }
        let utility = self.utility()?;
        let (r, c) = select_max(&utility, rng).ok_or(EnvError::NoTargetsLeft)?;
        Ok(r * self.bombed.size() + c)
    }

    fn observe(&mut self, action: usize, step: &StepResult) -> Result<(), EnvError> {
        let n = self.bombed.size();
        let (r, c) = (action / n, action % n);
        self.bombed.set(r, c)?;
        // a redundant step says nothing new about the cell
        if matches!(step.info.outcome, Some(o) if o != Outcome::Redundant) {
            self.known_rewards[(r, c)] = step.reward;
        }
        self.observation = step.observation.clone();
        Ok(())
    }
}
