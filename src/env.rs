use alloc::boxed::Box;
use alloc::string::String;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    board::{HiddenBoard, VisibleBoard},
    common::{CellState, EnvError, Outcome},
    config::EnvConfig,
    reward::{ConstantReward, RewardFn},
};

const ALL_SUNK_MESSAGE: &str = "Congratulations! All ships have been sunk.";
const GAME_OVER_MESSAGE: &str = "Game over. All ships have been sunk.";

/// Current status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Terminal,
}

/// Informational side channel of a step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct StepInfo {
    pub message: Option<String>,
    /// Primary event of the step; `None` once the session is terminal.
    pub outcome: Option<Outcome>,
}

/// Everything a step returns to the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct StepResult {
    pub observation: VisibleBoard,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// Single-player Battleship session.
///
/// A session owns its random source, so two environments built from the
/// same seed replay the same boards.
pub struct BattleshipEnv<R = SmallRng> {
    config: EnvConfig,
    rng: R,
    reward_fn: Box<dyn RewardFn + Send>,
    hidden: HiddenBoard,
    visible: VisibleBoard,
    sunk_count: usize,
    status: GameStatus,
    steps: usize,
}

impl BattleshipEnv<SmallRng> {
    /// Environment driven by a `SmallRng` seeded with `seed`.
    pub fn seeded(config: EnvConfig, seed: u64) -> Result<Self, EnvError> {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BattleshipEnv<R> {
    /// Create a session with the default reward function and a fresh board.
    pub fn new(config: EnvConfig, rng: R) -> Result<Self, EnvError> {
        Self::with_reward_fn(config, rng, ConstantReward::default())
    }

    /// Create a session that scores steps with `reward_fn`.
    pub fn with_reward_fn<F>(config: EnvConfig, mut rng: R, reward_fn: F) -> Result<Self, EnvError>
    where
        F: RewardFn + Send + 'static,
    {
        let hidden = HiddenBoard::generate(&mut rng, &config)?;
        Ok(Self::assemble(config, rng, Box::new(reward_fn), hidden))
    }

    /// Create a session over a prepared board instead of a random one.
    ///
    /// Hits already recorded on `hidden` are discarded, so the session starts
    /// with every ship afloat. Later calls to [`reset`](Self::reset) generate
    /// random boards as usual.
    pub fn from_hidden_board(config: EnvConfig, rng: R, mut hidden: HiddenBoard) -> Result<Self, EnvError> {
        config.validate()?;
        if hidden.size() != config.grid_size {
            return Err(EnvError::ShapeMismatch {
                left: (config.grid_size, config.grid_size),
                right: (hidden.size(), hidden.size()),
            });
        }
        if hidden.ships().is_empty() {
            return Err(EnvError::InvalidConfig("board must contain at least one ship"));
        }
        hidden.clear_hits();
        Ok(Self::assemble(config, rng, Box::new(ConstantReward::default()), hidden))
    }

    fn assemble(config: EnvConfig, rng: R, reward_fn: Box<dyn RewardFn + Send>, hidden: HiddenBoard) -> Self {
        Self {
            visible: VisibleBoard::new(config.grid_size),
            config,
            rng,
            reward_fn,
            hidden,
            sunk_count: 0,
            status: GameStatus::InProgress,
            steps: 0,
        }
    }

    /// Replace the session's reward function.
    pub fn set_reward_fn<F>(&mut self, reward_fn: F)
    where
        F: RewardFn + Send + 'static,
    {
        self.reward_fn = Box::new(reward_fn);
    }

    /// Start a new session: new random fleet, all-`Unknown` board, counters
    /// zeroed. On error the current session is left untouched.
    pub fn reset(&mut self) -> Result<VisibleBoard, EnvError> {
        let hidden = HiddenBoard::generate(&mut self.rng, &self.config)?;
        self.hidden = hidden;
        self.visible = VisibleBoard::new(self.config.grid_size);
        self.sunk_count = 0;
        self.status = GameStatus::InProgress;
        self.steps = 0;
        log::debug!(
            "new session: {}x{} grid, {} ships",
            self.config.grid_size,
            self.config.grid_size,
            self.hidden.ships().len()
        );
        Ok(self.visible.clone())
    }

    /// Fire at cell `action` (`row * grid_size + col`) using the session's
    /// reward function.
    pub fn step(&mut self, action: usize) -> Result<StepResult, EnvError> {
        self.advance(action, None)
    }

    /// Like [`step`](Self::step), but scores this call with `reward_fn`.
    pub fn step_with(&mut self, action: usize, reward_fn: &dyn RewardFn) -> Result<StepResult, EnvError> {
        self.advance(action, Some(reward_fn))
    }

    fn advance(&mut self, action: usize, override_fn: Option<&dyn RewardFn>) -> Result<StepResult, EnvError> {
        let limit = self.action_space();
        if action >= limit {
            return Err(EnvError::InvalidAction { action, limit });
        }
        if self.status == GameStatus::Terminal {
            return Ok(StepResult {
                observation: self.visible.clone(),
                reward: 0.0,
                done: true,
                info: StepInfo {
                    message: Some(GAME_OVER_MESSAGE.into()),
                    outcome: None,
                },
            });
        }

        let reward_fn: &dyn RewardFn = match override_fn {
            Some(f) => f,
            None => &*self.reward_fn,
        };
        let n = self.config.grid_size;
        let (row, col) = (action / n, action % n);
        self.steps += 1;

        let outcome = if !self.visible.is_unknown(row, col) {
            Outcome::Redundant
        } else if self.hidden.is_occupied(row, col) {
            self.visible.set(row, col, CellState::Hit);
            if register_hit(&mut self.hidden, &mut self.visible, row, col) {
                self.sunk_count += 1;
                Outcome::Sunk
            } else {
                Outcome::Hit
            }
        } else {
            self.visible.set(row, col, CellState::Miss);
            Outcome::Miss
        };
        let mut reward = reward_fn.evaluate(&self.visible, row, col, outcome);
        log::debug!("step {}: ({}, {}) -> {} ({})", self.steps, row, col, outcome, reward);

        let mut info = StepInfo {
            message: None,
            outcome: Some(outcome),
        };
        let done = self.sunk_count == self.hidden.ships().len();
        if done {
            self.status = GameStatus::Terminal;
            reward += reward_fn.evaluate(&self.visible, row, col, Outcome::AllSunk);
            info.message = Some(ALL_SUNK_MESSAGE.into());
            log::debug!("all {} ships sunk after {} steps", self.sunk_count, self.steps);
        }

        Ok(StepResult {
            observation: self.visible.clone(),
            reward,
            done,
            info,
        })
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    /// Number of valid actions, `grid_size²`.
    pub fn action_space(&self) -> usize {
        self.config.action_space()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_done(&self) -> bool {
        self.status == GameStatus::Terminal
    }

    /// Ships sunk so far in this session.
    pub fn sunk_count(&self) -> usize {
        self.sunk_count
    }

    /// Steps processed since the last reset, not counting post-terminal calls.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    pub fn visible_board(&self) -> &VisibleBoard {
        &self.visible
    }

    /// Ground truth of the session. For harnesses and diagnostics; a policy
    /// must only look at the visible board.
    pub fn hidden_board(&self) -> &HiddenBoard {
        &self.hidden
    }
}

/// Registers a hit on the ship covering (row, col) and paints it sunk on the
/// visible board if this hit finished it. Returns whether a ship sank.
fn register_hit(hidden: &mut HiddenBoard, visible: &mut VisibleBoard, row: usize, col: usize) -> bool {
    let Some(ship) = hidden.ship_at(row, col).and_then(|i| hidden.ship_mut(i)) else {
        return false;
    };
    let was_sunk = ship.is_sunk();
    ship.register_hit(row, col);
    if was_sunk || !ship.is_sunk() {
        return false;
    }
    for (r, c) in ship.cells() {
        visible.set(r, c, CellState::SunkPart);
    }
    true
}
