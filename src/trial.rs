//! Episode runner and multi-trial averaging, the harness around the
//! environment and its policies.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{
    common::{EnvError, Outcome},
    config::{EnvConfig, DIFFUSION_STEPS},
    diffusion::DiffusionSolver,
    env::BattleshipEnv,
    policy::{DiffusionPolicy, Policy, RandomPolicy},
    reward::{ConstantReward, ShapedReward},
};

/// Which policy a trial runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum, serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum PolicyKind {
    Random,
    Diffusion,
}

/// Which reward function the environment scores with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum, serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum RewardKind {
    Constant,
    Shaped,
}

/// Outcome of one episode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeSummary {
    pub steps: usize,
    pub total_reward: f64,
    pub redundant_steps: usize,
    /// False when the step limit cut the episode short.
    pub done: bool,
}

/// Aggregate over several episodes of one policy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialReport {
    pub policy: String,
    pub trials: usize,
    pub completed: usize,
    pub mean_steps: f64,
    pub min_steps: usize,
    pub max_steps: usize,
}

impl TrialReport {
    pub fn from_summaries(policy: &str, summaries: &[EpisodeSummary]) -> Self {
        let trials = summaries.len();
        let total: usize = summaries.iter().map(|s| s.steps).sum();
        Self {
            policy: policy.to_string(),
            trials,
            completed: summaries.iter().filter(|s| s.done).count(),
            mean_steps: if trials == 0 { 0.0 } else { total as f64 / trials as f64 },
            min_steps: summaries.iter().map(|s| s.steps).min().unwrap_or(0),
            max_steps: summaries.iter().map(|s| s.steps).max().unwrap_or(0),
        }
    }
}

/// Reset `env` and let `policy` play until the fleet is sunk or `max_steps`
/// steps have been taken.
pub fn run_episode<R, P>(
    env: &mut BattleshipEnv<R>,
    policy: &mut P,
    rng: &mut SmallRng,
    max_steps: usize,
) -> Result<EpisodeSummary, EnvError>
where
    R: Rng,
    P: Policy + ?Sized,
{
    env.reset()?;
    policy.reset(env.grid_size());

    let mut summary = EpisodeSummary {
        steps: 0,
        total_reward: 0.0,
        redundant_steps: 0,
        done: false,
    };
    while summary.steps < max_steps {
        let action = policy.select_action(rng)?;
        let step = env.step(action)?;
        policy.observe(action, &step)?;

        summary.steps += 1;
        summary.total_reward += step.reward;
        if step.info.outcome == Some(Outcome::Redundant) {
            summary.redundant_steps += 1;
        }
        if step.done {
            summary.done = true;
            break;
        }
    }
    if !summary.done {
        log::warn!("{} stopped at the {} step limit", policy.name(), max_steps);
    }
    Ok(summary)
}

/// Everything needed to run reproducible trials of one policy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialSetup {
    pub config: EnvConfig,
    pub policy: PolicyKind,
    pub reward: RewardKind,
    pub iterations: usize,
    pub max_steps: usize,
}

impl TrialSetup {
    pub fn new(config: EnvConfig, policy: PolicyKind, reward: RewardKind) -> Self {
        let max_steps = config.action_space() * 2;
        Self {
            config,
            policy,
            reward,
            iterations: DIFFUSION_STEPS,
            max_steps,
        }
    }

    pub fn policy_name(&self) -> &'static str {
        match (self.policy, self.reward) {
            (PolicyKind::Random, _) => "random",
            (PolicyKind::Diffusion, RewardKind::Constant) => "diffusion",
            (PolicyKind::Diffusion, RewardKind::Shaped) => "diffusion_shaped",
        }
    }

    pub fn build_policy(&self) -> Box<dyn Policy + Send> {
        let n = self.config.grid_size;
        match self.policy {
            PolicyKind::Random => Box::new(RandomPolicy::new(n)),
            PolicyKind::Diffusion => Box::new(DiffusionPolicy::new(n, DiffusionSolver::new(self.iterations))),
        }
    }

    pub fn build_env(&self, rng: SmallRng) -> Result<BattleshipEnv, EnvError> {
        match self.reward {
            RewardKind::Constant => BattleshipEnv::with_reward_fn(self.config.clone(), rng, ConstantReward::default()),
            RewardKind::Shaped => BattleshipEnv::with_reward_fn(self.config.clone(), rng, ShapedReward::default()),
        }
    }

    /// Run a single episode. The environment and the policy each get their
    /// own generator derived from `trial_seed`.
    pub fn run_trial(&self, trial_seed: u64) -> Result<EpisodeSummary, EnvError> {
        let mut seeder = SmallRng::seed_from_u64(trial_seed);
        let mut env = self.build_env(SmallRng::from_rng(&mut seeder))?;
        let mut policy_rng = SmallRng::from_rng(&mut seeder);
        let mut policy = self.build_policy();
        run_episode(&mut env, policy.as_mut(), &mut policy_rng, self.max_steps)
    }

    /// Run `trials` episodes one after another, trial `i` seeded with
    /// `seed + i`.
    pub fn run_trials(&self, seed: u64, trials: usize) -> Result<TrialReport, EnvError> {
        let summaries = (0..trials)
            .map(|i| self.run_trial(trial_seed(seed, i)))
            .collect::<Result<alloc::vec::Vec<_>, _>>()?;
        Ok(TrialReport::from_summaries(self.policy_name(), &summaries))
    }
}

/// Seed of trial `index` in a run seeded with `seed`.
pub fn trial_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add(index as u64)
}
