use battleship_env::{
    run_episode, BattleshipEnv, CellState, DiffusionPolicy, DiffusionSolver, EnvConfig, EpisodeSummary, Outcome,
    Policy, PolicyKind, RandomPolicy, RewardKind, ShapedReward, TrialReport, TrialSetup, VisibleBoard,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_random_policy_never_repeats() {
    let mut env = BattleshipEnv::seeded(EnvConfig::default(), 123).unwrap();
    let mut policy = RandomPolicy::new(10);
    let mut rng = SmallRng::seed_from_u64(124);
    let summary = run_episode(&mut env, &mut policy, &mut rng, 200).unwrap();
    assert!(summary.done);
    assert!(summary.steps >= 17 && summary.steps <= 100);
    assert_eq!(summary.redundant_steps, 0);
    assert_eq!(summary.total_reward, -(summary.steps as f64) - 1.0);
}

#[test]
fn test_diffusion_policy_finishes_without_redundant_shots() {
    for seed in 0..5 {
        let mut env = BattleshipEnv::seeded(EnvConfig::default(), seed).unwrap();
        let mut policy = DiffusionPolicy::new(10, DiffusionSolver::default());
        let mut rng = SmallRng::seed_from_u64(seed + 1000);
        let summary = run_episode(&mut env, &mut policy, &mut rng, 200).unwrap();
        assert!(summary.done, "seed {} did not finish", seed);
        assert!(summary.steps <= 100);
        assert_eq!(summary.redundant_steps, 0);
        assert_eq!(env.sunk_count(), 5);
    }
}

#[test]
fn test_diffusion_policy_with_shaped_reward() {
    let mut env =
        BattleshipEnv::with_reward_fn(EnvConfig::default(), SmallRng::seed_from_u64(8), ShapedReward::default())
            .unwrap();
    let mut policy = DiffusionPolicy::new(10, DiffusionSolver::default());
    let mut rng = SmallRng::seed_from_u64(9);
    let summary = run_episode(&mut env, &mut policy, &mut rng, 200).unwrap();
    assert!(summary.done);
    assert!(summary.steps <= 100);
    assert_eq!(summary.redundant_steps, 0);
}

#[test]
fn test_diffusion_policy_keeps_separate_state() {
    let mut env = BattleshipEnv::seeded(EnvConfig::default(), 4).unwrap();
    let mut policy = DiffusionPolicy::new(10, DiffusionSolver::default());
    let mut rng = SmallRng::seed_from_u64(5);

    let action = policy.select_action(&mut rng).unwrap();
    let step = env.step(action).unwrap();
    policy.observe(action, &step).unwrap();

    let (r, c) = (action / 10, action % 10);
    assert_eq!(policy.bombed().count_ones(), 1);
    assert!(policy.bombed().get(r, c).unwrap());
    assert_eq!(policy.known_rewards()[(r, c)], -1.0);
    assert_eq!(policy.known_rewards().iter().filter(|&&v| v != 0.0).count(), 1);

    // the next shot is never the cell just fired at
    let next = policy.select_action(&mut rng).unwrap();
    assert_ne!(next, action);
    assert_eq!(policy.utility().unwrap()[(r, c)], f64::NEG_INFINITY);
}

#[test]
fn test_redundant_step_does_not_overwrite_known_reward() {
    let mut env = BattleshipEnv::seeded(EnvConfig::default(), 4).unwrap();
    let mut policy = DiffusionPolicy::new(10, DiffusionSolver::default());
    env.set_reward_fn(|_: &VisibleBoard, _: usize, _: usize, o: Outcome| {
        if o == Outcome::Redundant {
            -50.0
        } else {
            -1.0
        }
    });

    let first = env.step(0).unwrap();
    policy.observe(0, &first).unwrap();
    let again = env.step(0).unwrap();
    assert_eq!(again.info.outcome, Some(Outcome::Redundant));
    policy.observe(0, &again).unwrap();
    assert_eq!(policy.known_rewards()[(0, 0)], -1.0);
}

#[test]
fn test_policy_reset_clears_history() {
    let mut env = BattleshipEnv::seeded(EnvConfig::default(), 2).unwrap();
    let mut policy = DiffusionPolicy::new(10, DiffusionSolver::new(3));
    let step = env.step(42).unwrap();
    policy.observe(42, &step).unwrap();

    policy.reset(8);
    assert!(policy.bombed().is_empty());
    assert_eq!(policy.bombed().size(), 8);
    assert_eq!(policy.known_rewards().dim(), (8, 8));
}

#[test]
fn test_random_policy_on_tiny_board() {
    let mut env = BattleshipEnv::seeded(
        EnvConfig {
            grid_size: 2,
            fleet: vec![1],
            ..EnvConfig::default()
        },
        0,
    )
    .unwrap();
    let mut policy = RandomPolicy::new(2);
    let mut rng = SmallRng::seed_from_u64(0);
    let summary = run_episode(&mut env, &mut policy, &mut rng, 10).unwrap();
    assert!(summary.done);
    assert!(summary.steps <= 4);
    assert_eq!(env.visible_board().count(CellState::SunkPart), 1);
}

#[test]
fn test_trials_are_reproducible() {
    let setup = TrialSetup::new(EnvConfig::default(), PolicyKind::Diffusion, RewardKind::Shaped);
    let a = setup.run_trials(77, 4).unwrap();
    let b = setup.run_trials(77, 4).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.policy, "diffusion_shaped");
    assert_eq!(a.trials, 4);
    assert_eq!(a.completed, 4);
    assert!(a.min_steps >= 17 && a.max_steps <= 100);
}

#[test]
fn test_report_from_summaries() {
    let summary = |steps| EpisodeSummary {
        steps,
        total_reward: -(steps as f64),
        redundant_steps: 0,
        done: true,
    };
    let report = TrialReport::from_summaries("random", &[summary(40), summary(60), summary(80)]);
    assert_eq!(report.mean_steps, 60.0);
    assert_eq!(report.min_steps, 40);
    assert_eq!(report.max_steps, 80);

    let empty = TrialReport::from_summaries("random", &[]);
    assert_eq!(empty.mean_steps, 0.0);
    assert_eq!(empty.trials, 0);
}
