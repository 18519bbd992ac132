use std::sync::Arc;

use battleship_env::{
    init_logging_with, level_from_env, run_episode, trial_seed, EnvConfig, EpisodeSummary, PolicyKind, RewardKind,
    TrialReport, TrialSetup,
};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::task::JoinSet;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Raise log verbosity (-v debug, -vv trace); overrides BATTLESHIP_ENV_LOG
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Warn,
            (false, 0) => level_from_env(LevelFilter::Info),
            (false, 1) => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Args, Clone)]
struct SessionArgs {
    #[arg(long, value_enum, default_value_t = PolicyKind::Diffusion)]
    policy: PolicyKind,
    #[arg(long, value_enum, default_value_t = RewardKind::Constant)]
    reward: RewardKind,
    #[arg(long, default_value_t = battleship_env::DEFAULT_GRID_SIZE)]
    grid_size: usize,
    #[arg(long, default_value_t = battleship_env::DIFFUSION_STEPS, help = "Diffusion passes per decision")]
    iterations: usize,
    #[arg(long, help = "Fix RNG seed for reproducible runs (e.g., --seed 12345)")]
    seed: Option<u64>,
}

impl SessionArgs {
    fn setup(&self) -> anyhow::Result<TrialSetup> {
        let config = EnvConfig::with_grid_size(self.grid_size);
        config.validate()?;
        let mut setup = TrialSetup::new(config, self.policy, self.reward);
        setup.iterations = self.iterations;
        Ok(setup)
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            let mut seed_rng = rand::rng();
            rand::Rng::random(&mut seed_rng)
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run many episodes in parallel and report the average step count.
    Trials {
        #[command(flatten)]
        session: SessionArgs,
        #[arg(long, default_value_t = 50)]
        trials: usize,
        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },
    /// Play a single episode and print the final board.
    Episode {
        #[command(flatten)]
        session: SessionArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging_with(cli.log_level());

    match cli.command {
        Commands::Trials { session, trials, json } => {
            let setup = Arc::new(session.setup()?);
            let seed = session.seed();
            log::info!("running {} trials of {} (seed {})", trials, setup.policy_name(), seed);

            // one session per blocking task; sessions share nothing
            let mut tasks = JoinSet::new();
            for i in 0..trials {
                let setup = Arc::clone(&setup);
                let s = trial_seed(seed, i);
                tasks.spawn_blocking(move || setup.run_trial(s));
            }
            let mut summaries: Vec<EpisodeSummary> = Vec::with_capacity(trials);
            while let Some(joined) = tasks.join_next().await {
                summaries.push(joined??);
            }

            let report = TrialReport::from_summaries(setup.policy_name(), &summaries);
            if json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                println!(
                    "Performed {} trials of {}. Average finishing steps is {:.2} (min {}, max {}).",
                    report.trials, report.policy, report.mean_steps, report.min_steps, report.max_steps
                );
            }
        }
        Commands::Episode { session } => {
            let setup = session.setup()?;
            let seed = session.seed();
            println!("Playing one {} episode (seed {})", setup.policy_name(), seed);

            let mut seeder = SmallRng::seed_from_u64(seed);
            let mut env = setup.build_env(SmallRng::from_rng(&mut seeder))?;
            let mut rng = SmallRng::from_rng(&mut seeder);
            let mut policy = setup.build_policy();
            let summary = run_episode(&mut env, policy.as_mut(), &mut rng, setup.max_steps)?;

            println!("{}", env.visible_board());
            if summary.done {
                println!("Finished in {} steps.", summary.steps);
            } else {
                println!("Stopped after {} steps without sinking the fleet.", summary.steps);
            }
            println!(
                "Total reward {:.1}, redundant steps {}, ships sunk {}.",
                summary.total_reward,
                summary.redundant_steps,
                env.sunk_count()
            );
        }
    }
    Ok(())
}
