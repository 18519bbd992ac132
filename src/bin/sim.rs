use battleship_env::{init_logging, EnvConfig, PolicyKind, RewardKind, TrialSetup};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed> <trials>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let trials: usize = args[2].parse()?;

    let setups = [
        TrialSetup::new(EnvConfig::default(), PolicyKind::Random, RewardKind::Constant),
        TrialSetup::new(EnvConfig::default(), PolicyKind::Diffusion, RewardKind::Constant),
        TrialSetup::new(EnvConfig::default(), PolicyKind::Diffusion, RewardKind::Shaped),
    ];
    let reports = setups
        .iter()
        .map(|setup| setup.run_trials(seed, trials))
        .collect::<Result<Vec<_>, _>>()?;

    let best = reports
        .iter()
        .filter(|r| r.trials > 0)
        .min_by(|a, b| a.mean_steps.total_cmp(&b.mean_steps))
        .map(|r| r.policy.clone());

    let result = json!({
        "seed": seed,
        "trials": trials,
        "reports": reports,
        "best": best,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
