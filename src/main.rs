use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;

use coursebid::config::scenario::fixed;
use coursebid::config::{AppConfig, ScenarioConfig};
use coursebid::evolve::{LogProgress, StrategyOptimizer};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => AppConfig::default(),
    };

    println!("{:>12} | {:>10} | {:>10} | {:>6}", "scenario", "realized", "reference", "ratio");

    for scenario in [fixed::first_price(), fixed::second_price()] {
        report(&config, &scenario, None)?;
    }

    // Sweep the bid ceiling over the contested scenario to see how tight
    // budgets degrade efficiency.
    for max_bid in [f64::INFINITY, 250.0, 100.0, 50.0, 10.0, 1.0] {
        report(&config, &fixed::realistic(), Some(max_bid))?;
    }

    Ok(())
}

fn report(config: &AppConfig, scenario: &ScenarioConfig, max_bid: Option<f64>) -> anyhow::Result<()> {
    let mut auction = scenario
        .build()
        .with_context(|| format!("building scenario '{}'", scenario.name))?;
    if let Some(max_bid) = max_bid {
        auction.set_max_bid(max_bid);
    }

    let mut optimizer = StrategyOptimizer::new(config.optimizer.clone());
    optimizer
        .run(&mut auction, &mut LogProgress)
        .with_context(|| format!("optimizing scenario '{}'", scenario.name))?;

    let mut rng = match config.optimizer.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    let efficiency = auction.allocative_efficiency(config.report.efficiency_rounds, &mut rng)?;

    let label = match max_bid {
        Some(max_bid) if max_bid.is_finite() => format!("{} ({max_bid})", scenario.name),
        _ => scenario.name.clone(),
    };
    println!(
        "{label:>12} | {:>10.2} | {:>10.2} | {:>6.3}",
        efficiency.realized,
        efficiency.reference,
        efficiency.ratio()
    );

    Ok(())
}
