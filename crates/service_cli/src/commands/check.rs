//! Check command implementation
//!
//! Validates the scenario configuration and prints the resolved asset table.

use tracing::info;

use crate::config::ScenarioConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &ScenarioConfig) -> Result<()> {
    info!("Checking scenario configuration...");
    config.validate()?;

    let horizon = config.horizon()?;
    let start = config.start_date()?;

    println!();
    println!("Scenario");
    println!("  Steps:          {}", horizon.steps());
    println!("  Shock:          {}%", config.scenario.shock_percent);
    println!("  Onset (L):      {}", horizon.onset());
    println!("  Recovery (I):   {}", horizon.recovery());
    match start {
        Some(date) => println!("  Start date:     {}", date),
        None => println!("  Start date:     (no date column)"),
    }
    match config.scenario.seed {
        Some(seed) => println!("  Seed:           {}", seed),
        None => println!("  Seed:           (entropy)"),
    }
    println!("  Price floor:    {:?}", config.scenario.price_floor);

    println!();
    println!("┌──────────────┬────────────┬──────────┬──────────┬──────────┐");
    println!("│ Asset        │ f0         │ mu       │ sigma    │ alpha    │");
    println!("├──────────────┼────────────┼──────────┼──────────┼──────────┤");
    for (label, params) in config.asset_parameters()? {
        println!(
            "│ {:<12} │ {:>10.4} │ {:>8.4} │ {:>8.4} │ {:>8.4} │",
            label,
            params.initial_price(),
            params.growth_rate(),
            params.volatility(),
            params.sensitivity()
        );
    }
    println!("└──────────────┴────────────┴──────────┴──────────┴──────────┘");

    info!("Configuration OK");
    Ok(())
}
