//! Skirmish simulator binary.
//!
//! Loads a scenario, runs one deterministic encounter and writes the replay
//! to stdout. Logs go to stderr.
//!
//! ```bash
//! skirmish crates/game/content/data/scenarios/crossroads.ron --seed 7 --format summary
//! ```

mod config;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use skirmish_content::{
    ActionLoader, Armory, ArmoryLoader, ConfigLoader, ScenarioLoader, StaticActionCatalog,
};
use skirmish_core::{CombatConfig, CombatEnv, Encounter, SeededDice};

use config::{EnvOverrides, SettingsLayers};
use output::OutputFormat;

/// Deterministic tactical combat simulator
#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Run a combat scenario and print its replay", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario file (RON)
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Master seed (overrides SKIRMISH_SEED and the scenario seed)
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// Rounds before a timeout (overrides SKIRMISH_ROUND_CAP)
    #[arg(short, long, value_name = "ROUNDS")]
    round_cap: Option<u32>,

    /// Combat configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Action catalog replacing or extending the built-in one (RON)
    #[arg(short, long, value_name = "FILE")]
    actions: Option<PathBuf>,

    /// Extra weapons, armor and shields (RON)
    #[arg(long, value_name = "FILE")]
    armory: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let armory = match &cli.armory {
        Some(path) => ArmoryLoader::load(path)?,
        None => Armory::standard(),
    };
    let catalog = match &cli.actions {
        Some(path) => ActionLoader::load(path)?,
        None => StaticActionCatalog::standard(),
    };
    let file_config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => CombatConfig::default(),
    };

    let scenario = ScenarioLoader::load(&cli.scenario, &armory)?;
    let settings = SettingsLayers {
        flag_seed: cli.seed,
        flag_round_cap: cli.round_cap,
        env: EnvOverrides::from_env(),
        scenario_seed: scenario.seed,
        scenario_round_cap: scenario.round_cap,
        file: file_config,
    }
    .resolve();

    tracing::info!(
        "Running '{}' with seed {} (round cap {}, {} actions)",
        scenario.name,
        settings.seed,
        settings.combat.round_cap,
        catalog.len()
    );

    let env = CombatEnv::new(&scenario.battleground, &catalog, &settings.combat);
    let encounter = Encounter::new(env, scenario.attackers, scenario.defenders)
        .with_context(|| format!("Cannot start scenario '{}'", scenario.name))?;
    let report = encounter.run(&mut SeededDice::new(settings.seed));

    let fingerprint = report
        .fingerprint()
        .context("Failed to fingerprint the replay")?;
    tracing::info!(
        "Finished: {} after {} rounds ({} turns)",
        output::describe_outcome(&report.outcome),
        report.rounds.len(),
        report.turn_count()
    );
    tracing::info!("Replay fingerprint: {}", hex::encode(fingerprint));

    println!("{}", output::render(&report, cli.format)?);
    Ok(())
}
