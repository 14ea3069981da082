//! Detective Quest terminal game.
//!
//! Walk the mansion with `e` (left), `d` (right) and `s` (leave), then name
//! the culprit.
//!
//! ```bash
//! cargo run -p detective -- --scenario mansion
//! cargo run -p detective -- --scenario-file my_case.json --verbose
//! ```

mod headless;

use anyhow::Context;
use clap::Parser;
use detective_core::{DuplicatePolicy, HeadlessConfig, LeafPolicy, Scenario};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "detective", about = "Explore the mansion, collect clues, accuse a suspect")]
struct Args {
    /// Built-in scenario: mansion, adventurer or basic
    #[arg(short, long, default_value = "mansion")]
    scenario: String,

    /// Load the scenario from a JSON file instead
    #[arg(long, conflicts_with = "scenario")]
    scenario_file: Option<PathBuf>,

    /// Keep every copy of a clue found in more than one room
    #[arg(long)]
    allow_duplicates: bool,

    /// End exploration on reaching a room with no exits
    #[arg(long)]
    auto_exit_leaves: bool,

    /// Number of clue index buckets
    #[arg(long)]
    buckets: Option<usize>,

    /// Print the scenario as JSON and exit
    #[arg(long)]
    dump_scenario: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn headless_config(&self) -> HeadlessConfig {
        let mut config = match &self.scenario_file {
            Some(path) => HeadlessConfig::from_file(path),
            None => HeadlessConfig::preset(&self.scenario),
        };
        if self.allow_duplicates {
            config = config.with_duplicates(DuplicatePolicy::AllowDuplicates);
        }
        if self.auto_exit_leaves {
            config = config.with_leaf_policy(LeafPolicy::AutoTerminal);
        }
        if let Some(buckets) = self.buckets {
            config = config.with_buckets(buckets);
        }
        config
    }

    /// The selected scenario as pretty JSON.
    fn dump_scenario(&self) -> anyhow::Result<String> {
        let scenario = match &self.scenario_file {
            Some(path) => Scenario::load(path)
                .with_context(|| format!("failed to load scenario {}", path.display()))?,
            None => Scenario::preset(&self.scenario)?,
        };
        Ok(scenario.to_json()?)
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so the narration on stdout stays readable.
    let default_filter = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if args.dump_scenario {
        println!("{}", args.dump_scenario()?);
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    headless::run_headless(args.headless_config(), stdin.lock(), stdout.lock())
        .context("game aborted")?;

    Ok(())
}
