use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use migrator_cli::{create_example_config, run_scenario, ScenarioConfig};

#[derive(Parser, Debug)]
#[command(name = "migrator-cli")]
#[command(about = "Run liquidity migration scenarios against a simulated chain")]
struct Args {
    /// Path to scenario configuration file
    #[arg(short, long, default_value = "scenario.toml")]
    config: String,

    /// Write an example scenario to the config path and exit
    #[arg(long)]
    write_example: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over the verbosity flag; logs go to stderr, the report to stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.write_example {
        create_example_config(&args.config)
            .with_context(|| format!("writing example scenario to {}", args.config))?;
        info!(path = %args.config, "wrote example scenario");
        return Ok(());
    }

    let config = ScenarioConfig::load(&args.config)
        .with_context(|| format!("loading scenario {}", args.config))?;
    info!(
        tokens = config.tokens.len(),
        pairs = config.pairs.len(),
        migrations = config.migrations.len(),
        "loaded scenario"
    );

    let report = run_scenario(&config).context("running scenario")?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    let failed = report.failed();
    if failed > 0 {
        warn!(failed, "some migrations did not complete");
    }
    Ok(())
}
