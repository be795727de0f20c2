#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI tool for generating the infrastructure mock dataset.
//!
//! Writes the dataset as JSON so the server (or anything else) can load a
//! fixed snapshot instead of regenerating on start-up.

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use cmc_infra_generate::progress::NullProgress;
use cmc_infra_generate::{GeneratorConfig, generate_from_config, write_dataset};

#[derive(Parser)]
#[command(name = "cmc_infra_generate", about = "Mock dataset generator")]
struct Cli {
    /// Generator config file (TOML). Defaults to `CMC_GENERATOR_CONFIG`,
    /// then the built-in config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed; overrides the config's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Output path for the dataset JSON.
    #[arg(long, default_value = "data/generated/dataset.json")]
    output: PathBuf,

    /// Prompt for settings instead of reading flags.
    #[arg(long)]
    interactive: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if cli.interactive {
        return Ok(cmc_infra_generate::interactive::run(&NullProgress)?);
    }

    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(Some(path.as_path()))?,
        None => GeneratorConfig::from_env()?,
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let dataset = generate_from_config(&config, Utc::now(), &NullProgress)?;
    write_dataset(&dataset, &cli.output)?;

    println!(
        "{} assets, {} work orders, {} complaints, {} incidents, {} crews -> {}",
        dataset.assets.len(),
        dataset.work_orders.len(),
        dataset.complaints.len(),
        dataset.incidents.len(),
        dataset.crews.len(),
        cli.output.display()
    );

    Ok(())
}
