//! Interactive menu for the generate tool.
//!
//! Lets users pick a config, a seed, and an output path without
//! memorizing CLI flags.

use std::path::{Path, PathBuf};

use chrono::Utc;
use dialoguer::{Confirm, Input};

use crate::progress::ProgressCallback;
use crate::{GenerateError, GeneratorConfig, generate_from_config, write_dataset};

/// Default output path for generated datasets.
pub const DEFAULT_OUTPUT: &str = "data/generated/dataset.json";

/// Runs the interactive generation flow.
///
/// # Errors
///
/// Returns an error if user input, config loading, generation, or writing
/// the output fails.
pub fn run(progress: &dyn ProgressCallback) -> Result<(), GenerateError> {
    let config_path: String = Input::new()
        .with_prompt("Generator config file (leave empty for built-in)")
        .allow_empty(true)
        .interact_text()?;

    let mut config = if config_path.trim().is_empty() {
        GeneratorConfig::from_env()?
    } else {
        GeneratorConfig::load(Some(Path::new(config_path.trim())))?
    };

    let seed_str: String = Input::new()
        .with_prompt("Seed (leave empty for random)")
        .allow_empty(true)
        .interact_text()?;

    if !seed_str.trim().is_empty() {
        config.seed = Some(seed_str.trim().parse::<u64>().map_err(|e| {
            GenerateError::InvalidConfig {
                message: format!("Invalid seed '{seed_str}': {e}"),
            }
        })?);
    }

    let output: String = Input::new()
        .with_prompt("Output path")
        .default(DEFAULT_OUTPUT.to_string())
        .interact_text()?;
    let output = PathBuf::from(output);

    if output.exists()
        && !Confirm::new()
            .with_prompt(format!("{} exists. Overwrite?", output.display()))
            .default(false)
            .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    let dataset = generate_from_config(&config, Utc::now(), progress)?;
    write_dataset(&dataset, &output)?;
    Ok(())
}
