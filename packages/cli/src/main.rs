#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive CLI orchestrator for the infrastructure toolchain.
//!
//! One entry point that lets users pick a tool (generate a dataset, start
//! the API server, edit display preferences) and walks them through its
//! configuration.
//!
//! Uses `indicatif-log-bridge` (via [`cmc_infra_cli_utils::init_logger`])
//! so log lines and progress bars share the terminal cleanly.

mod preferences;

use cmc_infra_cli_utils::IndicatifProgress;
use dialoguer::Select;

/// Top-level tool selection.
enum Tool {
    Generate,
    Server,
    Preferences,
}

impl Tool {
    const ALL: &[Self] = &[Self::Generate, Self::Server, Self::Preferences];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Generate => "Generate mock dataset",
            Self::Server => "Start server",
            Self::Preferences => "Edit display preferences",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = cmc_infra_cli_utils::init_logger();

    println!("CMC Infrastructure Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Generate => {
            let progress = IndicatifProgress::entities_bar(&multi, "Generating dataset");
            cmc_infra_generate::interactive::run(progress.as_ref())?;
        }
        Tool::Server => {
            // actix-web brings its own runtime, so run it on a blocking
            // thread instead of nesting it inside tokio's.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(cmc_infra_server::interactive::run())
            })
            .await??;
        }
        Tool::Preferences => preferences::run()?,
    }

    Ok(())
}
