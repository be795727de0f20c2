//! Interactive editor for the persisted display preferences.

use std::path::PathBuf;

use cmc_infra_server::{DEFAULT_SETTINGS_DIR, SETTINGS_DIR_ENV_VAR};
use cmc_infra_settings::{Density, SettingsStore};
use dialoguer::{Confirm, Input, Select};

const DENSITIES: &[Density] = &[Density::Comfortable, Density::Compact];

/// Prompts for each preference and writes the answers through the store.
///
/// # Errors
///
/// Returns an error if a prompt fails or the preferences cannot be read or
/// written.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let default_dir = std::env::var(SETTINGS_DIR_ENV_VAR)
        .unwrap_or_else(|_| DEFAULT_SETTINGS_DIR.to_string());
    let dir: String = Input::new()
        .with_prompt("Preferences directory")
        .default(default_dir)
        .interact_text()?;
    let dir = PathBuf::from(dir);

    let mut store = match SettingsStore::load(&dir) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("{e}");
            if !Confirm::new()
                .with_prompt("Stored preferences are unreadable. Replace with defaults?")
                .default(false)
                .interact()?
            {
                println!("Cancelled.");
                return Ok(());
            }
            let mut store = SettingsStore::load_or_default(&dir);
            store.reset()?;
            store
        }
    };
    let current = store.get();

    if Confirm::new()
        .with_prompt("Reset all preferences to defaults?")
        .default(false)
        .interact()?
    {
        store.reset()?;
        println!("Preferences reset.");
        return Ok(());
    }

    let labels: Vec<&str> = DENSITIES.iter().map(AsRef::<str>::as_ref).collect();
    let idx = Select::new()
        .with_prompt("Density")
        .items(&labels)
        .default(DENSITIES.iter().position(|d| *d == current.density).unwrap_or(0))
        .interact()?;
    store.set_density(DENSITIES[idx])?;

    let reduced_motion = Confirm::new()
        .with_prompt("Reduce motion?")
        .default(current.reduced_motion)
        .interact()?;
    store.set_reduced_motion(reduced_motion)?;

    let sidebar_collapsed = Confirm::new()
        .with_prompt("Collapse sidebar?")
        .default(current.sidebar_collapsed)
        .interact()?;
    store.set_sidebar_collapsed(sidebar_collapsed)?;

    println!("Saved {:?} to {}", store.get(), store.path().display());
    Ok(())
}
