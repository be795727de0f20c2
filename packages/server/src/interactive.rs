//! Interactive mode for the server.
//!
//! Prompts for bind address, port, and seed before starting the server.

use dialoguer::{Confirm, Input};

use crate::{SEED_ENV_VAR, ServerError};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Sets `BIND_ADDR`, `PORT`, and (when given) `CMC_SEED` from the answers
/// and delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns [`ServerError`] if the server fails to start.
#[allow(clippy::future_not_send)]
pub async fn run() -> Result<(), ServerError> {
    println!("CMC Infrastructure Server");
    println!();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default("127.0.0.1".to_string())
        .interact_text()
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(8080)
        .interact_text()
        .unwrap_or(8080);

    let seed: String = Input::new()
        .with_prompt("Dataset seed (leave empty for random)")
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default();

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", port.to_string());
        if !seed.trim().is_empty() {
            std::env::set_var(SEED_ENV_VAR, seed.trim());
        }
    }

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}
