#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web JSON API server for the infrastructure dashboard.
//!
//! Configuration comes from the environment; see
//! [`cmc_infra_server::state_from_env`] and [`cmc_infra_server::run_server`].

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    cmc_infra_server::run_server().await?;

    Ok(())
}
