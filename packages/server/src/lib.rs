#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web JSON API for the infrastructure dashboard.
//!
//! The dataset is generated once at start-up (or read from a snapshot
//! written by `cmc_infra_generate`) and shared immutably between workers.
//! The only mutable state is the preference store, which sits behind a
//! mutex and writes through to disk on every change.

mod handlers;
pub mod interactive;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use chrono::{DateTime, Utc};
use cmc_infra_generate::progress::NullProgress;
use cmc_infra_generate::{GenerateError, GeneratorConfig, generate_from_config, read_dataset};
use cmc_infra_models::MockDataset;
use cmc_infra_server_models::ApiError;
use cmc_infra_settings::SettingsStore;
use thiserror::Error;

/// Overrides the generator seed.
pub const SEED_ENV_VAR: &str = "CMC_SEED";

/// Serve a dataset snapshot from this path instead of generating one.
pub const DATASET_ENV_VAR: &str = "CMC_DATASET";

/// Directory holding the preference blob.
pub const SETTINGS_DIR_ENV_VAR: &str = "CMC_SETTINGS_DIR";

/// Default for [`SETTINGS_DIR_ENV_VAR`].
pub const DEFAULT_SETTINGS_DIR: &str = "data";

/// Errors that can occur while preparing or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Dataset generation or loading failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// An environment variable holds an unusable value.
    #[error("Invalid {name}: {message}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// Binding or running the HTTP server failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// The served dataset.
    pub dataset: Arc<MockDataset>,
    /// When the dataset was generated.
    pub generated_at: DateTime<Utc>,
    /// Persisted user preferences.
    pub settings: Mutex<SettingsStore>,
    /// Fixed reference instant; `None` reads the wall clock per request.
    pub clock: Option<DateTime<Utc>>,
}

impl AppState {
    /// Builds state around an already generated dataset.
    #[must_use]
    pub fn new(dataset: MockDataset, generated_at: DateTime<Utc>, settings: SettingsStore) -> Self {
        Self {
            dataset: Arc::new(dataset),
            generated_at,
            settings: Mutex::new(settings),
            clock: None,
        }
    }

    /// Pins every time-dependent figure to `now`.
    #[must_use]
    pub const fn with_fixed_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    /// The reference instant for SLA and KPI evaluation.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.unwrap_or_else(Utc::now)
    }
}

/// Builds the application state from the environment.
///
/// Reads the snapshot named by `CMC_DATASET` if set. Otherwise generates a
/// dataset from the config named by `CMC_GENERATOR_CONFIG` (or the
/// built-in one), with `CMC_SEED` overriding its seed. The preference store
/// is loaded from `CMC_SETTINGS_DIR`; a corrupt blob is logged and replaced
/// with defaults.
///
/// # Errors
///
/// Returns [`ServerError`] if the config, seed, or snapshot is unusable.
pub fn state_from_env() -> Result<AppState, ServerError> {
    let now = Utc::now();

    let dataset = if let Ok(path) = std::env::var(DATASET_ENV_VAR) {
        log::info!("Reading dataset snapshot from {path}");
        read_dataset(Path::new(&path))?
    } else {
        let mut config = GeneratorConfig::from_env()?;
        if let Ok(seed) = std::env::var(SEED_ENV_VAR) {
            config.seed = Some(seed.trim().parse::<u64>().map_err(|e| ServerError::InvalidEnv {
                name: SEED_ENV_VAR,
                message: format!("'{seed}': {e}"),
            })?);
        }
        log::info!(
            "Generating dataset ({} entities, seed {})",
            config.total_entities(),
            config
                .seed
                .map_or_else(|| "random".to_string(), |s| s.to_string())
        );
        generate_from_config(&config, now, &NullProgress)?
    };

    let settings_dir = std::env::var(SETTINGS_DIR_ENV_VAR)
        .map_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_DIR), PathBuf::from);
    let settings = SettingsStore::load_or_default(&settings_dir);
    log::info!("Preferences at {}", settings.path().display());

    Ok(AppState::new(dataset, now, settings))
}

fn query_error_handler(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> error::Error {
    let body = ApiError::new(&err);
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

fn json_error_handler(
    err: error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> error::Error {
    let body = ApiError::new(&err);
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Registers the `/api` routes and their extractor configs.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/wards", web::get().to(handlers::wards))
                .route("/dashboard", web::get().to(handlers::dashboard_summary))
                .route("/assets", web::get().to(handlers::assets))
                .route("/assets/{id}", web::get().to(handlers::asset))
                .route(
                    "/assets/{id}/work-orders",
                    web::get().to(handlers::asset_work_orders),
                )
                .route("/work-orders", web::get().to(handlers::work_orders))
                .route(
                    "/work-orders/board",
                    web::get().to(handlers::work_order_board),
                )
                .route(
                    "/work-orders/sla-attention",
                    web::get().to(handlers::sla_attention),
                )
                .route("/work-orders/{id}", web::get().to(handlers::work_order))
                .route("/complaints", web::get().to(handlers::complaints))
                .route(
                    "/complaints/board",
                    web::get().to(handlers::complaint_board),
                )
                .route("/incidents", web::get().to(handlers::incidents))
                .route(
                    "/incidents/{id}/impact",
                    web::get().to(handlers::incident_impact),
                )
                .route("/crews", web::get().to(handlers::crews))
                .route("/crews/{id}", web::get().to(handlers::crew))
                .route("/settings", web::get().to(handlers::get_settings))
                .route("/settings", web::put().to(handlers::put_settings)),
        );
}

/// Starts the dashboard API server.
///
/// Builds the state with [`state_from_env`] and serves it on `BIND_ADDR`
/// (default `127.0.0.1`) and `PORT` (default `8080`). The caller provides
/// the async runtime and initializes logging.
///
/// # Errors
///
/// Returns [`ServerError`] if the state cannot be built or the HTTP server
/// fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> Result<(), ServerError> {
    let state = web::Data::new(state_from_env()?);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}
