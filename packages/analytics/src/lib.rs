#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived metrics over the infrastructure dataset.
//!
//! Every function here is a read-only pass over an immutable
//! [`cmc_infra_models::MockDataset`]. Anything time-dependent takes the
//! reference instant `now` as a parameter rather than reading the clock.

pub mod boards;
pub mod dashboard;
pub mod filter;
pub mod impact;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// No entity with the requested ID exists.
    #[error("Unknown {kind} '{id}'")]
    NotFound {
        /// Entity kind (e.g. `"asset"`).
        kind: &'static str,
        /// The ID that was looked up.
        id: String,
    },

    /// A filter or pagination value is out of range.
    #[error("Invalid filter: {message}")]
    InvalidFilter {
        /// Description of what went wrong.
        message: String,
    },
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, TimeZone as _, Utc};
    use cmc_infra_generate::progress::NullProgress;
    use cmc_infra_generate::{GeneratorConfig, generate_from_config};
    use cmc_infra_models::MockDataset;

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 9, 30, 0).unwrap()
    }

    pub fn dataset() -> MockDataset {
        let config = GeneratorConfig::from_toml_str(
            "seed = 21\nwork_orders = 150\ncomplaints = 400\nincidents = 60\ncrews = 20\n\
             [assets]\nroad = 60\ndrain = 50\nstreetlight = 40\ntree = 30\nwaste = 20\nbuilding = 10\n",
        )
        .unwrap();
        generate_from_config(&config, now(), &NullProgress).unwrap()
    }
}
