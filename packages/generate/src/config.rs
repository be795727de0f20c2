//! Generator configuration.
//!
//! A default [`GeneratorConfig`] is baked into the binary from
//! `config/default.toml` via [`include_str!`]. Callers may override it
//! with a TOML file on disk; any key left out of the override falls back
//! to the built-in default.

use std::path::Path;

use cmc_infra_models::AssetType;
use serde::Deserialize;

use crate::GenerateError;

/// Built-in generator settings.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Environment variable naming an override config file.
pub const CONFIG_ENV_VAR: &str = "CMC_GENERATOR_CONFIG";

/// Settings controlling the size and shape of the generated dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Number of assets per type.
    pub assets: AssetCounts,
    /// Number of work orders.
    pub work_orders: usize,
    /// Number of complaints.
    pub complaints: usize,
    /// Number of incidents.
    pub incidents: usize,
    /// Number of crews.
    pub crews: usize,
    /// Centre and spread of generated coordinates.
    pub origin: Origin,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            assets: AssetCounts::default(),
            work_orders: 500,
            complaints: 2000,
            incidents: 200,
            crews: 50,
            origin: Origin::default(),
        }
    }
}

/// Per-type asset counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetCounts {
    /// Road segments.
    pub road: usize,
    /// Drains.
    pub drain: usize,
    /// Streetlights.
    pub streetlight: usize,
    /// Trees.
    pub tree: usize,
    /// Waste points.
    pub waste: usize,
    /// Buildings.
    pub building: usize,
}

impl Default for AssetCounts {
    fn default() -> Self {
        Self {
            road: 300,
            drain: 250,
            streetlight: 200,
            tree: 150,
            waste: 100,
            building: 50,
        }
    }
}

impl AssetCounts {
    /// Count configured for `asset_type`.
    #[must_use]
    pub const fn count_for(&self, asset_type: AssetType) -> usize {
        match asset_type {
            AssetType::Road => self.road,
            AssetType::Drain => self.drain,
            AssetType::Streetlight => self.streetlight,
            AssetType::Tree => self.tree,
            AssetType::Waste => self.waste,
            AssetType::Building => self.building,
        }
    }

    /// Sum over all types.
    #[must_use]
    pub fn total(&self) -> usize {
        AssetType::all().iter().map(|t| self.count_for(*t)).sum()
    }
}

/// Geographic centre of the generated city.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Origin {
    /// Latitude of the centre.
    pub lat: f64,
    /// Longitude of the centre.
    pub lon: f64,
    /// Width of the square (in degrees) that points are scattered over.
    pub spread_degrees: f64,
}

impl Default for Origin {
    fn default() -> Self {
        Self {
            lat: 6.9271,
            lon: 79.8612,
            spread_degrees: 0.1,
        }
    }
}

impl GeneratorConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Config`] if the TOML is malformed or a
    /// value has the wrong type.
    pub fn from_toml_str(s: &str) -> Result<Self, GenerateError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config from `path`, or the built-in default when `path`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, GenerateError> {
        match path {
            Some(path) => {
                log::info!("Loading generator config from {}", path.display());
                let text = std::fs::read_to_string(path)?;
                Self::from_toml_str(&text)
            }
            None => Self::from_toml_str(DEFAULT_CONFIG_TOML),
        }
    }

    /// Loads the config named by `CMC_GENERATOR_CONFIG`, or the default.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if the named file cannot be read or parsed.
    pub fn from_env() -> Result<Self, GenerateError> {
        let path = std::env::var(CONFIG_ENV_VAR).ok();
        Self::load(path.as_deref().map(Path::new))
    }

    /// Total number of entities the config will produce (wards excluded).
    #[must_use]
    pub fn total_entities(&self) -> usize {
        self.assets.total() + self.work_orders + self.complaints + self.incidents + self.crews
    }

    fn validate(&self) -> Result<(), GenerateError> {
        if !(self.origin.spread_degrees.is_finite() && self.origin.spread_degrees >= 0.0) {
            return Err(GenerateError::InvalidConfig {
                message: format!(
                    "origin.spread_degrees must be a non-negative number, got {}",
                    self.origin.spread_degrees
                ),
            });
        }
        if !(-90.0..=90.0).contains(&self.origin.lat) || !(-180.0..=180.0).contains(&self.origin.lon)
        {
            return Err(GenerateError::InvalidConfig {
                message: format!(
                    "origin ({}, {}) is not a valid coordinate",
                    self.origin.lat, self.origin.lon
                ),
            });
        }
        if self.work_orders > 0 && self.assets.total() == 0 {
            return Err(GenerateError::InvalidConfig {
                message: "work orders need at least one asset to reference".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_matches_struct_default() {
        let parsed = GeneratorConfig::from_toml_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, GeneratorConfig::default());
        assert_eq!(parsed.assets.total(), 1050);
        assert_eq!(parsed.total_entities(), 1050 + 500 + 2000 + 200 + 50);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let parsed = GeneratorConfig::from_toml_str(
            "seed = 7\ncrews = 5\n[assets]\nroad = 3\n",
        )
        .unwrap();
        assert_eq!(parsed.seed, Some(7));
        assert_eq!(parsed.crews, 5);
        assert_eq!(parsed.assets.road, 3);
        assert_eq!(parsed.assets.drain, 250);
        assert_eq!(parsed.work_orders, 500);
    }

    #[test]
    fn rejects_work_orders_without_assets() {
        let err = GeneratorConfig::from_toml_str(
            "[assets]\nroad = 0\ndrain = 0\nstreetlight = 0\ntree = 0\nwaste = 0\nbuilding = 0\n",
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = GeneratorConfig::from_toml_str("crews = \"many\"").unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));
    }
}
