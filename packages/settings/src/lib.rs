#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Persisted user-interface preferences.
//!
//! Three values survive restarts: display density, the reduced-motion flag,
//! and whether the sidebar is collapsed. They are stored as one JSON blob
//! under the fixed key [`SETTINGS_KEY`], wrapped in a versioned envelope
//! (`{"state": {...}, "version": 0}`). Every setter writes the blob
//! through before returning.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Storage key for the preference blob.
pub const SETTINGS_KEY: &str = "cmc-app-settings";

/// Envelope version written by this crate.
pub const SETTINGS_VERSION: u32 = 0;

/// Errors that can occur while loading or saving preferences.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored blob is not valid JSON or has the wrong shape.
    #[error("Corrupt settings blob: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The stored blob was written by an unknown envelope version.
    #[error("Unsupported settings version {found} (expected {SETTINGS_VERSION})")]
    UnsupportedVersion {
        /// Version found in the blob.
        found: u32,
    },
}

/// Table row spacing.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Density {
    /// Roomy rows
    #[default]
    Comfortable,
    /// Tight rows
    Compact,
}

/// The persisted preference values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Table row spacing.
    pub density: Density,
    /// Suppress animations.
    pub reduced_motion: bool,
    /// Sidebar collapsed to icons.
    pub sidebar_collapsed: bool,
}

/// A partial update: absent fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    /// New density.
    pub density: Option<Density>,
    /// New reduced-motion flag.
    pub reduced_motion: Option<bool>,
    /// New sidebar flag.
    pub sidebar_collapsed: Option<bool>,
}

impl Preferences {
    /// Returns a copy with `patch` applied.
    #[must_use]
    pub fn patched(self, patch: PreferencesPatch) -> Self {
        Self {
            density: patch.density.unwrap_or(self.density),
            reduced_motion: patch.reduced_motion.unwrap_or(self.reduced_motion),
            sidebar_collapsed: patch.sidebar_collapsed.unwrap_or(self.sidebar_collapsed),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    state: Preferences,
    #[serde(default)]
    version: u32,
}

/// Preferences bound to their blob on disk.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    prefs: Preferences,
}

impl SettingsStore {
    /// Path of the preference blob inside `dir`.
    #[must_use]
    pub fn blob_path(dir: &Path) -> PathBuf {
        dir.join(format!("{SETTINGS_KEY}.json"))
    }

    /// Loads the store from `dir`. A missing blob yields defaults and is not
    /// written until the first change.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the blob exists but cannot be read or
    /// parsed.
    pub fn load(dir: &Path) -> Result<Self, SettingsError> {
        let path = Self::blob_path(dir);
        let prefs = match std::fs::read_to_string(&path) {
            Ok(text) => {
                let envelope: Envelope = serde_json::from_str(&text)?;
                if envelope.version != SETTINGS_VERSION {
                    return Err(SettingsError::UnsupportedVersion {
                        found: envelope.version,
                    });
                }
                envelope.state
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, prefs })
    }

    /// Like [`Self::load`], but falls back to defaults (with a warning)
    /// when the blob is unreadable.
    #[must_use]
    pub fn load_or_default(dir: &Path) -> Self {
        Self::load(dir).unwrap_or_else(|e| {
            log::warn!("Ignoring settings at {}: {e}", Self::blob_path(dir).display());
            Self {
                path: Self::blob_path(dir),
                prefs: Preferences::default(),
            }
        })
    }

    /// Current preferences.
    #[must_use]
    pub const fn get(&self) -> Preferences {
        self.prefs
    }

    /// Where the blob lives.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sets the display density.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the blob cannot be written.
    pub fn set_density(&mut self, density: Density) -> Result<(), SettingsError> {
        self.prefs.density = density;
        self.save()
    }

    /// Sets the reduced-motion flag.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the blob cannot be written.
    pub fn set_reduced_motion(&mut self, reduced: bool) -> Result<(), SettingsError> {
        self.prefs.reduced_motion = reduced;
        self.save()
    }

    /// Sets the sidebar-collapsed flag.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the blob cannot be written.
    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) -> Result<(), SettingsError> {
        self.prefs.sidebar_collapsed = collapsed;
        self.save()
    }

    /// Applies a partial update and returns the resulting preferences.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the blob cannot be written.
    pub fn update(&mut self, patch: PreferencesPatch) -> Result<Preferences, SettingsError> {
        self.prefs = self.prefs.patched(patch);
        self.save()?;
        Ok(self.prefs)
    }

    /// Restores defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the blob cannot be written.
    pub fn reset(&mut self) -> Result<(), SettingsError> {
        self.prefs = Preferences::default();
        self.save()
    }

    /// Writes the blob via a temporary file and rename, so readers never
    /// see a half-written blob.
    fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let envelope = Envelope {
            state: self.prefs,
            version: SETTINGS_VERSION,
        };
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string(&envelope)?)?;
        std::fs::rename(&tmp, &self.path)?;
        log::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cmc_infra_settings_{name}_{}",
            std::process::id()
        ));
        std::fs::remove_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn missing_blob_yields_defaults() {
        let dir = scratch_dir("missing");
        let store = SettingsStore::load(&dir).unwrap();
        assert_eq!(store.get(), Preferences::default());
        assert_eq!(store.get().density, Density::Comfortable);
        assert!(!store.path().exists());
    }

    #[test]
    fn setters_persist_across_reopen() {
        let dir = scratch_dir("persist");
        let mut store = SettingsStore::load(&dir).unwrap();
        store.set_density(Density::Compact).unwrap();
        store.set_reduced_motion(true).unwrap();
        store.set_sidebar_collapsed(true).unwrap();

        let reopened = SettingsStore::load(&dir).unwrap();
        assert_eq!(
            reopened.get(),
            Preferences {
                density: Density::Compact,
                reduced_motion: true,
                sidebar_collapsed: true,
            }
        );
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn blob_uses_versioned_envelope() {
        let dir = scratch_dir("envelope");
        let mut store = SettingsStore::load(&dir).unwrap();
        store.set_sidebar_collapsed(true).unwrap();
        let text = std::fs::read_to_string(SettingsStore::blob_path(&dir)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "state": {
                    "density": "comfortable",
                    "reducedMotion": false,
                    "sidebarCollapsed": true
                },
                "version": 0
            })
        );
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let dir = scratch_dir("patch");
        let mut store = SettingsStore::load(&dir).unwrap();
        store.set_reduced_motion(true).unwrap();
        let prefs = store
            .update(PreferencesPatch {
                density: Some(Density::Compact),
                ..PreferencesPatch::default()
            })
            .unwrap();
        assert_eq!(prefs.density, Density::Compact);
        assert!(prefs.reduced_motion);
        assert!(!prefs.sidebar_collapsed);

        store.reset().unwrap();
        assert_eq!(
            SettingsStore::load(&dir).unwrap().get(),
            Preferences::default()
        );
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn corrupt_blob_is_an_error_but_load_or_default_recovers() {
        let dir = scratch_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(SettingsStore::blob_path(&dir), "{not json").unwrap();

        let err = SettingsStore::load(&dir).unwrap_err();
        assert!(matches!(err, SettingsError::Corrupt(_)));
        assert_eq!(
            SettingsStore::load_or_default(&dir).get(),
            Preferences::default()
        );
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unknown_version_is_rejected() {
        let dir = scratch_dir("version");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            SettingsStore::blob_path(&dir),
            r#"{"state":{"density":"compact"},"version":3}"#,
        )
        .unwrap();
        let err = SettingsStore::load(&dir).unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedVersion { found: 3 }));
        std::fs::remove_dir_all(&dir).ok();
    }
}
