//! Declarative configuration, split into one file per category.
//!
//! [`Settings`] aggregates the categories. It is filled from defaults, then
//! from a `code-layout.toml` found above the scanned path, then from a JSON
//! payload (the CLI `--config-json` flag or an embedding editor). Every
//! source goes through the same `*Patch` structs so unknown keys are ignored
//! and numeric values are clamped in one place.

pub(crate) mod logging;
pub(crate) mod outline;
pub(crate) mod scan;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use logging::{LogLevel, LoggingSettings};
use logging::LoggingSettingsPatch;
pub use outline::OutlineSettings;
use outline::OutlineSettingsPatch;
pub use scan::{
    DEFAULT_EXTENSIONS, MAX_MAX_FILE_SIZE_KB, MAX_SCAN_CONCURRENCY, MIN_MAX_FILE_SIZE_KB, MIN_SCAN_CONCURRENCY,
    ScanSettings, language_for,
};
use scan::ScanSettingsPatch;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const SETTINGS_SECTION_KEY: &str = "code-layout";
pub const CONFIG_FILENAME: &str = "code-layout.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub outline: OutlineSettings,
    pub scan: ScanSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn from_json_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    /// Layer a JSON payload over `self`. Malformed sections are skipped.
    pub fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<SettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    /// Strict variant of [`Settings::merged_with_payload`] for a payload
    /// given as text: a type mismatch is an error instead of being skipped.
    pub fn merged_with_json_str(
        &self,
        text: &str,
    ) -> Result<Self, ConfigError> {
        let payload: Value = serde_json::from_str(text)?;
        let mut merged = self.clone();
        for candidate in payload_candidates(&payload) {
            merged.apply_patch(serde_json::from_value::<SettingsPatch>(candidate)?);
        }
        merged.normalize();
        Ok(merged)
    }

    pub fn from_toml_str(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        let patch: SettingsPatch = toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::default();
        settings.apply_patch(patch);
        settings.normalize();
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Settings for a scan rooted at `start`: the nearest `code-layout.toml`
    /// if there is one, defaults otherwise.
    pub fn discover(start: &Path) -> Result<Self, ConfigError> {
        match find_config_file(start) {
            Some(path) => {
                debug!("[config] using {}", path.display());
                Self::load(&path)
            },
            None => Ok(Self::default()),
        }
    }

    fn apply_patch(
        &mut self,
        patch: SettingsPatch,
    ) {
        if let Some(p) = patch.outline {
            self.outline.apply_patch(p);
        }
        if let Some(p) = patch.scan {
            self.scan.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.scan.normalize();
        self.logging.normalize();
    }
}

/// Walks parent directories from `start` looking for `code-layout.toml`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct SettingsPatch {
    outline: Option<OutlineSettingsPatch>,
    scan: Option<ScanSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());
    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }
    candidates
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
