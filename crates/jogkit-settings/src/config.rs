//! Preference file format and well-known keys
//!
//! Preferences are a flat table of integer values keyed by dotted names. The
//! table is stored as JSON or TOML depending on the file extension.

use crate::error::{ConfigError, SettingsResult};
use jogkit_core::AxisGroup;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Preference key of the XY jog feedrate
pub const FEEDRATE_XY_KEY: &str = "controlpanel.feedrate.xy";

/// Preference key of the Z jog feedrate
pub const FEEDRATE_Z_KEY: &str = "controlpanel.feedrate.z";

/// Jog feedrate (mm/min) used when no preference has been stored
pub const DEFAULT_FEEDRATE: i32 = 480;

/// Preference key holding the jog feedrate of an axis group
pub fn feedrate_key(group: AxisGroup) -> &'static str {
    match group {
        AxisGroup::Xy => FEEDRATE_XY_KEY,
        AxisGroup::Z => FEEDRATE_Z_KEY,
    }
}

/// Serializable preference table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceFile {
    /// Stored integer preferences
    #[serde(default)]
    pub preferences: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn for_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(FileFormat::Json),
            Some("toml") => Ok(FileFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

impl PreferenceFile {
    /// Create an empty preference table
    pub fn new() -> Self {
        Self::default()
    }

    /// Load preferences from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = FileFormat::for_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let file: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };
        Ok(file)
    }

    /// Save preferences to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let format = FileFormat::for_path(path)?;

        let content = match format {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Look up an integer preference
    pub fn get(&self, key: &str) -> Option<i32> {
        self.preferences.get(key).copied()
    }

    /// Store an integer preference
    pub fn set(&mut self, key: &str, value: i32) {
        self.preferences.insert(key.to_string(), value);
    }
}
