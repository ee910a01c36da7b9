//! File-backed preferences
//!
//! Loads the preference table once on open and rewrites the whole file on
//! every store. A missing file opens as an empty table.

use crate::config::PreferenceFile;
use crate::error::{ConfigError, SettingsError, SettingsResult};
use crate::store::PreferenceStore;
use jogkit_core::{thread_safe_rw, ThreadSafeRw};
use std::path::{Path, PathBuf};

/// Preference store persisted to a `.toml` or `.json` file
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    file: ThreadSafeRw<PreferenceFile>,
}

impl FilePreferences {
    /// Open the preference file at `path`
    pub fn open(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let file = if path.exists() {
            PreferenceFile::load_from_file(&path)
                .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?
        } else {
            tracing::debug!(
                "No preference file at {}, starting empty",
                path.display()
            );
            PreferenceFile::new()
        };

        Ok(Self {
            path,
            file: thread_safe_rw(file),
        })
    }

    /// Open the preference file in the default location
    pub fn open_default() -> SettingsResult<Self> {
        Self::open(Self::default_path()?)
    }

    /// Default preference file location: `<config dir>/jogkit/preferences.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform("no configuration directory".to_string())
        })?;
        Ok(base.join("jogkit").join("preferences.toml"))
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.file.read().get(key).unwrap_or(default)
    }

    fn put_int(&self, key: &str, value: i32) -> SettingsResult<()> {
        let mut file = self.file.write();
        file.set(key, value);
        file.save_to_file(&self.path)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", self.path.display(), e)))?;
        tracing::debug!("Stored preference {} = {}", key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_FEEDRATE, FEEDRATE_XY_KEY};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempdir().unwrap();
        let prefs = FilePreferences::open(dir.path().join("preferences.toml")).unwrap();
        assert_eq!(prefs.get_int(FEEDRATE_XY_KEY, DEFAULT_FEEDRATE), 480);
        assert!(!prefs.path().exists());
    }

    #[test]
    fn test_put_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jogkit").join("preferences.toml");

        let prefs = FilePreferences::open(&path).unwrap();
        prefs.put_int(FEEDRATE_XY_KEY, 1500).unwrap();
        assert!(path.exists());

        let reopened = FilePreferences::open(&path).unwrap();
        assert_eq!(reopened.get_int(FEEDRATE_XY_KEY, DEFAULT_FEEDRATE), 1500);
    }

    #[test]
    fn test_corrupted_file_is_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            FilePreferences::open(&path),
            Err(SettingsError::LoadError(_))
        ));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = tempdir().unwrap();
        let prefs = FilePreferences::open(dir.path().join("preferences.yaml")).unwrap();
        let err = prefs.put_int(FEEDRATE_XY_KEY, 10).unwrap_err();
        assert!(matches!(err, SettingsError::SaveError(_)));
        // The value is still visible for the rest of the session.
        assert_eq!(prefs.get_int(FEEDRATE_XY_KEY, DEFAULT_FEEDRATE), 10);
    }

    #[test]
    fn test_default_path_shape() {
        if let Ok(path) = FilePreferences::default_path() {
            assert!(path.ends_with("jogkit/preferences.toml"));
        }
    }
}
