//! Preference store contract
//!
//! The jog controls only need integer load/store by key. Implementations use
//! interior mutability so a store can be shared behind an `Arc`.

use crate::config::PreferenceFile;
use crate::error::SettingsResult;
use jogkit_core::{thread_safe_rw, ThreadSafeRw};

/// Integer preference storage
pub trait PreferenceStore: Send + Sync {
    /// Stored value for `key`, or `default` when nothing is stored
    fn get_int(&self, key: &str, default: i32) -> i32;

    /// Store `value` under `key`
    fn put_int(&self, key: &str, value: i32) -> SettingsResult<()>;
}

/// Volatile preference store
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: ThreadSafeRw<PreferenceFile>,
}

impl MemoryPreferences {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            values: thread_safe_rw(PreferenceFile::new()),
        }
    }

    /// Create a store pre-populated with `(key, value)` pairs
    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, i32)>) -> Self {
        let store = Self::new();
        {
            let mut file = store.values.write();
            for (key, value) in values {
                file.set(key, value);
            }
        }
        store
    }

    /// Stored value for `key`, if any
    pub fn get(&self, key: &str) -> Option<i32> {
        self.values.read().get(key)
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.get(key).unwrap_or(default)
    }

    fn put_int(&self, key: &str, value: i32) -> SettingsResult<()> {
        self.values.write().set(key, value);
        Ok(())
    }
}
