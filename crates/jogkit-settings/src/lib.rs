//! jogkit Settings Crate
//!
//! Handles preference storage for the jog controls: the load/store contract,
//! an in-memory store, and a file-backed store.

pub mod config;
pub mod error;
pub mod persistence;
pub mod store;

pub use config::{
    feedrate_key, PreferenceFile, DEFAULT_FEEDRATE, FEEDRATE_XY_KEY, FEEDRATE_Z_KEY,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use persistence::FilePreferences;
pub use store::{MemoryPreferences, PreferenceStore};
