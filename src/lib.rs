//! # jogkit
//!
//! Jog panel logic for motion-control front ends:
//! - Incremental jogs, recentering, origin redefinition and stop
//! - Per-group feedrate channels (XY and Z) with persisted values
//! - A position readout kept in step with the motion driver
//!
//! ## Architecture
//!
//! jogkit is organized as a workspace with multiple crates:
//!
//! 1. **jogkit-core** - Axis and position model, motion driver contract, errors
//! 2. **jogkit-settings** - Preference store contract and file-backed preferences
//! 3. **jogkit-control** - Jog dispatcher, feedrate channels, display sync, poller
//! 4. **jogkit** - Console binary over the simulated driver

pub use jogkit_control::{
    format_coordinate, spawn_position_poller, DispatchOutcome, DisplayedPosition,
    FeedrateChannel, JogAction, JogCommandDispatcher, JogDistanceCatalog, PollerHandle,
    PositionDisplaySync,
};

pub use jogkit_core::{
    AxisGroup, AxisId, AxisSet, DriverError, Error, InputError, JogDirection, MotionDriver,
    Position, Result, SimulatedDriver,
};

pub use jogkit_settings::{FilePreferences, MemoryPreferences, PreferenceStore, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, leaving stdout to the console session
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
