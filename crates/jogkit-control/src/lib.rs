//! # jogkit Control
//!
//! Jog panel logic: the jog distance catalog, per-group feedrate channels,
//! the position readout, and the dispatcher that turns operator actions into
//! motion driver commands.
//!
//! Actions are handled one at a time on a single control thread.
//! [`PositionDisplaySync::refresh`] is the only operation meant to be called
//! concurrently, typically from [`spawn_position_poller`].

pub mod action;
pub mod catalog;
pub mod dispatcher;
pub mod display;
pub mod feedrate;
pub mod poller;

pub use action::{JogAction, JOG_SIZE_COMMAND};
pub use catalog::{
    parse_jog_label, JogDistance, JogDistanceCatalog, DEFAULT_JOG_INDEX, STANDARD_JOG_DISTANCES,
};
pub use dispatcher::{DispatchOutcome, JogCommandDispatcher};
pub use display::{format_coordinate, DisplayedPosition, PositionDisplaySync};
pub use feedrate::{FeedrateChannel, MIN_FEEDRATE};
pub use poller::{spawn_position_poller, PollerHandle, MIN_POLL_PERIOD};
