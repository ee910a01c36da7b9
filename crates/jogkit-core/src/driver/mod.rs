//! Motion driver contract
//!
//! The jog controls talk to the machine only through [`MotionDriver`]. The
//! driver owns the physical motion queue, kinematics and firmware protocol;
//! implementations use interior mutability so a single driver can be shared
//! between the operator control thread and the status poller.

mod simulated;

pub use simulated::SimulatedDriver;

use crate::data::{AxisSet, Position};
use crate::error::DriverError;
use std::fmt;

/// Stateful motion device consumed by the jog controls
pub trait MotionDriver: Send + Sync {
    /// Snapshot of the current machine position
    fn current_position(&self) -> Position;

    /// Set the feedrate (mm/min) used by subsequent moves
    fn set_feedrate(&self, feedrate: f64) -> Result<(), DriverError>;

    /// Enqueue a move to `target`
    ///
    /// Fails with [`DriverError::Busy`] when the device cannot accept the
    /// command now.
    fn queue_point(&self, target: Position) -> Result<(), DriverError>;

    /// Redefine the coordinate origin so the current physical position reads
    /// as `origin`. This is not a move.
    fn set_current_position(&self, origin: Position) -> Result<(), DriverError>;

    /// Stop all motion immediately
    fn stop(&self) -> Result<(), DriverError>;

    /// Declared maximum feedrate per axis (an upper bound, not a position)
    fn maximum_feedrates(&self) -> Position;

    /// Axes present on the machine
    fn available_axes(&self) -> AxisSet;
}

/// A command accepted or rejected by a driver, as recorded by
/// [`SimulatedDriver`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverCommand {
    /// `set_feedrate`
    SetFeedrate(f64),
    /// `queue_point`
    QueuePoint(Position),
    /// `set_current_position`
    SetCurrentPosition(Position),
    /// `stop`
    Stop,
}

impl DriverCommand {
    /// Check if this command moves the machine
    pub fn is_motion(&self) -> bool {
        matches!(self, DriverCommand::QueuePoint(_))
    }
}

impl fmt::Display for DriverCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverCommand::SetFeedrate(rate) => write!(f, "set feedrate {} mm/min", rate),
            DriverCommand::QueuePoint(target) => write!(f, "queue point {}", target),
            DriverCommand::SetCurrentPosition(origin) => write!(f, "set position {}", origin),
            DriverCommand::Stop => write!(f, "stop"),
        }
    }
}
