//! Simulated motion driver
//!
//! Moves instantly and keeps a journal of every command it sees. It can be
//! switched into a busy state in which it refuses all commands, or one in
//! which only queued points are refused while a previous move runs.

use super::{DriverCommand, MotionDriver};
use crate::data::{AxisSet, Position};
use crate::error::DriverError;
use crate::types::{thread_safe_rw, thread_safe_vec, ThreadSafeRw, ThreadSafeVec};

#[derive(Debug, Clone, Default)]
struct SimulatedState {
    position: Position,
    feedrate: Option<f64>,
    busy: bool,
    queue_busy: bool,
}

impl SimulatedState {
    fn refuses(&self, command: &DriverCommand) -> bool {
        self.busy || (self.queue_busy && command.is_motion())
    }
}

/// In-process driver with instantaneous motion
#[derive(Debug, Clone)]
pub struct SimulatedDriver {
    axes: AxisSet,
    maximum_feedrates: Position,
    state: ThreadSafeRw<SimulatedState>,
    accepted: ThreadSafeVec<DriverCommand>,
    rejected: ThreadSafeVec<DriverCommand>,
}

impl SimulatedDriver {
    /// Create a 3-axis driver at the origin, limited to 5000 mm/min on X/Y
    /// and 1000 mm/min on Z
    pub fn new() -> Self {
        Self {
            axes: AxisSet::xyz(),
            maximum_feedrates: Position::from_xyz(5000.0, 5000.0, 1000.0),
            state: thread_safe_rw(SimulatedState::default()),
            accepted: thread_safe_vec(),
            rejected: thread_safe_vec(),
        }
    }

    /// Builder method to set the axes present on the machine
    pub fn with_axes(mut self, axes: AxisSet) -> Self {
        self.axes = axes;
        self
    }

    /// Builder method to set the declared maximum feedrates
    pub fn with_maximum_feedrates(mut self, maximums: Position) -> Self {
        self.maximum_feedrates = maximums;
        self
    }

    /// Builder method to set the starting position
    pub fn with_position(self, position: Position) -> Self {
        self.state.write().position = position;
        self
    }

    /// Move the machine without going through the command path, as if an
    /// external job moved it
    pub fn set_position(&self, position: Position) {
        self.state.write().position = position;
    }

    /// Make the device refuse (`true`) or accept (`false`) commands
    pub fn set_busy(&self, busy: bool) {
        self.state.write().busy = busy;
    }

    /// Make the device refuse (`true`) or accept (`false`) queued points
    /// only, accepting every other command
    pub fn set_queue_busy(&self, busy: bool) {
        self.state.write().queue_busy = busy;
    }

    /// Last feedrate accepted by the device
    pub fn feedrate(&self) -> Option<f64> {
        self.state.read().feedrate
    }

    /// Commands the device accepted, oldest first
    pub fn journal(&self) -> Vec<DriverCommand> {
        self.accepted.lock().clone()
    }

    /// Commands the device refused, oldest first
    pub fn rejected(&self) -> Vec<DriverCommand> {
        self.rejected.lock().clone()
    }

    fn execute(
        &self,
        command: DriverCommand,
        apply: impl FnOnce(&mut SimulatedState),
    ) -> Result<(), DriverError> {
        let mut state = self.state.write();
        if state.refuses(&command) {
            tracing::trace!("Simulated driver busy, refusing: {}", command);
            self.rejected.lock().push(command);
            return Err(DriverError::Busy);
        }
        apply(&mut state);
        tracing::trace!("Simulated driver: {}", command);
        self.accepted.lock().push(command);
        Ok(())
    }

    fn validate_target(target: &Position) -> Result<(), DriverError> {
        if target.coords().iter().all(|c| c.is_finite()) {
            Ok(())
        } else {
            Err(DriverError::CommandRejected {
                reason: format!("non-finite target {}", target),
            })
        }
    }
}

impl Default for SimulatedDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionDriver for SimulatedDriver {
    fn current_position(&self) -> Position {
        self.state.read().position
    }

    fn set_feedrate(&self, feedrate: f64) -> Result<(), DriverError> {
        if !feedrate.is_finite() || feedrate <= 0.0 {
            return Err(DriverError::CommandRejected {
                reason: format!("invalid feedrate {}", feedrate),
            });
        }
        self.execute(DriverCommand::SetFeedrate(feedrate), |state| {
            state.feedrate = Some(feedrate);
        })
    }

    fn queue_point(&self, target: Position) -> Result<(), DriverError> {
        Self::validate_target(&target)?;
        self.execute(DriverCommand::QueuePoint(target), |state| {
            state.position = target;
        })
    }

    fn set_current_position(&self, origin: Position) -> Result<(), DriverError> {
        Self::validate_target(&origin)?;
        self.execute(DriverCommand::SetCurrentPosition(origin), |state| {
            state.position = origin;
        })
    }

    fn stop(&self) -> Result<(), DriverError> {
        self.execute(DriverCommand::Stop, |_| {})
    }

    fn maximum_feedrates(&self) -> Position {
        self.maximum_feedrates
    }

    fn available_axes(&self) -> AxisSet {
        self.axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AxisId;

    #[test]
    fn test_queue_point_moves_instantly() {
        let driver = SimulatedDriver::new();
        let target = Position::from_xyz(10.0, 0.0, -2.5);
        driver.queue_point(target).unwrap();
        assert_eq!(driver.current_position(), target);
        assert_eq!(driver.journal(), vec![DriverCommand::QueuePoint(target)]);
    }

    #[test]
    fn test_busy_refuses_everything() {
        let driver = SimulatedDriver::new().with_position(Position::from_xyz(1.0, 2.0, 3.0));
        driver.set_busy(true);

        assert_eq!(driver.set_feedrate(100.0), Err(DriverError::Busy));
        assert_eq!(driver.queue_point(Position::new()), Err(DriverError::Busy));
        assert_eq!(driver.stop(), Err(DriverError::Busy));

        assert!(driver.journal().is_empty());
        assert_eq!(driver.rejected().len(), 3);
        assert_eq!(driver.current_position(), Position::from_xyz(1.0, 2.0, 3.0));
        assert_eq!(driver.feedrate(), None);
    }

    #[test]
    fn test_queue_busy_refuses_points_only() {
        let driver = SimulatedDriver::new();
        driver.set_queue_busy(true);

        let target = Position::from_xyz(5.0, 0.0, 0.0);
        assert_eq!(driver.set_feedrate(300.0), Ok(()));
        assert_eq!(driver.queue_point(target), Err(DriverError::Busy));
        assert_eq!(driver.stop(), Ok(()));

        assert_eq!(
            driver.journal(),
            vec![DriverCommand::SetFeedrate(300.0), DriverCommand::Stop]
        );
        assert_eq!(driver.rejected(), vec![DriverCommand::QueuePoint(target)]);
        assert_eq!(driver.current_position(), Position::new());
        assert_eq!(driver.feedrate(), Some(300.0));

        driver.set_queue_busy(false);
        assert_eq!(driver.queue_point(target), Ok(()));
        assert_eq!(driver.current_position(), target);
    }

    #[test]
    fn test_set_current_position_redefines_origin() {
        let driver = SimulatedDriver::new().with_position(Position::from_xyz(12.0, 7.0, 1.0));
        driver.set_current_position(Position::new()).unwrap();
        assert_eq!(driver.current_position(), Position::new());
        assert!(!driver.journal()[0].is_motion());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let driver = SimulatedDriver::new();
        assert!(matches!(
            driver.set_feedrate(0.0),
            Err(DriverError::CommandRejected { .. })
        ));
        let bad = Position::new().with_axis(AxisId::X, f64::NAN);
        assert!(matches!(
            driver.queue_point(bad),
            Err(DriverError::CommandRejected { .. })
        ));
        assert!(driver.journal().is_empty());
    }

    #[test]
    fn test_builder_configuration() {
        let driver = SimulatedDriver::new()
            .with_axes(AxisSet::all())
            .with_maximum_feedrates(Position::from_xyz(800.0, 900.0, 100.0));
        assert_eq!(driver.available_axes().len(), 5);
        assert_eq!(driver.maximum_feedrates().y(), 900.0);
    }
}
