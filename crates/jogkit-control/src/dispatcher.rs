//! Jog command dispatcher
//!
//! Turns [`JogAction`]s into motion driver calls. A driver refusal is logged
//! once and the action is dropped; nothing is retried or queued, and no
//! dispatcher state changes on a failed command.

use crate::action::JogAction;
use crate::catalog::JogDistanceCatalog;
use crate::feedrate::FeedrateChannel;
use jogkit_core::{AxisGroup, AxisId, AxisSet, DriverError, InputError, MotionDriver, Position};
use jogkit_settings::PreferenceStore;
use std::fmt;
use std::sync::Arc;

/// Result of handling one action
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// A move was queued
    Moved {
        /// Position the machine was sent to
        target: Position,
        /// Feedrate set before the move, in mm/min
        feedrate: u32,
    },
    /// The origin was redefined at the current position
    OriginReset,
    /// Motion was stopped
    Stopped,
    /// A new jog distance is active, in millimeters
    JogDistanceSelected(f64),
    /// A feedrate channel committed a new value
    FeedrateChanged {
        /// Channel that changed
        group: AxisGroup,
        /// Committed feedrate, in mm/min
        value: u32,
    },
    /// Nothing was done
    Ignored,
    /// The driver refused the command; it was not retried
    Dropped(DriverError),
}

impl DispatchOutcome {
    /// Check if the driver refused the command
    pub fn is_dropped(&self) -> bool {
        matches!(self, DispatchOutcome::Dropped(_))
    }
}

/// Maps operator actions onto the motion driver
pub struct JogCommandDispatcher<D: MotionDriver> {
    driver: Arc<D>,
    axes: AxisSet,
    catalog: JogDistanceCatalog,
    xy: FeedrateChannel,
    z: FeedrateChannel,
}

impl<D: MotionDriver> JogCommandDispatcher<D> {
    /// Create a dispatcher with the standard jog distances
    ///
    /// Feedrate bounds are read from the driver once, here.
    pub fn new(driver: Arc<D>, prefs: Arc<dyn PreferenceStore>) -> Self {
        let maximums = driver.maximum_feedrates();
        let axes = driver.available_axes();
        Self {
            xy: FeedrateChannel::new(AxisGroup::Xy, &maximums, prefs.clone()),
            z: FeedrateChannel::new(AxisGroup::Z, &maximums, prefs),
            catalog: JogDistanceCatalog::standard(),
            axes,
            driver,
        }
    }

    /// Builder method to replace the jog distance catalog
    pub fn with_catalog(mut self, catalog: JogDistanceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Parse and handle a panel command name
    ///
    /// Unknown names are logged and ignored.
    pub fn handle_command(&mut self, name: &str, selection: Option<&str>) -> DispatchOutcome {
        match JogAction::from_command(name, selection) {
            Ok(action) => self.handle(action),
            Err(e) => self.reject_input(e),
        }
    }

    /// Log operator input that could not be turned into an action
    ///
    /// Unknown action names are warned about; other input errors are routine.
    pub fn reject_input(&self, error: InputError) -> DispatchOutcome {
        match &error {
            InputError::UnrecognizedAction { name } => {
                tracing::warn!("Unknown Action Event: {}", name)
            }
            _ => tracing::debug!("Ignoring input: {}", error),
        }
        DispatchOutcome::Ignored
    }

    /// Handle one action to completion
    pub fn handle(&mut self, action: JogAction) -> DispatchOutcome {
        tracing::debug!("Jog action: {}", action);

        let result = match action {
            JogAction::Jog { axis, direction } => {
                let step = direction.sign() * self.catalog.active_distance();
                self.move_axis(axis, |position| position.offset(axis, step))
            }
            JogAction::Center(axis) => {
                self.move_axis(axis, |position| position.with_axis(axis, 0.0))
            }
            JogAction::Zero => self.zero(),
            JogAction::Stop => self.stop(),
            JogAction::SelectJogDistance(label) => {
                return match self.catalog.select(&label) {
                    Ok(distance) => DispatchOutcome::JogDistanceSelected(distance),
                    Err(e) => self.reject_input(e),
                };
            }
            JogAction::SetFeedrate { group, value } => {
                let value = self.feedrate_mut(group).set_from_continuous_control(value);
                return DispatchOutcome::FeedrateChanged { group, value };
            }
            JogAction::CommitFeedrateText { group, text } => {
                let committed = self.feedrate_mut(group).set_from_text(&text);
                return self.feedrate_outcome(group, committed);
            }
            JogAction::FeedrateFocusLost(group) => {
                let committed = self.feedrate_mut(group).on_focus_lost();
                return self.feedrate_outcome(group, committed);
            }
        };

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                if e.is_busy() {
                    tracing::error!("Could not execute command; machine busy.");
                } else {
                    tracing::error!("Could not execute command: {}", e);
                }
                DispatchOutcome::Dropped(e)
            }
        }
    }

    /// Active jog distances
    pub fn catalog(&self) -> &JogDistanceCatalog {
        &self.catalog
    }

    /// Feedrate channel of an axis group
    pub fn feedrate(&self, group: AxisGroup) -> &FeedrateChannel {
        match group {
            AxisGroup::Xy => &self.xy,
            AxisGroup::Z => &self.z,
        }
    }

    /// Mutable feedrate channel of an axis group, for direct text editing
    pub fn feedrate_mut(&mut self, group: AxisGroup) -> &mut FeedrateChannel {
        match group {
            AxisGroup::Xy => &mut self.xy,
            AxisGroup::Z => &mut self.z,
        }
    }

    /// Driver commands are sent to
    pub fn driver(&self) -> &Arc<D> {
        &self.driver
    }

    fn move_axis(
        &self,
        axis: AxisId,
        target: impl FnOnce(Position) -> Position,
    ) -> Result<DispatchOutcome, DriverError> {
        let group = match AxisGroup::for_axis(axis) {
            Some(group) if self.axes.contains(axis) => group,
            _ => {
                tracing::warn!("Cannot jog axis {} from the jog panel", axis);
                return Ok(DispatchOutcome::Ignored);
            }
        };

        let target = target(self.driver.current_position());
        let feedrate = self.feedrate(group).current();

        tracing::debug!("Set feedrate {} mm/min", feedrate);
        self.driver.set_feedrate(f64::from(feedrate))?;
        tracing::debug!("Queue point {}", target);
        self.driver.queue_point(target)?;

        Ok(DispatchOutcome::Moved { target, feedrate })
    }

    fn zero(&self) -> Result<DispatchOutcome, DriverError> {
        self.driver.set_current_position(Position::new())?;
        tracing::info!("Origin set to current position");
        Ok(DispatchOutcome::OriginReset)
    }

    fn stop(&self) -> Result<DispatchOutcome, DriverError> {
        self.driver.stop()?;
        tracing::info!("Motion stopped");
        Ok(DispatchOutcome::Stopped)
    }

    fn feedrate_outcome(
        &self,
        group: AxisGroup,
        committed: Result<Option<u32>, InputError>,
    ) -> DispatchOutcome {
        match committed {
            Ok(Some(value)) => DispatchOutcome::FeedrateChanged { group, value },
            Ok(None) => DispatchOutcome::Ignored,
            Err(e) => self.reject_input(e),
        }
    }
}

impl<D: MotionDriver> fmt::Debug for JogCommandDispatcher<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JogCommandDispatcher")
            .field("axes", &self.axes)
            .field("catalog", &self.catalog)
            .field("xy", &self.xy)
            .field("z", &self.z)
            .finish_non_exhaustive()
    }
}
