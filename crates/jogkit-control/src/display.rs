//! Position readout
//!
//! [`PositionDisplaySync::refresh`] is the only operation in the jog controls
//! that may be called from another thread while actions are being handled.
//! Refreshes are serialized by one lock held across the driver read and the
//! overwrite of the display set.

use jogkit_core::{AxisId, AxisSet, MotionDriver, Position};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Format a coordinate with at most one decimal place
///
/// Matches a `###.#` pattern: a trailing `.0` is dropped, so values that
/// round to negative zero read as `-0`.
pub fn format_coordinate(value: f64) -> String {
    let text = format!("{:.1}", value);
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// Formatted per-axis readout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayedPosition {
    values: BTreeMap<AxisId, String>,
}

impl DisplayedPosition {
    /// Format every axis in `axes` from one snapshot
    pub fn from_snapshot(position: &Position, axes: AxisSet) -> Self {
        let values = axes
            .iter()
            .map(|axis| (axis, format_coordinate(position.axis(axis))))
            .collect();
        Self { values }
    }

    /// Readout of one axis, if it is displayed
    pub fn get(&self, axis: AxisId) -> Option<&str> {
        self.values.get(&axis).map(String::as_str)
    }

    /// All readouts in axis order
    pub fn iter(&self) -> impl Iterator<Item = (AxisId, &str)> {
        self.values.iter().map(|(axis, text)| (*axis, text.as_str()))
    }

    /// Number of displayed axes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing has been displayed yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for DisplayedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (axis, text)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{}", axis, text)?;
        }
        Ok(())
    }
}

/// Keeps the position readout in step with the driver
pub struct PositionDisplaySync<D: MotionDriver> {
    driver: Arc<D>,
    axes: AxisSet,
    display: Mutex<DisplayedPosition>,
}

impl<D: MotionDriver> PositionDisplaySync<D> {
    /// Create a sync for the axes present on the machine, with empty slots
    pub fn new(driver: Arc<D>) -> Self {
        let axes = driver.available_axes();
        Self {
            driver,
            axes,
            display: Mutex::new(DisplayedPosition::default()),
        }
    }

    /// Fetch one snapshot and overwrite every axis readout from it
    ///
    /// Blocks while another refresh is in progress. The snapshot is trusted
    /// as-is.
    pub fn refresh(&self) -> DisplayedPosition {
        let mut shown = self.display.lock();
        let position = self.driver.current_position();
        *shown = DisplayedPosition::from_snapshot(&position, self.axes);
        tracing::trace!("Position display: {}", *shown);
        shown.clone()
    }

    /// Last refreshed readout
    pub fn displayed(&self) -> DisplayedPosition {
        self.display.lock().clone()
    }

    /// Axes shown in the readout
    pub fn axes(&self) -> AxisSet {
        self.axes
    }

    /// Driver the readout is taken from
    pub fn driver(&self) -> &Arc<D> {
        &self.driver
    }
}

impl<D: MotionDriver> fmt::Debug for PositionDisplaySync<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionDisplaySync")
            .field("axes", &self.axes)
            .field("display", &*self.display.lock())
            .finish_non_exhaustive()
    }
}
