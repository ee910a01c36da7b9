//! Data models for axes and positions
//!
//! This module provides:
//! - Axis identity for the 5-axis machine model (X, Y, Z, A, B)
//! - Axis sets for the axes a machine actually exposes
//! - Positions with one coordinate slot per axis
//! - Axis groups sharing one feedrate control

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of coordinate slots in a [`Position`]
pub const AXIS_COUNT: usize = 5;

/// Controllable machine axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AxisId {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
    /// A axis (4th axis)
    A,
    /// B axis (5th axis)
    B,
}

impl AxisId {
    /// All axes in coordinate order
    pub const ALL: [AxisId; AXIS_COUNT] = [AxisId::X, AxisId::Y, AxisId::Z, AxisId::A, AxisId::B];

    /// Coordinate slot of this axis inside a [`Position`]
    pub fn index(self) -> usize {
        match self {
            AxisId::X => 0,
            AxisId::Y => 1,
            AxisId::Z => 2,
            AxisId::A => 3,
            AxisId::B => 4,
        }
    }

    /// Single-letter axis name
    pub fn name(self) -> &'static str {
        match self {
            AxisId::X => "X",
            AxisId::Y => "Y",
            AxisId::Z => "Z",
            AxisId::A => "A",
            AxisId::B => "B",
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AxisId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(AxisId::X),
            "Y" => Ok(AxisId::Y),
            "Z" => Ok(AxisId::Z),
            "A" => Ok(AxisId::A),
            "B" => Ok(AxisId::B),
            _ => Err(format!("Unknown axis: {}", s)),
        }
    }
}

/// Set of axes present on a machine
///
/// Iterates in coordinate order (X, Y, Z, A, B).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisSet(u8);

impl AxisSet {
    /// Empty axis set
    pub fn empty() -> Self {
        Self(0)
    }

    /// The three linear axes
    pub fn xyz() -> Self {
        [AxisId::X, AxisId::Y, AxisId::Z].into_iter().collect()
    }

    /// Every axis of the 5-axis model
    pub fn all() -> Self {
        AxisId::ALL.into_iter().collect()
    }

    /// Add an axis to the set
    pub fn insert(&mut self, axis: AxisId) {
        self.0 |= axis.bit();
    }

    /// Check if the set contains an axis
    pub fn contains(&self, axis: AxisId) -> bool {
        self.0 & axis.bit() != 0
    }

    /// Number of axes in the set
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Check if the set has no axes
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate the axes in coordinate order
    pub fn iter(&self) -> impl Iterator<Item = AxisId> + '_ {
        AxisId::ALL.into_iter().filter(move |axis| self.contains(*axis))
    }
}

impl FromIterator<AxisId> for AxisSet {
    fn from_iter<I: IntoIterator<Item = AxisId>>(iter: I) -> Self {
        let mut set = AxisSet::empty();
        for axis in iter {
            set.insert(axis);
        }
        set
    }
}

/// Direction of an incremental jog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JogDirection {
    /// Towards larger coordinates
    Positive,
    /// Towards smaller coordinates
    Negative,
}

impl JogDirection {
    /// Sign applied to the jog distance
    pub fn sign(self) -> f64 {
        match self {
            JogDirection::Positive => 1.0,
            JogDirection::Negative => -1.0,
        }
    }
}

impl fmt::Display for JogDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JogDirection::Positive => write!(f, "+"),
            JogDirection::Negative => write!(f, "-"),
        }
    }
}

/// Axes sharing one feedrate control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisGroup {
    /// X and Y share the planar feedrate
    Xy,
    /// Z has its own feedrate
    Z,
}

impl AxisGroup {
    /// Feedrate group an axis jogs with, if any
    ///
    /// Rotary axes have no feedrate control on the jog panel.
    pub fn for_axis(axis: AxisId) -> Option<AxisGroup> {
        match axis {
            AxisId::X | AxisId::Y => Some(AxisGroup::Xy),
            AxisId::Z => Some(AxisGroup::Z),
            AxisId::A | AxisId::B => None,
        }
    }

    /// Declared maximum feedrate of this group, truncated to whole mm/min
    ///
    /// The XY group is limited by the slower of its two axes. The result is
    /// never below 1.
    pub fn max_feedrate(self, maximums: &Position) -> u32 {
        let limit = match self {
            AxisGroup::Xy => maximums.x().min(maximums.y()),
            AxisGroup::Z => maximums.z(),
        };
        if limit.is_finite() && limit >= 1.0 {
            limit.min(u32::MAX as f64) as u32
        } else {
            1
        }
    }
}

impl fmt::Display for AxisGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisGroup::Xy => write!(f, "XY"),
            AxisGroup::Z => write!(f, "Z"),
        }
    }
}

impl FromStr for AxisGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xy" => Ok(AxisGroup::Xy),
            "z" => Ok(AxisGroup::Z),
            _ => Err(format!("Unknown axis group: {}", s)),
        }
    }
}

/// 5-axis machine coordinate, in millimeters
///
/// Also used for per-axis maxima such as the declared maximum feedrates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    coords: [f64; AXIS_COUNT],
}

impl Position {
    /// Create a position with all axes at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a position with the linear axes set and rotary axes at zero
    pub fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        Self::with_axes(x, y, z, 0.0, 0.0)
    }

    /// Create a position with all five axes set
    pub fn with_axes(x: f64, y: f64, z: f64, a: f64, b: f64) -> Self {
        Self {
            coords: [x, y, z, a, b],
        }
    }

    /// Coordinate of one axis
    pub fn axis(&self, axis: AxisId) -> f64 {
        self.coords[axis.index()]
    }

    /// Set the coordinate of one axis
    pub fn set_axis(&mut self, axis: AxisId, value: f64) {
        self.coords[axis.index()] = value;
    }

    /// Copy of this position with one axis replaced
    pub fn with_axis(mut self, axis: AxisId, value: f64) -> Self {
        self.set_axis(axis, value);
        self
    }

    /// Copy of this position with one axis moved by `delta`
    pub fn offset(self, axis: AxisId, delta: f64) -> Self {
        let value = self.axis(axis) + delta;
        self.with_axis(axis, value)
    }

    /// X coordinate
    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    /// Y coordinate
    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    /// Z coordinate
    pub fn z(&self) -> f64 {
        self.coords[2]
    }

    /// All coordinates in axis order
    pub fn coords(&self) -> [f64; AXIS_COUNT] {
        self.coords
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X:{:.3} Y:{:.3} Z:{:.3} A:{:.3} B:{:.3}",
            self.coords[0], self.coords[1], self.coords[2], self.coords[3], self.coords[4]
        )
    }
}
