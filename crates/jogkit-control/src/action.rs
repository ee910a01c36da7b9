//! Operator actions
//!
//! Panel buttons report a command name (`"X+"`, `"Center Y"`, `"Zero"`, ...).
//! Names are parsed into [`JogAction`] once, at the boundary; everything
//! downstream matches on the enum.

use jogkit_core::{AxisGroup, AxisId, InputError, JogDirection};
use std::fmt;
use std::str::FromStr;

/// Command name of the jog size selector
pub const JOG_SIZE_COMMAND: &str = "jog size";

/// Prefix of the recenter commands
const CENTER_PREFIX: &str = "Center ";

/// Prefix of console feedrate commands (`feed xy 600`)
const FEED_PREFIX: &str = "feed ";

/// A discrete operator intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JogAction {
    /// Move one axis by the active jog distance
    Jog {
        /// Axis to move
        axis: AxisId,
        /// Direction of travel
        direction: JogDirection,
    },
    /// Move one axis to exactly 0
    Center(AxisId),
    /// Redefine the origin at the current physical position
    Zero,
    /// Stop all motion
    Stop,
    /// Select a jog distance by its label
    SelectJogDistance(String),
    /// Feedrate slider moved
    SetFeedrate {
        /// Channel being edited
        group: AxisGroup,
        /// Raw slider value, clamped by the channel
        value: i64,
    },
    /// Feedrate text field committed
    CommitFeedrateText {
        /// Channel being edited
        group: AxisGroup,
        /// Text as typed
        text: String,
    },
    /// Feedrate text field lost focus
    FeedrateFocusLost(AxisGroup),
}

impl JogAction {
    /// Parse a panel command name
    ///
    /// `selection` is the label currently chosen in the jog size selector;
    /// it is only read for the `"jog size"` command.
    pub fn from_command(name: &str, selection: Option<&str>) -> Result<Self, InputError> {
        let unrecognized = || InputError::UnrecognizedAction {
            name: name.to_string(),
        };

        match name {
            "Zero" => return Ok(JogAction::Zero),
            "Stop" => return Ok(JogAction::Stop),
            JOG_SIZE_COMMAND => {
                let label = selection.ok_or_else(|| InputError::UnparseableJogDistance {
                    label: String::new(),
                })?;
                return Ok(JogAction::SelectJogDistance(label.to_string()));
            }
            _ => {}
        }

        if let Some(axis) = name.strip_prefix(CENTER_PREFIX) {
            let axis = axis.parse::<AxisId>().map_err(|_| unrecognized())?;
            return Ok(JogAction::Center(axis));
        }

        let (axis, direction) = match name.char_indices().last() {
            Some((i, '+')) => (&name[..i], JogDirection::Positive),
            Some((i, '-')) => (&name[..i], JogDirection::Negative),
            _ => return Err(unrecognized()),
        };
        let axis = axis.parse::<AxisId>().map_err(|_| unrecognized())?;
        Ok(JogAction::Jog { axis, direction })
    }

    /// Axis this action moves, if any
    pub fn axis(&self) -> Option<AxisId> {
        match self {
            JogAction::Jog { axis, .. } | JogAction::Center(axis) => Some(*axis),
            _ => None,
        }
    }
}

impl FromStr for JogAction {
    type Err = InputError;

    /// Parse a console line: a panel command name, `jog size <label>`, or
    /// `feed <xy|z> <text>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();

        if let Some(label) = line.strip_prefix(JOG_SIZE_COMMAND) {
            if label.is_empty() || label.starts_with(' ') {
                return Self::from_command(JOG_SIZE_COMMAND, Some(label.trim()));
            }
        }

        if let Some(rest) = line.strip_prefix(FEED_PREFIX) {
            let (group, text) = rest.trim().split_once(' ').unwrap_or((rest.trim(), ""));
            let group = group
                .parse::<AxisGroup>()
                .map_err(|_| InputError::UnrecognizedAction {
                    name: line.to_string(),
                })?;
            return Ok(JogAction::CommitFeedrateText {
                group,
                text: text.trim().to_string(),
            });
        }

        Self::from_command(line, None)
    }
}

impl fmt::Display for JogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JogAction::Jog { axis, direction } => write!(f, "{}{}", axis, direction),
            JogAction::Center(axis) => write!(f, "{}{}", CENTER_PREFIX, axis),
            JogAction::Zero => write!(f, "Zero"),
            JogAction::Stop => write!(f, "Stop"),
            JogAction::SelectJogDistance(label) => write!(f, "{} {}", JOG_SIZE_COMMAND, label),
            JogAction::SetFeedrate { group, value } => write!(f, "{} feedrate {}", group, value),
            JogAction::CommitFeedrateText { group, text } => {
                write!(f, "{} feedrate text {:?}", group, text)
            }
            JogAction::FeedrateFocusLost(group) => write!(f, "{} feedrate focus lost", group),
        }
    }
}
