//! Error handling for jogkit
//!
//! Provides the error types for every layer of the jog controls:
//! - Driver errors (the motion device refused or failed a command)
//! - Input errors (operator text, action names, jog size labels)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Motion driver error type
///
/// Returned by [`MotionDriver`](crate::driver::MotionDriver) command methods
/// when the device cannot accept a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The device is still executing a previous command and cannot
    /// accept a new one right now
    #[error("Machine busy")]
    Busy,

    /// Command was rejected by the device
    #[error("Command rejected: {reason}")]
    CommandRejected {
        /// The reason the command was rejected.
        reason: String,
    },
}

impl DriverError {
    /// Check if this is the busy-device signal
    pub fn is_busy(&self) -> bool {
        matches!(self, DriverError::Busy)
    }
}

/// Operator input error type
///
/// Represents malformed values typed or selected by the operator. None of
/// these are fatal; callers recover locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A numeric text field holds non-numeric content
    #[error("Malformed numeric input: {input:?}")]
    MalformedInput {
        /// The rejected text.
        input: String,
    },

    /// An action name outside the known set
    #[error("Unknown action: {name}")]
    UnrecognizedAction {
        /// The unrecognized action name.
        name: String,
    },

    /// A jog size label without a usable numeric token
    #[error("Unparseable jog distance: {label}")]
    UnparseableJogDistance {
        /// The rejected label.
        label: String,
    },
}

/// Main error type for jogkit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Driver error
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is the busy-device signal
    pub fn is_busy(&self) -> bool {
        matches!(self, Error::Driver(DriverError::Busy))
    }

    /// Check if this is an operator input error
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Input(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_display() {
        assert_eq!(DriverError::Busy.to_string(), "Machine busy");
        let err = DriverError::CommandRejected {
            reason: "soft limit".to_string(),
        };
        assert_eq!(err.to_string(), "Command rejected: soft limit");
    }

    #[test]
    fn test_input_error_display() {
        let err = InputError::MalformedInput {
            input: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed numeric input: \"abc\"");

        let err = InputError::UnrecognizedAction {
            name: "W+".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown action: W+");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = DriverError::Busy.into();
        assert!(err.is_busy());
        assert!(!err.is_input_error());

        let err: Error = InputError::UnparseableJogDistance {
            label: "bogus".to_string(),
        }
        .into();
        assert!(err.is_input_error());
        assert!(!err.is_busy());
    }
}
