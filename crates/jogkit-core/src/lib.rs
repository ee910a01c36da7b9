//! # jogkit Core
//!
//! Core types, traits, and utilities for jogkit.
//! Provides the axis and position model, the motion-driver contract
//! consumed by the jog controls, a simulated driver, and the error types
//! shared by every crate in the workspace.

pub mod data;
pub mod driver;
pub mod error;
pub mod types;

pub use data::{AxisGroup, AxisId, AxisSet, JogDirection, Position, AXIS_COUNT};

pub use driver::{DriverCommand, MotionDriver, SimulatedDriver};

pub use error::{DriverError, Error, InputError, Result};

pub use types::{thread_safe_rw, thread_safe_vec, ThreadSafeRw, ThreadSafeVec};
