//! # Controller Module
//!
//! Gamepad axis calibration and filtering.
//!
//! This module handles:
//! - Controller, axis, joystick and trigger identifiers
//! - Remapping raw axis readings onto calibrated ranges
//! - Radial deadzone filtering of sticks into magnitude and angle
//! - Saving and restoring calibration as XML
//! - Reading axes from evdev gamepads

pub mod axis;
pub mod calibration;
pub mod gamepad;
pub mod reader;
pub mod source;
pub mod types;

pub use axis::Axis;
pub use reader::{ControllerReader, JoystickState, TriggerState};
pub use source::AxisSource;
pub use types::{AxisId, ControllerId, Joystick, Trigger};
