//! # Error Types
//!
//! Custom error types for padkit using `thiserror`.

use std::time::Duration;

use thiserror::Error;

use crate::controller::types::{AxisId, ControllerId};

/// Main error type for padkit
#[derive(Debug, Error)]
pub enum PadkitError {
    /// The input source reports no device in the requested controller slot
    #[error("no controller connected in slot {0}")]
    NoController(ControllerId),

    /// The controller exists but does not expose the requested axis
    #[error("controller {controller} has no axis {axis}")]
    NoSuchAxis {
        controller: ControllerId,
        axis: AxisId,
    },

    /// A joystick or trigger was read before it was fully configured
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Deadzone radius outside `[0, 1)`
    #[error("invalid deadzone radius {0} (must be in [0, 1))")]
    InvalidDeadzone(f32),

    /// Axis whose raw endpoints coincide
    #[error("invalid axis range: low {low} equals high {high}")]
    InvalidAxisRange { low: f32, high: f32 },

    /// Calibration document could not be parsed
    #[error("calibration parse error: {0}")]
    CalibrationParse(String),

    /// Calibration bindings could not be encoded as XML
    #[error("calibration encode error: {0}")]
    CalibrationEncode(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No suitable evdev device was found
    #[error("input device not found: {0}")]
    DeviceNotFound(String),

    /// A bounded wait ran out of time
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// A wait was cancelled by the caller
    #[error("wait cancelled")]
    Cancelled,
}

impl From<quick_xml::DeError> for PadkitError {
    fn from(err: quick_xml::DeError) -> Self {
        PadkitError::CalibrationParse(err.to_string())
    }
}

/// Result type alias for padkit
pub type Result<T> = std::result::Result<T, PadkitError>;
