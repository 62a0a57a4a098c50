//! # Controller Reader
//!
//! Holds the joystick and trigger bindings and turns raw axis readings into
//! filtered stick and trigger states.
//!
//! ## Joystick filtering
//!
//! Both stick axes are remapped to `-1.0..=1.0`, then:
//!
//! 1. `magnitude = sqrt(x² + y²)`
//! 2. the deadzone radius is subtracted and the rest rescaled back to `0..=1`
//! 3. magnitude is capped at 1.0 (a square stick gate reaches √2 in the corners)
//! 4. `angle = atan2(y, x)`, normalized to `[0, 2π)`
//!
//! ## Usage
//!
//! ```no_run
//! use padkit::controller::axis::Axis;
//! use padkit::controller::gamepad::EvdevGamepads;
//! use padkit::controller::reader::ControllerReader;
//! use padkit::controller::types::{AxisId, ControllerId, Joystick};
//!
//! let mut pads = EvdevGamepads::open()?;
//! let mut reader = ControllerReader::new();
//! reader.set_joystick_axes(
//!     Joystick::Left,
//!     Axis::new(ControllerId::One, AxisId::Zero, -1.0, 1.0)?,
//!     Axis::new(ControllerId::One, AxisId::One, 1.0, -1.0)?,
//! );
//! reader.set_joystick_deadzone(Joystick::Left, 0.15)?;
//!
//! pads.poll()?;
//! let state = reader.joystick_state(&pads, Joystick::Left)?;
//! println!("{:.2} @ {:.2} rad", state.magnitude, state.angle);
//! # Ok::<(), padkit::error::PadkitError>(())
//! ```

use std::f32::consts::TAU;

use tracing::debug;

use crate::error::{PadkitError, Result};

use super::axis::Axis;
use super::source::AxisSource;
use super::types::{Joystick, Trigger};

/// Filtered stick reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickState {
    /// Deflection after the deadzone, `0.0..=1.0`.
    pub magnitude: f32,
    /// Direction in radians, `[0, 2π)`, counter-clockwise from +x.
    pub angle: f32,
}

/// Filtered trigger reading, `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerState {
    pub value: f32,
}

/// Bindings of one logical stick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JoystickBinding {
    /// `(x, y)` axes.
    pub axes: Option<(Axis, Axis)>,
    /// Deadzone radius in `[0, 1)`.
    pub deadzone: Option<f32>,
}

/// Reads calibrated joystick and trigger states.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerReader {
    joysticks: [JoystickBinding; 2],
    triggers: [Option<Axis>; 2],
}

impl ControllerReader {
    /// Creates a reader with nothing bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the x and y axes of a stick.
    pub fn set_joystick_axes(&mut self, joystick: Joystick, x: Axis, y: Axis) {
        self.joysticks[joystick_slot(joystick)].axes = Some((x, y));
    }

    /// Sets the deadzone radius of a stick.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDeadzone` unless `radius` is in `[0, 1)`.
    pub fn set_joystick_deadzone(&mut self, joystick: Joystick, radius: f32) -> Result<()> {
        validate_deadzone(radius)?;
        self.joysticks[joystick_slot(joystick)].deadzone = Some(radius);
        Ok(())
    }

    /// Binds the axis of a trigger.
    pub fn set_trigger_axis(&mut self, trigger: Trigger, axis: Axis) {
        self.triggers[trigger_slot(trigger)] = Some(axis);
    }

    /// Current bindings of a stick.
    #[must_use]
    pub fn joystick(&self, joystick: Joystick) -> &JoystickBinding {
        &self.joysticks[joystick_slot(joystick)]
    }

    /// Axis bound to a trigger, if any.
    #[must_use]
    pub fn trigger_axis(&self, trigger: Trigger) -> Option<&Axis> {
        self.triggers[trigger_slot(trigger)].as_ref()
    }

    /// Filtered state of a stick.
    ///
    /// # Errors
    ///
    /// - `NotConfigured`: axes or deadzone not set for `joystick`
    /// - `NoController` / `NoSuchAxis`: propagated from either axis
    pub fn joystick_state<S: AxisSource + ?Sized>(
        &self,
        source: &S,
        joystick: Joystick,
    ) -> Result<JoystickState> {
        let binding = self.joystick(joystick);
        let (x_axis, y_axis) = binding.axes.ok_or_else(|| {
            PadkitError::NotConfigured(format!("joystick {} has no axes", joystick))
        })?;
        let deadzone = binding.deadzone.ok_or_else(|| {
            PadkitError::NotConfigured(format!("joystick {} has no deadzone", joystick))
        })?;

        let x = x_axis.value(source, -1.0, 1.0)?;
        let y = y_axis.value(source, -1.0, 1.0)?;

        let state = filter_stick(x, y, deadzone);
        debug!(
            "joystick {}: x={:.3} y={:.3} -> mag={:.3} angle={:.3}",
            joystick, x, y, state.magnitude, state.angle
        );
        Ok(state)
    }

    /// Filtered state of a trigger.
    ///
    /// # Errors
    ///
    /// - `NotConfigured`: no axis bound to `trigger`
    /// - `NoController` / `NoSuchAxis`: propagated from the axis
    pub fn trigger_state<S: AxisSource + ?Sized>(
        &self,
        source: &S,
        trigger: Trigger,
    ) -> Result<TriggerState> {
        let axis = self.trigger_axis(trigger).ok_or_else(|| {
            PadkitError::NotConfigured(format!("trigger {} has no axis", trigger))
        })?;
        Ok(TriggerState {
            value: axis.value(source, 0.0, 1.0)?,
        })
    }
}

/// Applies the radial deadzone to remapped stick coordinates.
///
/// `x` and `y` are expected in `-1.0..=1.0`; `deadzone` in `[0, 1)`.
///
/// # Examples
///
/// ```
/// use padkit::controller::reader::filter_stick;
///
/// let state = filter_stick(0.05, 0.05, 0.1);
/// assert_eq!(state.magnitude, 0.0);
///
/// let state = filter_stick(1.0, 1.0, 0.1);
/// assert_eq!(state.magnitude, 1.0);
/// ```
#[must_use]
pub fn filter_stick(x: f32, y: f32, deadzone: f32) -> JoystickState {
    let raw_magnitude = (x * x + y * y).sqrt();
    let dilate = 1.0 / (1.0 - deadzone);
    let magnitude = ((raw_magnitude - deadzone).max(0.0) * dilate).min(1.0);

    let mut angle = y.atan2(x);
    if angle < 0.0 {
        angle += TAU;
    }
    // -ε + 2π can round up to 2π in f32
    if angle >= TAU {
        angle = 0.0;
    }

    JoystickState { magnitude, angle }
}

/// Checks a deadzone radius is usable.
pub(crate) fn validate_deadzone(radius: f32) -> Result<()> {
    if (0.0..1.0).contains(&radius) {
        Ok(())
    } else {
        Err(PadkitError::InvalidDeadzone(radius))
    }
}

fn joystick_slot(joystick: Joystick) -> usize {
    match joystick {
        Joystick::Left => 0,
        Joystick::Right => 1,
    }
}

fn trigger_slot(trigger: Trigger) -> usize {
    match trigger {
        Trigger::Left => 0,
        Trigger::Right => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::source::mocks::MockAxisSource;
    use crate::controller::types::{AxisId, ControllerId};
    use std::f32::consts::{FRAC_PI_2, PI};

    fn configured_reader() -> ControllerReader {
        let mut reader = ControllerReader::new();
        reader.set_joystick_axes(
            Joystick::Left,
            Axis::new(ControllerId::One, AxisId::Zero, -1.0, 1.0).unwrap(),
            Axis::new(ControllerId::One, AxisId::One, -1.0, 1.0).unwrap(),
        );
        reader.set_joystick_deadzone(Joystick::Left, 0.2).unwrap();
        reader.set_trigger_axis(
            Trigger::Right,
            Axis::new(ControllerId::One, AxisId::Five, -1.0, 1.0).unwrap(),
        );
        reader
    }

    // ==================== Deadzone Validation ====================

    #[test]
    fn test_deadzone_rejects_one_and_out_of_range() {
        let mut reader = ControllerReader::new();
        assert!(matches!(
            reader.set_joystick_deadzone(Joystick::Left, 1.0),
            Err(PadkitError::InvalidDeadzone(_))
        ));
        assert!(reader.set_joystick_deadzone(Joystick::Left, -0.1).is_err());
        assert!(reader.set_joystick_deadzone(Joystick::Left, f32::NAN).is_err());
        assert!(reader.joystick(Joystick::Left).deadzone.is_none());

        assert!(reader.set_joystick_deadzone(Joystick::Left, 0.0).is_ok());
        assert!(reader.set_joystick_deadzone(Joystick::Left, 0.99).is_ok());
    }

    // ==================== Stick Filter ====================

    #[test]
    fn test_filter_zero_inside_deadzone() {
        assert_eq!(filter_stick(0.1, 0.1, 0.2).magnitude, 0.0);
        assert_eq!(filter_stick(0.2, 0.0, 0.2).magnitude, 0.0);
        assert_eq!(filter_stick(0.0, 0.0, 0.0).magnitude, 0.0);
    }

    #[test]
    fn test_filter_rescales_outside_deadzone() {
        // Halfway between deadzone edge and full deflection
        let state = filter_stick(0.6, 0.0, 0.2);
        assert!((state.magnitude - 0.5).abs() < 1e-5);

        let state = filter_stick(0.0, 1.0, 0.2);
        assert!((state.magnitude - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_filter_caps_corner_magnitude() {
        let state = filter_stick(1.0, 1.0, 0.0);
        assert_eq!(state.magnitude, 1.0);
        let state = filter_stick(-1.0, -1.0, 0.5);
        assert_eq!(state.magnitude, 1.0);
    }

    #[test]
    fn test_filter_angle_quadrants() {
        assert!((filter_stick(1.0, 0.0, 0.0).angle - 0.0).abs() < 1e-6);
        assert!((filter_stick(0.0, 1.0, 0.0).angle - FRAC_PI_2).abs() < 1e-6);
        assert!((filter_stick(-1.0, 0.0, 0.0).angle - PI).abs() < 1e-6);
        assert!((filter_stick(0.0, -1.0, 0.0).angle - 3.0 * FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_filter_ranges_over_grid() {
        for xi in -10..=10 {
            for yi in -10..=10 {
                let x = xi as f32 / 10.0;
                let y = yi as f32 / 10.0;
                for deadzone in [0.0, 0.1, 0.35, 0.9] {
                    let state = filter_stick(x, y, deadzone);
                    assert!((0.0..=1.0).contains(&state.magnitude));
                    assert!(state.angle >= 0.0 && state.angle < TAU);
                }
            }
        }
    }

    #[test]
    fn test_filter_tiny_negative_angle_folds_to_zero() {
        let state = filter_stick(1.0, -1e-9, 0.0);
        assert!(state.angle >= 0.0 && state.angle < TAU);
    }

    // ==================== Reader ====================

    #[test]
    fn test_joystick_state_from_source() {
        let reader = configured_reader();
        let source = MockAxisSource::new().with_controller(ControllerId::One, vec![0.0, 1.0]);

        let state = reader.joystick_state(&source, Joystick::Left).unwrap();
        assert!((state.magnitude - 1.0).abs() < 1e-6);
        assert!((state.angle - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_joystick_not_configured() {
        let reader = configured_reader();
        let source = MockAxisSource::new().with_controller(ControllerId::One, vec![0.0; 6]);

        let err = reader.joystick_state(&source, Joystick::Right).unwrap_err();
        assert!(matches!(err, PadkitError::NotConfigured(_)));
    }

    #[test]
    fn test_joystick_missing_deadzone_is_not_configured() {
        let mut reader = ControllerReader::new();
        reader.set_joystick_axes(
            Joystick::Right,
            Axis::new(ControllerId::Two, AxisId::Three, -1.0, 1.0).unwrap(),
            Axis::new(ControllerId::Two, AxisId::Four, -1.0, 1.0).unwrap(),
        );
        let source = MockAxisSource::new().with_controller(ControllerId::Two, vec![0.0; 6]);

        let err = reader.joystick_state(&source, Joystick::Right).unwrap_err();
        assert!(matches!(err, PadkitError::NotConfigured(_)));
    }

    #[test]
    fn test_joystick_propagates_missing_controller() {
        let reader = configured_reader();
        let source = MockAxisSource::new();

        let err = reader.joystick_state(&source, Joystick::Left).unwrap_err();
        assert!(matches!(err, PadkitError::NoController(ControllerId::One)));
    }

    #[test]
    fn test_trigger_state() {
        let reader = configured_reader();
        let mut source = MockAxisSource::new();
        source.set_axis(ControllerId::One, 5, -1.0);
        assert_eq!(reader.trigger_state(&source, Trigger::Right).unwrap().value, 0.0);

        source.set_axis(ControllerId::One, 5, 0.0);
        let value = reader.trigger_state(&source, Trigger::Right).unwrap().value;
        assert!((value - 0.5).abs() < 1e-6);

        source.set_axis(ControllerId::One, 5, 1.0);
        assert_eq!(reader.trigger_state(&source, Trigger::Right).unwrap().value, 1.0);
    }

    #[test]
    fn test_trigger_not_configured() {
        let reader = configured_reader();
        let source = MockAxisSource::new().with_controller(ControllerId::One, vec![0.0; 6]);

        let err = reader.trigger_state(&source, Trigger::Left).unwrap_err();
        assert!(matches!(err, PadkitError::NotConfigured(_)));
    }

    #[test]
    fn test_trigger_no_such_axis() {
        let reader = configured_reader();
        let source = MockAxisSource::new().with_controller(ControllerId::One, vec![0.0; 2]);

        let err = reader.trigger_state(&source, Trigger::Right).unwrap_err();
        assert!(matches!(err, PadkitError::NoSuchAxis { .. }));
    }
}
