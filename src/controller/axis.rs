//! # Axis Module
//!
//! Calibrated mapping from one raw analog channel onto an output range.
//!
//! An [`Axis`] remembers which controller and axis index it reads, and the
//! raw readings that correspond to the two ends of its travel. The raw
//! endpoints are orientation, not ordering: `low` is the reading at the
//! down/left/released position and `high` the reading at the opposite end,
//! so `low > high` is a valid, reversed axis.
//!
//! ## Usage
//!
//! ```
//! use padkit::controller::axis::Axis;
//! use padkit::controller::types::{AxisId, ControllerId};
//!
//! let axis = Axis::new(ControllerId::One, AxisId::Zero, -1.0, 1.0)?;
//! assert_eq!(axis.remap(0.0, 0.0, 1.0), 0.5);
//! assert_eq!(axis.remap(-2.0, 0.0, 1.0), 0.0);
//! assert_eq!(axis.remap(2.0, 0.0, 1.0), 1.0);
//! # Ok::<(), padkit::error::PadkitError>(())
//! ```

use crate::error::{PadkitError, Result};

use super::source::AxisSource;
use super::types::{AxisId, ControllerId};

/// Calibrated analog axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    controller: ControllerId,
    id: AxisId,
    /// Raw reading at the down/left/released end.
    low: f32,
    /// Raw reading at the up/right/pressed end.
    high: f32,
}

impl Axis {
    /// Creates an axis reading `id` on `controller`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAxisRange` if `low == high` or either endpoint is not finite.
    pub fn new(controller: ControllerId, id: AxisId, low: f32, high: f32) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low == high {
            return Err(PadkitError::InvalidAxisRange { low, high });
        }
        Ok(Self {
            controller,
            id,
            low,
            high,
        })
    }

    #[must_use]
    pub fn controller(&self) -> ControllerId {
        self.controller
    }

    #[must_use]
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Raw reading mapped to `out_min`.
    #[must_use]
    pub fn low(&self) -> f32 {
        self.low
    }

    /// Raw reading mapped to `out_max`.
    #[must_use]
    pub fn high(&self) -> f32 {
        self.high
    }

    /// Whether the raw endpoints run in decreasing order.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.low > self.high
    }

    /// Reads the axis from `source` and maps it onto `[out_min, out_max]`.
    ///
    /// # Errors
    ///
    /// - `NoController`: no device in this axis' controller slot
    /// - `NoSuchAxis`: the device has no axis at this index
    pub fn value<S: AxisSource + ?Sized>(
        &self,
        source: &S,
        out_min: f32,
        out_max: f32,
    ) -> Result<f32> {
        let raw = raw_axis_value(source, self.controller, self.id)?;
        Ok(self.remap(raw, out_min, out_max))
    }

    /// Clamps `raw` to the configured travel and maps it onto `[out_min, out_max]`.
    ///
    /// `low` always maps to `out_min` and `high` to `out_max`, whichever of
    /// the two raw endpoints is larger.
    #[must_use]
    pub fn remap(&self, raw: f32, out_min: f32, out_max: f32) -> f32 {
        let (lo, hi) = if self.is_reversed() {
            (self.high, self.low)
        } else {
            (self.low, self.high)
        };
        let clamped = raw.clamp(lo, hi);
        let scale = (out_max - out_min) / (self.high - self.low);
        (clamped - self.low) * scale + out_min
    }
}

/// Unclamped raw reading of `axis` on `controller`.
///
/// # Errors
///
/// - `NoController`: `source` has no device in the slot
/// - `NoSuchAxis`: the device reports fewer axes than `axis.index() + 1`
pub fn raw_axis_value<S: AxisSource + ?Sized>(
    source: &S,
    controller: ControllerId,
    axis: AxisId,
) -> Result<f32> {
    let axes = source
        .axes(controller)
        .ok_or(PadkitError::NoController(controller))?;
    axes.get(axis.index())
        .copied()
        .ok_or(PadkitError::NoSuchAxis { controller, axis })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::source::mocks::MockAxisSource;

    fn unit_axis() -> Axis {
        Axis::new(ControllerId::One, AxisId::Zero, -1.0, 1.0).unwrap()
    }

    #[test]
    fn test_new_rejects_degenerate_range() {
        let result = Axis::new(ControllerId::One, AxisId::Zero, 0.5, 0.5);
        assert!(matches!(result, Err(PadkitError::InvalidAxisRange { .. })));

        let result = Axis::new(ControllerId::One, AxisId::Zero, f32::NAN, 1.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_remap_midpoint_and_clamping() {
        let axis = unit_axis();
        assert!((axis.remap(0.0, 0.0, 1.0) - 0.5).abs() < 1e-6);
        assert_eq!(axis.remap(-2.0, 0.0, 1.0), 0.0);
        assert_eq!(axis.remap(2.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_remap_stays_within_output_range() {
        let axis = Axis::new(ControllerId::Two, AxisId::Three, -0.8, 0.9).unwrap();
        for i in -30..=30 {
            let raw = i as f32 / 10.0;
            let out = axis.remap(raw, -1.0, 1.0);
            assert!(out >= -1.0 - 1e-6 && out <= 1.0 + 1e-6, "raw {} mapped to {}", raw, out);
        }
    }

    #[test]
    fn test_reversed_axis_inverts_polarity() {
        let forward = unit_axis();
        let reversed = Axis::new(ControllerId::One, AxisId::Zero, 1.0, -1.0).unwrap();
        assert!(reversed.is_reversed());

        for raw in [-1.0, -0.5, 0.0, 0.25, 1.0] {
            let a = forward.remap(raw, -1.0, 1.0);
            let b = reversed.remap(raw, -1.0, 1.0);
            assert!((a + b).abs() < 1e-6, "raw {}: {} vs {}", raw, a, b);
        }

        // Reversed with swapped outputs matches the forward axis
        for raw in [-1.0, -0.3, 0.6, 1.0] {
            let a = forward.remap(raw, 0.0, 1.0);
            let b = reversed.remap(raw, 1.0, 0.0);
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_reversed_axis_clamps() {
        let reversed = Axis::new(ControllerId::One, AxisId::Two, 1.0, -1.0).unwrap();
        assert_eq!(reversed.remap(5.0, 0.0, 1.0), 0.0);
        assert_eq!(reversed.remap(-5.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_value_reads_source() {
        let source = MockAxisSource::new().with_controller(ControllerId::One, vec![0.0, 0.5]);
        let axis = Axis::new(ControllerId::One, AxisId::One, -1.0, 1.0).unwrap();
        let value = axis.value(&source, 0.0, 1.0).unwrap();
        assert!((value - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_value_no_controller() {
        let source = MockAxisSource::new();
        let err = unit_axis().value(&source, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, PadkitError::NoController(ControllerId::One)));
    }

    #[test]
    fn test_value_no_such_axis() {
        let source = MockAxisSource::new().with_controller(ControllerId::One, vec![0.0]);
        let axis = Axis::new(ControllerId::One, AxisId::Five, -1.0, 1.0).unwrap();
        let err = axis.value(&source, 0.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            PadkitError::NoSuchAxis {
                controller: ControllerId::One,
                axis: AxisId::Five
            }
        ));
    }

    #[test]
    fn test_raw_axis_value_is_unclamped() {
        let source = MockAxisSource::new().with_controller(ControllerId::Three, vec![3.5]);
        let raw = raw_axis_value(&source, ControllerId::Three, AxisId::Zero).unwrap();
        assert_eq!(raw, 3.5);
    }
}
