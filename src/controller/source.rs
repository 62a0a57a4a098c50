//! Trait abstraction for analog axis polling to enable testing

use super::types::ControllerId;

/// Source of per-controller analog axis readings.
///
/// Readings are only meaningful after the implementation's own poll step has
/// run for the current frame.
pub trait AxisSource {
    /// Current axis readings for `controller`, indexed by axis number.
    ///
    /// Returns `None` when no device occupies that slot.
    fn axes(&self, controller: ControllerId) -> Option<&[f32]>;
}

impl<S: AxisSource + ?Sized> AxisSource for &S {
    fn axes(&self, controller: ControllerId) -> Option<&[f32]> {
        (**self).axes(controller)
    }
}
