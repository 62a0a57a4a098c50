//! # Controller Identifiers
//!
//! Closed sets of controller slots, axis indices and logical sticks/triggers.
//!
//! The serde names are the identifiers written to calibration documents
//! (`ONE`, `ZERO`, `LEFT`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Controller slot, in device discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ControllerId {
    One,
    Two,
    Three,
    Four,
}

impl ControllerId {
    /// All slots in index order.
    pub const ALL: [ControllerId; 4] = [
        ControllerId::One,
        ControllerId::Two,
        ControllerId::Three,
        ControllerId::Four,
    ];

    /// Zero-based slot index.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            ControllerId::One => 0,
            ControllerId::Two => 1,
            ControllerId::Three => 2,
            ControllerId::Four => 3,
        }
    }
}

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerId::One => "ONE",
            ControllerId::Two => "TWO",
            ControllerId::Three => "THREE",
            ControllerId::Four => "FOUR",
        };
        f.write_str(name)
    }
}

/// Analog axis index on a controller.
///
/// On an XBOX 360 pad: 0/1 are the left stick x/y, 2 the left trigger,
/// 3/4 the right stick x/y and 5 the right trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AxisId {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
}

impl AxisId {
    /// Zero-based index into the controller's axis array.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            AxisId::Zero => 0,
            AxisId::One => 1,
            AxisId::Two => 2,
            AxisId::Three => 3,
            AxisId::Four => 4,
            AxisId::Five => 5,
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AxisId::Zero => "ZERO",
            AxisId::One => "ONE",
            AxisId::Two => "TWO",
            AxisId::Three => "THREE",
            AxisId::Four => "FOUR",
            AxisId::Five => "FIVE",
        };
        f.write_str(name)
    }
}

/// Logical two-axis stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Joystick {
    Left,
    Right,
}

impl Joystick {
    pub const ALL: [Joystick; 2] = [Joystick::Left, Joystick::Right];
}

impl fmt::Display for Joystick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Joystick::Left => f.write_str("LEFT"),
            Joystick::Right => f.write_str("RIGHT"),
        }
    }
}

/// Logical analog trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trigger {
    Left,
    Right,
}

impl Trigger {
    pub const ALL: [Trigger; 2] = [Trigger::Left, Trigger::Right];
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Left => f.write_str("LEFT"),
            Trigger::Right => f.write_str("RIGHT"),
        }
    }
}
