//! Trait abstraction for key state queries to enable testing

use crate::error::Result;

/// Linux input key code (`KEY_*` from `linux/input-event-codes.h`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const ESC: KeyCode = KeyCode(1);
    pub const R: KeyCode = KeyCode(19);
    pub const ENTER: KeyCode = KeyCode(28);
    pub const SPACE: KeyCode = KeyCode(57);
}

impl From<evdev::Key> for KeyCode {
    fn from(key: evdev::Key) -> Self {
        KeyCode(key.code())
    }
}

impl From<KeyCode> for evdev::Key {
    fn from(key: KeyCode) -> Self {
        evdev::Key::new(key.0)
    }
}

/// Window or device whose keys can be queried.
#[cfg_attr(test, mockall::automock)]
pub trait KeySource {
    /// Whether `key` was down at the last refresh.
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Pick up new key state. Sources that are refreshed elsewhere keep the
    /// default no-op.
    fn refresh(&mut self) -> Result<()> {
        Ok(())
    }
}
