//! # Key Tracker
//!
//! Rising-edge detection for a single key.
//!
//! A [`KeyTracker`] remembers the key's state from its previous sample. Each
//! call to [`KeyTracker::is_freshly_pressed`] takes a new sample, reports
//! whether the key went from released to pressed in between, and stores the
//! sample. Holding a key down therefore reports `true` once.
//!
//! ```
//! use padkit::keyboard::source::{KeyCode, KeySource};
//! use padkit::keyboard::tracker::KeyTracker;
//!
//! struct Held(bool);
//! impl KeySource for Held {
//!     fn is_key_down(&self, _key: KeyCode) -> bool {
//!         self.0
//!     }
//! }
//!
//! let mut keys = Held(false);
//! let mut tracker = KeyTracker::new(&keys, KeyCode::SPACE);
//!
//! keys.0 = true;
//! assert!(tracker.is_freshly_pressed(&keys));
//! assert!(!tracker.is_freshly_pressed(&keys));
//! ```

use super::source::{KeyCode, KeySource};

/// Whether `key` is currently down on `source`.
pub fn is_pressed<S: KeySource + ?Sized>(source: &S, key: KeyCode) -> bool {
    source.is_key_down(key)
}

/// Tracks released→pressed transitions of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTracker {
    key: KeyCode,
    pressed: bool,
}

impl KeyTracker {
    /// Starts tracking `key`, taking its current state as the first sample.
    pub fn new<S: KeySource + ?Sized>(source: &S, key: KeyCode) -> Self {
        Self {
            key,
            pressed: is_pressed(source, key),
        }
    }

    #[must_use]
    pub fn key(&self) -> KeyCode {
        self.key
    }

    /// State seen at the last sample.
    #[must_use]
    pub fn was_pressed(&self) -> bool {
        self.pressed
    }

    /// Samples the key; `true` only if it was released at the previous sample
    /// and is pressed now.
    pub fn is_freshly_pressed<S: KeySource + ?Sized>(&mut self, source: &S) -> bool {
        let previous = self.pressed;
        self.pressed = is_pressed(source, self.key);
        !previous && self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::source::MockKeySource;
    use std::cell::Cell;

    /// Key source whose state is flipped by the test between samples
    struct Scripted {
        down: Cell<bool>,
    }

    impl KeySource for Scripted {
        fn is_key_down(&self, _key: KeyCode) -> bool {
            self.down.get()
        }
    }

    #[test]
    fn test_fresh_press_reported_once_while_held() {
        let keys = Scripted { down: Cell::new(false) };
        let mut tracker = KeyTracker::new(&keys, KeyCode::ENTER);

        assert!(!tracker.is_freshly_pressed(&keys));
        keys.down.set(true);
        assert!(tracker.is_freshly_pressed(&keys));
        assert!(!tracker.is_freshly_pressed(&keys));
        assert!(!tracker.is_freshly_pressed(&keys));
    }

    #[test]
    fn test_each_transition_counts() {
        let keys = Scripted { down: Cell::new(false) };
        let mut tracker = KeyTracker::new(&keys, KeyCode::SPACE);

        let script = [true, true, false, false, true, false, true, true];
        let presses = script
            .iter()
            .filter(|&&down| {
                keys.down.set(down);
                tracker.is_freshly_pressed(&keys)
            })
            .count();
        assert_eq!(presses, 3);
    }

    #[test]
    fn test_key_held_at_creation_is_not_fresh() {
        let keys = Scripted { down: Cell::new(true) };
        let mut tracker = KeyTracker::new(&keys, KeyCode::ESC);
        assert!(tracker.was_pressed());
        assert!(!tracker.is_freshly_pressed(&keys));

        keys.down.set(false);
        assert!(!tracker.is_freshly_pressed(&keys));
        keys.down.set(true);
        assert!(tracker.is_freshly_pressed(&keys));
    }

    #[test]
    fn test_queries_the_tracked_key() {
        let mut mock = MockKeySource::new();
        mock.expect_is_key_down()
            .withf(|key| *key == KeyCode::R)
            .times(3)
            .returning(|_| true);

        let mut tracker = KeyTracker::new(&mock, KeyCode::R);
        assert_eq!(tracker.key(), KeyCode::R);
        assert!(!tracker.is_freshly_pressed(&mock));
        assert!(is_pressed(&mock, KeyCode::R));
    }
}
