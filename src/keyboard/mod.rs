//! # Keyboard Module
//!
//! Key state polling helpers.
//!
//! This module handles:
//! - Querying key state through the [`KeySource`] trait
//! - Detecting released→pressed edges with [`KeyTracker`]
//! - Waiting (bounded and cancellable) for a key press
//! - Reading key state from evdev keyboards

pub mod device;
pub mod source;
pub mod tracker;
pub mod wait;

pub use source::{KeyCode, KeySource};
pub use tracker::{is_pressed, KeyTracker};
pub use wait::{wait_for_press, WaitOptions};
