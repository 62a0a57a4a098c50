//! # padkit
//!
//! Gamepad axis calibration, key edge tracking and immediate-mode shape helpers.
//!
//! The three module groups are independent:
//!
//! - [`controller`]: calibrated, deadzone-filtered stick and trigger readings,
//!   with XML calibration files
//! - [`keyboard`]: fresh key press detection and a bounded wait-for-press
//! - [`render`]: tessellated shapes and anchored text on a pluggable canvas

pub mod config;
pub mod error;
pub mod controller;
pub mod keyboard;
pub mod render;
