//! # Render Module
//!
//! Immediate-mode shape and text helpers.
//!
//! This module handles:
//! - The [`Canvas`] drawing surface abstraction
//! - Recording draw commands for inspection or replay
//! - Tessellating lines, disks, ellipses, sectors and urchins
//! - Anchoring text

pub mod canvas;
pub mod shapes;
pub mod text;

pub use canvas::{Canvas, CanvasCommand, Color, Point, Primitive, RecordingCanvas};
pub use shapes::DrawHelper;
pub use text::TextAlignment;
