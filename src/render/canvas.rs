//! # Canvas
//!
//! The drawing surface the shape helpers emit to, plus an in-memory
//! implementation that records every command.
//!
//! Colour and line width are surface-wide state: they stay in effect for
//! every following draw call until set again.

use std::ops::{Add, Mul, Sub};

/// 2D vertex in the caller's current coordinate transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Rotates the point about the origin, counter-clockwise by `angle` radians.
    #[must_use]
    pub fn rotated(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: cos * self.x - sin * self.y,
            y: sin * self.x + cos * self.y,
        }
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f32 {
        let d = self - other;
        (d.x * d.x + d.y * d.y).sqrt()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// RGBA colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Opaque colour.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Colour from 8-bit components.
    ///
    /// ```
    /// use padkit::render::canvas::Color;
    ///
    /// let c = Color::from_rgba8(255, 0, 51, 255);
    /// assert_eq!(c, Color::rgba(1.0, 0.0, 0.2, 1.0));
    /// ```
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }
}

/// How a vertex list is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Independent segments, one per vertex pair.
    Lines,
    /// Connected segments, closed back to the first vertex.
    LineLoop,
    /// Connected segments, left open.
    LineStrip,
    /// Filled triangles sharing the first vertex.
    TriangleFan,
}

/// Immediate-mode drawing surface.
pub trait Canvas {
    fn set_color(&mut self, color: Color);

    /// Stroke width in pixels for line primitives. Fills are unaffected.
    fn set_line_width(&mut self, width: f32);

    fn draw(&mut self, primitive: Primitive, vertices: &[Point]);

    /// Draws `text` with its glyph grid's top-left corner at `origin`.
    ///
    /// `scale` multiplies glyph coordinates; a negative y flips glyphs
    /// authored y-down into a y-up transform.
    fn draw_text(&mut self, origin: Point, scale: Point, text: &str);
}

/// A command received by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    SetColor(Color),
    SetLineWidth(f32),
    Draw {
        primitive: Primitive,
        vertices: Vec<Point>,
    },
    Text {
        origin: Point,
        scale: Point,
        text: String,
    },
}

/// Canvas that keeps every command, for replay or inspection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCanvas {
    pub commands: Vec<CanvasCommand>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the recorded commands.
    pub fn take(&mut self) -> Vec<CanvasCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Replays the recorded commands onto another canvas.
    pub fn replay<C: Canvas + ?Sized>(&self, target: &mut C) {
        for command in &self.commands {
            match command {
                CanvasCommand::SetColor(color) => target.set_color(*color),
                CanvasCommand::SetLineWidth(width) => target.set_line_width(*width),
                CanvasCommand::Draw {
                    primitive,
                    vertices,
                } => target.draw(*primitive, vertices),
                CanvasCommand::Text {
                    origin,
                    scale,
                    text,
                } => target.draw_text(*origin, *scale, text),
            }
        }
    }
}

impl Canvas for RecordingCanvas {
    fn set_color(&mut self, color: Color) {
        self.commands.push(CanvasCommand::SetColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(CanvasCommand::SetLineWidth(width));
    }

    fn draw(&mut self, primitive: Primitive, vertices: &[Point]) {
        self.commands.push(CanvasCommand::Draw {
            primitive,
            vertices: vertices.to_vec(),
        });
    }

    fn draw_text(&mut self, origin: Point, scale: Point, text: &str) {
        self.commands.push(CanvasCommand::Text {
            origin,
            scale,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_quarter_turn() {
        let p = Point::new(1.0, 0.0).rotated(FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_from_rgba8() {
        assert_eq!(Color::from_rgba8(0, 0, 0, 255), Color::BLACK);
        assert_eq!(Color::from_rgba8(255, 255, 255, 255), Color::WHITE);
        assert_eq!(Color::from_rgba8(0, 0, 0, 0).a, 0.0);
    }

    #[test]
    fn test_replay_reproduces_commands() {
        let mut first = RecordingCanvas::new();
        first.set_color(Color::rgb(0.5, 0.25, 1.0));
        first.set_line_width(3.0);
        first.draw(Primitive::Lines, &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        first.draw_text(Point::new(2.0, 3.0), Point::new(1.0, -1.0), "hi");

        let mut second = RecordingCanvas::new();
        first.replay(&mut second);
        assert_eq!(first, second);

        assert_eq!(second.take().len(), 4);
        assert!(second.commands.is_empty());
    }
}
