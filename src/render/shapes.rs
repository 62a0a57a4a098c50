//! # Shape Helpers
//!
//! Tessellates lines, disks, circles, ellipses, sectors and urchins into
//! [`Canvas`] primitives.
//!
//! Angles are in radians, 0 along +x and π/2 along +y. Sectors sweep
//! counter-clockwise from their start angle for a positive sweep. Ellipse
//! sectors are measured relative to the ellipse's own rotation.
//!
//! Curves get `ceil(accuracy × major radius × |sweep| / 2π)` segments, with a
//! default accuracy of 1.7 segments per unit of major radius, so a full
//! circle of radius 100 has 170 segments.
//!
//! ```
//! use padkit::render::canvas::{CanvasCommand, Color, Point, Primitive, RecordingCanvas};
//! use padkit::render::shapes::DrawHelper;
//!
//! let mut draw = DrawHelper::new(RecordingCanvas::new());
//! draw.set_color(Color::rgb(1.0, 0.0, 0.0));
//! draw.disk(Point::new(50.0, 50.0), 10.0);
//!
//! let commands = draw.into_canvas().commands;
//! assert!(matches!(
//!     &commands[1],
//!     CanvasCommand::Draw { primitive: Primitive::TriangleFan, .. }
//! ));
//! ```

use std::f32::consts::TAU;

use super::canvas::{Canvas, Color, Point, Primitive};
use super::text::TextAlignment;

/// Segments per unit of major radius over a full turn.
pub const DEFAULT_ELLIPSE_ACCURACY: f32 = 1.7;

/// Immediate-mode shape drawing on top of a [`Canvas`].
#[derive(Debug, Clone)]
pub struct DrawHelper<C> {
    canvas: C,
    accuracy: f32,
}

impl<C: Canvas> DrawHelper<C> {
    /// Wraps `canvas` with the default curve accuracy.
    pub fn new(canvas: C) -> Self {
        Self::with_accuracy(canvas, DEFAULT_ELLIPSE_ACCURACY)
    }

    /// Wraps `canvas` using `accuracy` segments per unit of major radius.
    /// Non-positive or non-finite values fall back to the default.
    pub fn with_accuracy(canvas: C, accuracy: f32) -> Self {
        let accuracy = if accuracy.is_finite() && accuracy > 0.0 {
            accuracy
        } else {
            DEFAULT_ELLIPSE_ACCURACY
        };
        Self { canvas, accuracy }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Sets the colour for all following draws. It is not restored.
    pub fn set_color(&mut self, color: Color) {
        self.canvas.set_color(color);
    }

    /// Sets the stroke width for all following line draws. Filled shapes
    /// ignore it. It is not restored.
    pub fn set_stroke_width(&mut self, width: f32) {
        self.canvas.set_line_width(width);
    }

    pub fn line(&mut self, start: Point, end: Point) {
        self.canvas.draw(Primitive::Lines, &[start, end]);
    }

    /// Line from `start` towards `end`, its length multiplied by `stretch`.
    pub fn line_stretched(&mut self, start: Point, end: Point, stretch: f32) {
        self.line(start, start + (end - start) * stretch);
    }

    pub fn line_by_angle(&mut self, start: Point, angle: f32, length: f32) {
        let (sin, cos) = angle.sin_cos();
        self.line(start, start + Point::new(cos, sin) * length);
    }

    pub fn disk(&mut self, center: Point, radius: f32) {
        self.disk_sector(center, radius, 0.0, TAU);
    }

    pub fn disk_sector(&mut self, center: Point, radius: f32, start_angle: f32, sweep: f32) {
        self.ellipse_fill_sector(center, radius, radius, 0.0, start_angle, sweep);
    }

    /// Circle outline, drawn with the current stroke width.
    pub fn circle(&mut self, center: Point, radius: f32) {
        self.ellipse(center, radius, radius, 0.0);
    }

    pub fn circle_sector(&mut self, center: Point, radius: f32, start_angle: f32, sweep: f32) {
        self.ellipse_sector(center, radius, radius, 0.0, start_angle, sweep);
    }

    /// Filled ellipse. `angle` is the direction of the major radius.
    pub fn ellipse_fill(&mut self, center: Point, minor: f32, major: f32, angle: f32) {
        self.ellipse_fill_sector(center, minor, major, angle, 0.0, TAU);
    }

    /// Filled sector of an ellipse, as a triangle fan around `center`.
    pub fn ellipse_fill_sector(
        &mut self,
        center: Point,
        minor: f32,
        major: f32,
        angle: f32,
        start_angle: f32,
        sweep: f32,
    ) {
        let slices = self.slice_count(major, sweep);
        let mut vertices = Vec::with_capacity(slices + 2);
        vertices.push(center);
        vertices.extend(arc_points(center, minor, major, angle, start_angle, sweep, slices));
        self.canvas.draw(Primitive::TriangleFan, &vertices);
    }

    /// Ellipse outline, as a closed line loop.
    pub fn ellipse(&mut self, center: Point, minor: f32, major: f32, angle: f32) {
        let slices = self.slice_count(major, TAU);
        let mut vertices: Vec<Point> =
            arc_points(center, minor, major, angle, 0.0, TAU, slices).collect();
        // The loop closes itself
        vertices.pop();
        self.canvas.draw(Primitive::LineLoop, &vertices);
    }

    /// Open arc of an ellipse outline.
    pub fn ellipse_sector(
        &mut self,
        center: Point,
        minor: f32,
        major: f32,
        angle: f32,
        start_angle: f32,
        sweep: f32,
    ) {
        let slices = self.slice_count(major, sweep);
        let vertices: Vec<Point> =
            arc_points(center, minor, major, angle, start_angle, sweep, slices).collect();
        self.canvas.draw(Primitive::LineStrip, &vertices);
    }

    /// Star-like closed outline with `spines` points, alternating between
    /// `small_radius` and `big_radius`. The first vertex lies at
    /// `small_radius` along `angle`.
    pub fn urchin(
        &mut self,
        center: Point,
        small_radius: f32,
        big_radius: f32,
        spines: u32,
        angle: f32,
    ) {
        if spines == 0 {
            return;
        }
        let count = spines as usize * 2;
        let vertices: Vec<Point> = (0..count)
            .map(|i| {
                let radius = if i % 2 == 1 { big_radius } else { small_radius };
                let theta = i as f32 * TAU / count as f32;
                let (sin, cos) = theta.sin_cos();
                center + Point::new(radius * cos, radius * sin).rotated(angle)
            })
            .collect();
        self.canvas.draw(Primitive::LineLoop, &vertices);
    }

    /// Draws `text` anchored at `origin`.
    ///
    /// Each glyph is roughly `5 × scale` wide.
    pub fn draw_string(&mut self, origin: Point, text: &str, scale: f32, alignment: TextAlignment) {
        let offset = alignment.x_offset(text, scale);
        self.canvas.draw_text(
            Point::new(origin.x - offset, origin.y),
            Point::new(scale, -scale),
            text,
        );
    }

    fn slice_count(&self, major: f32, sweep: f32) -> usize {
        let turns = sweep.abs() / TAU;
        let slices = (self.accuracy * major.abs() * turns).ceil();
        // NaN and negatives saturate to 0
        (slices as usize).max(1)
    }
}

/// `slices + 1` points along an ellipse arc, rotated by `angle` about `center`.
fn arc_points(
    center: Point,
    minor: f32,
    major: f32,
    angle: f32,
    start_angle: f32,
    sweep: f32,
    slices: usize,
) -> impl Iterator<Item = Point> {
    (0..=slices).map(move |i| {
        let theta = i as f32 * sweep / slices as f32 + start_angle;
        let (sin, cos) = theta.sin_cos();
        center + Point::new(major * cos, minor * sin).rotated(angle)
    })
}
