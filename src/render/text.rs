//! Text anchoring for [`DrawHelper::draw_string`](super::shapes::DrawHelper::draw_string).

/// Approximate glyph advance in glyph-grid units.
pub const GLYPH_WIDTH: f32 = 5.0;

/// Which point of the text the draw origin refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    /// Origin is the top-left corner.
    #[default]
    LeftTop,
    /// Origin is the middle of the top edge.
    MiddleTop,
}

impl TextAlignment {
    /// Horizontal shift, in whole units, from the origin to the text's left edge.
    ///
    /// ```
    /// use padkit::render::text::TextAlignment;
    ///
    /// assert_eq!(TextAlignment::LeftTop.x_offset("hello", 2.0), 0.0);
    /// assert_eq!(TextAlignment::MiddleTop.x_offset("hello", 2.0), 25.0);
    /// ```
    #[must_use]
    pub fn x_offset(self, text: &str, scale: f32) -> f32 {
        match self {
            TextAlignment::LeftTop => 0.0,
            TextAlignment::MiddleTop => {
                (text.chars().count() as f32 * scale * GLYPH_WIDTH / 2.0).round()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::{CanvasCommand, Point, RecordingCanvas};
    use crate::render::shapes::DrawHelper;

    #[test]
    fn test_middle_offset_rounds() {
        // 3 * 1.5 * 5 / 2 = 11.25
        assert_eq!(TextAlignment::MiddleTop.x_offset("abc", 1.5), 11.0);
        assert_eq!(TextAlignment::MiddleTop.x_offset("", 4.0), 0.0);
    }

    #[test]
    fn test_offset_counts_characters_not_bytes() {
        assert_eq!(
            TextAlignment::MiddleTop.x_offset("ééé", 2.0),
            TextAlignment::MiddleTop.x_offset("eee", 2.0)
        );
    }

    #[test]
    fn test_draw_string_anchors_and_flips() {
        let mut draw = DrawHelper::new(RecordingCanvas::new());
        draw.draw_string(Point::new(100.0, 50.0), "score", 2.0, TextAlignment::MiddleTop);
        draw.draw_string(Point::new(100.0, 50.0), "score", 2.0, TextAlignment::default());

        let commands = draw.into_canvas().commands;
        assert_eq!(
            commands,
            vec![
                CanvasCommand::Text {
                    origin: Point::new(75.0, 50.0),
                    scale: Point::new(2.0, -2.0),
                    text: "score".to_string(),
                },
                CanvasCommand::Text {
                    origin: Point::new(100.0, 50.0),
                    scale: Point::new(2.0, -2.0),
                    text: "score".to_string(),
                },
            ]
        );
    }
}
