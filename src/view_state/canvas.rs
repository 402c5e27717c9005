//! Draw operations and the canvas they are issued to.
//!
//! The render pipeline never touches a UI toolkit. It emits [`DrawOp`]s in
//! viewport-local coordinates (origin at the widget's top-left corner) to a
//! [`Canvas`], which the host implements.

use std::sync::Arc;

use crate::model::Bitmap;

use super::types::PixelRect;

/// Semantic fill/ink roles. The host maps these to concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    /// Widget background, time bar and the stroke under it.
    Background,
    /// Channel column cells.
    ChannelBackground,
    /// Event cell fill.
    Event,
    /// Event cell fill for the program airing now.
    EventCurrent,
    /// Event cell fill for the user's selection.
    EventSelected,
    /// Titles, tick labels, day name.
    Text,
    /// Now-line and reset button.
    TimeLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// `x` is the left edge of the text.
    Left,
    /// `x` is the horizontal centre of the text.
    Center,
}

/// A single draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: PixelRect,
        paint: Paint,
    },
    /// Single line of text; `y` is the top of the line box.
    Text {
        x: i32,
        y: i32,
        text: String,
        paint: Paint,
        align: TextAlign,
    },
    /// Scale `image` into `dst`.
    Bitmap {
        image: Arc<Bitmap>,
        dst: PixelRect,
    },
    Circle {
        cx: i32,
        cy: i32,
        radius: i32,
        paint: Paint,
    },
    /// "Return to now" glyph inside `dst`.
    ResetIcon {
        dst: PixelRect,
    },
    /// Restrict subsequent ops to the intersection with this rectangle.
    PushClip(PixelRect),
    PopClip,
}

/// Drawing surface plus the text metrics the pipeline needs for layout.
pub trait Canvas {
    /// Width of `text` in pixels.
    fn text_width(&self, text: &str) -> i32;

    /// Height of one line of text in pixels.
    fn line_height(&self) -> i32;

    fn draw(&mut self, op: DrawOp);
}

/// Canvas that records every op; text is measured as one pixel per char.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    line_height: i32,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            line_height: 1,
        }
    }

    /// Recording canvas with a custom line height (pixel-scale tests).
    pub fn with_line_height(line_height: i32) -> Self {
        Self {
            ops: Vec::new(),
            line_height,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// All text strings drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All filled rectangles with the given paint, in order.
    pub fn fills(&self, paint: Paint) -> Vec<PixelRect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, paint: p } if *p == paint => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

/// Longest prefix of `text` whose measured width fits in `max_width`.
///
/// Returns an empty string if not even the first character fits.
pub fn fit_text<'a>(canvas: &dyn Canvas, text: &'a str, max_width: i32) -> &'a str {
    if max_width <= 0 {
        return "";
    }
    if canvas.text_width(text) <= max_width {
        return text;
    }
    let mut end = 0;
    for (idx, ch) in text.char_indices() {
        let next = idx + ch.len_utf8();
        if canvas.text_width(&text[..next]) > max_width {
            break;
        }
        end = next;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_text_keeps_short_titles() {
        let canvas = RecordingCanvas::new();
        assert_eq!(fit_text(&canvas, "News", 10), "News");
    }

    #[test]
    fn fit_text_truncates_to_longest_fitting_prefix() {
        let canvas = RecordingCanvas::new();
        assert_eq!(fit_text(&canvas, "Evening News", 7), "Evening");
    }

    #[test]
    fn fit_text_handles_multibyte_chars() {
        let canvas = RecordingCanvas::new();
        assert_eq!(fit_text(&canvas, "Å ärlig öl", 3), "Å ä");
    }

    #[test]
    fn fit_text_with_no_room_is_empty() {
        let canvas = RecordingCanvas::new();
        assert_eq!(fit_text(&canvas, "News", 0), "");
        assert_eq!(fit_text(&canvas, "News", -4), "");
    }

    #[test]
    fn recording_canvas_filters_by_paint() {
        let mut canvas = RecordingCanvas::new();
        canvas.draw(DrawOp::FillRect {
            rect: PixelRect::new(0, 0, 1, 1),
            paint: Paint::Event,
        });
        canvas.draw(DrawOp::FillRect {
            rect: PixelRect::new(1, 1, 2, 2),
            paint: Paint::Background,
        });
        assert_eq!(canvas.fills(Paint::Event), vec![PixelRect::new(0, 0, 1, 1)]);
        assert_eq!(canvas.take_ops().len(), 2);
        assert!(canvas.ops().is_empty());
    }
}
