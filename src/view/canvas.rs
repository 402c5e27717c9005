//! Canvas over a ratatui buffer: one cell is one pixel.

use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::model::Bitmap;
use crate::view_state::{Canvas, DrawOp, Paint, PixelRect, TextAlign};

use super::styles::GuideStyles;

/// Glyph used for the "return to now" icon.
const RESET_GLYPH: &str = "↺";

/// Draws guide ops into `area` of a frame buffer.
///
/// Op coordinates are relative to `area`; anything outside it or outside the
/// current clip is dropped.
pub struct TerminalCanvas<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
    styles: &'a GuideStyles,
    clips: Vec<PixelRect>,
}

impl<'a> TerminalCanvas<'a> {
    pub fn new(buffer: &'a mut Buffer, area: Rect, styles: &'a GuideStyles) -> Self {
        let bounds = PixelRect::from_size(0, 0, i32::from(area.width), i32::from(area.height));
        Self {
            buffer,
            area,
            styles,
            clips: vec![bounds],
        }
    }

    fn clip(&self) -> PixelRect {
        self.clips.last().copied().unwrap_or_default()
    }

    /// Apply `f` to every buffer cell inside `rect` and the current clip.
    fn for_each_cell(&mut self, rect: PixelRect, mut f: impl FnMut(&mut Cell, i32, i32)) {
        let visible = rect.intersection(&self.clip());
        if visible.is_empty() {
            return;
        }
        for y in visible.top..visible.bottom {
            for x in visible.left..visible.right {
                let pos = self.position(x, y);
                if let Some(cell) = self.buffer.cell_mut(pos) {
                    f(cell, x, y);
                }
            }
        }
    }

    fn position(&self, x: i32, y: i32) -> (u16, u16) {
        // Callers stay inside the clip, which never exceeds the area.
        (self.area.x + x as u16, self.area.y + y as u16)
    }

    fn fill(&mut self, rect: PixelRect, paint: Paint) {
        let cell_paint = self.styles.paint(paint);
        self.for_each_cell(rect, |cell, _, _| {
            cell.set_symbol(cell_paint.fill).set_style(cell_paint.style);
        });
    }

    fn text(&mut self, x: i32, y: i32, text: &str, paint: Paint, align: TextAlign) {
        let clip = self.clip();
        if y < clip.top || y >= clip.bottom {
            return;
        }
        let start = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - text.width() as i32 / 2,
        };
        // Text keeps the cell background it lands on.
        let fg = self.styles.paint(paint).style.fg;
        let mut cx = start;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as i32;
            if w == 0 {
                continue;
            }
            if cx >= clip.left && cx + w <= clip.right {
                let pos = self.position(cx, y);
                if let Some(cell) = self.buffer.cell_mut(pos) {
                    cell.set_symbol(ch.encode_utf8(&mut buf));
                    if let Some(fg) = fg {
                        cell.set_fg(fg);
                    }
                }
            }
            cx += w;
            if cx >= clip.right {
                break;
            }
        }
    }

    fn bitmap(&mut self, image: &Bitmap, dst: PixelRect) {
        if dst.is_empty() {
            return;
        }
        let colors = self.styles.colors_enabled();
        let (w, h) = (i64::from(dst.width()), i64::from(dst.height()));
        let (iw, ih) = (i64::from(image.width()), i64::from(image.height()));
        self.for_each_cell(dst, |cell, x, y| {
            // Nearest-neighbour sample at the cell centre.
            let sx = ((i64::from(x - dst.left) * 2 + 1) * iw / (2 * w)) as u32;
            let sy = ((i64::from(y - dst.top) * 2 + 1) * ih / (2 * h)) as u32;
            let [r, g, b, a] = image.pixel(sx, sy);
            if a < 128 {
                return;
            }
            if colors {
                cell.set_symbol(" ").set_bg(Color::Rgb(r, g, b));
            } else {
                cell.set_symbol(shade(r, g, b)).set_style(Style::default());
            }
        });
    }

    fn circle(&mut self, cx: i32, cy: i32, radius: i32, paint: Paint) {
        let bounds = PixelRect::new(cx - radius, cy - radius, cx + radius, cy + radius);
        let cell_paint = self.styles.paint(paint);
        let r2 = i64::from(radius) * i64::from(radius);
        self.for_each_cell(bounds, |cell, x, y| {
            // Distance from the cell centre, in doubled units.
            let dx = i64::from(2 * (x - cx) + 1);
            let dy = i64::from(2 * (y - cy) + 1);
            if dx * dx + dy * dy <= 4 * r2 {
                cell.set_symbol(cell_paint.fill).set_style(cell_paint.style);
            }
        });
    }

    fn reset_icon(&mut self, dst: PixelRect) {
        if dst.is_empty() {
            return;
        }
        let x = dst.left + dst.width() / 2;
        let y = dst.top + dst.height() / 2;
        let style = self.styles.icon();
        self.for_each_cell(PixelRect::from_size(x, y, 1, 1), |cell, _, _| {
            cell.set_symbol(RESET_GLYPH).set_style(style);
        });
    }
}

/// Monochrome stand-in for a pixel color.
fn shade(r: u8, g: u8, b: u8) -> &'static str {
    let luma = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
    match luma {
        0..=63 => " ",
        64..=127 => "░",
        128..=191 => "▒",
        _ => "▓",
    }
}

impl Canvas for TerminalCanvas<'_> {
    fn text_width(&self, text: &str) -> i32 {
        text.width() as i32
    }

    fn line_height(&self) -> i32 {
        1
    }

    fn draw(&mut self, op: DrawOp) {
        match op {
            DrawOp::FillRect { rect, paint } => self.fill(rect, paint),
            DrawOp::Text {
                x,
                y,
                text,
                paint,
                align,
            } => self.text(x, y, &text, paint, align),
            DrawOp::Bitmap { image, dst } => self.bitmap(&image, dst),
            DrawOp::Circle {
                cx,
                cy,
                radius,
                paint,
            } => self.circle(cx, cy, radius, paint),
            DrawOp::ResetIcon { dst } => self.reset_icon(dst),
            DrawOp::PushClip(rect) => {
                let clip = self.clip().intersection(&rect);
                self.clips.push(clip);
            }
            DrawOp::PopClip => {
                // The area bounds are never popped.
                if self.clips.len() > 1 {
                    self.clips.pop();
                }
            }
        }
    }
}
