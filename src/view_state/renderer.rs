//! Per-frame draw pipeline for the guide grid.
//!
//! Draw order, back to front:
//!
//! 1. Channel column background and one cell per visible row (thumbnail if
//!    cached, otherwise the channel name while the thumbnail loads)
//! 2. Event cells of each visible row, clipped to the program area
//! 3. Time bar with tick labels, the day indicator and the bottom stroke
//! 4. Now-line, if "now" is inside the visible time range
//! 5. Reset button, if the user has scrolled away from "now"
//!
//! Geometry is computed in canvas space and emitted in viewport-local
//! space. Drawing is pure given its inputs, except that a missing thumbnail
//! starts a load through the [`ImageCache`].

use tracing::trace;

use crate::model::{Bitmap, Channel, EpgDataSource, Event};

use super::canvas::{Canvas, DrawOp, Paint, TextAlign, fit_text};
use super::image_cache::ImageCache;
use super::time_axis::TimeBounds;
use super::time_labels::{TimeLabels, tick_times};
use super::types::{PixelRect, RedrawRequest};
use super::viewport::Viewport;

/// Read-only inputs of one frame.
pub struct FrameContext<'a> {
    pub viewport: Viewport,
    pub data: &'a dyn EpgDataSource,
    pub labels: &'a dyn TimeLabels,
    /// Raised by thumbnail loads that complete after this frame.
    pub redraw: &'a RedrawRequest,
}

/// What a frame drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub rows: usize,
    pub events: usize,
    pub loads_started: usize,
}

/// Draw one frame. Does nothing without data.
pub fn render_frame(
    ctx: &FrameContext<'_>,
    images: &mut ImageCache,
    canvas: &mut dyn Canvas,
) -> RenderStats {
    let mut stats = RenderStats::default();
    if !ctx.data.has_data() || !ctx.viewport.size.is_laid_out() {
        return stats;
    }
    let bounds = ctx.viewport.time_bounds();
    let size = ctx.viewport.size;

    canvas.draw(DrawOp::FillRect {
        rect: PixelRect::from_size(0, 0, size.width, size.height),
        paint: Paint::Background,
    });

    draw_channel_column(ctx, images, canvas, &mut stats);
    draw_events(ctx, &bounds, canvas, &mut stats);
    draw_time_bar(ctx, &bounds, canvas);
    draw_now_line(ctx, &bounds, canvas);
    draw_reset_button(ctx, canvas);

    trace!(
        rows = stats.rows,
        events = stats.events,
        loads = stats.loads_started,
        "Frame rendered"
    );
    stats
}

fn draw_channel_column(
    ctx: &FrameContext<'_>,
    images: &mut ImageCache,
    canvas: &mut dyn Canvas,
    stats: &mut RenderStats,
) {
    let vp = &ctx.viewport;
    let g = *vp.layout.geometry();

    canvas.draw(DrawOp::FillRect {
        rect: PixelRect::from_size(0, 0, g.channel_column_width, vp.size.height),
        paint: Paint::ChannelBackground,
    });

    let Some(rows) = vp
        .layout
        .visible_rows(vp.scroll.y, vp.size.height, ctx.data.channel_count())
    else {
        return;
    };

    for row in rows.indices() {
        let Some(channel) = ctx.data.channel_at(row) else {
            continue;
        };
        let top = vp.layout.row_top(row) - vp.scroll.y;
        let cell = PixelRect::from_size(0, top, g.channel_column_width, g.row_height);
        stats.rows += 1;

        match images.get(channel.image_key()) {
            Some(image) => {
                let dst = thumbnail_rect(cell, &image, g.row_padding);
                canvas.draw(DrawOp::Bitmap { image, dst });
            }
            None => {
                draw_channel_name(channel, cell, g.row_padding, canvas);
                let side = g.row_height.min(g.channel_column_width).max(1) as u32;
                let redraw = ctx.redraw.clone();
                if images.ensure_loading(
                    channel.image_key(),
                    side,
                    side,
                    Box::new(move |_| redraw.request()),
                ) {
                    stats.loads_started += 1;
                }
            }
        }
    }
}

fn draw_channel_name(channel: &Channel, cell: PixelRect, padding: i32, canvas: &mut dyn Canvas) {
    let inner = cell.inset(padding, 0);
    let name = fit_text(canvas, channel.display_name(), inner.width());
    if name.is_empty() {
        return;
    }
    canvas.draw(DrawOp::Text {
        x: inner.left,
        y: cell.top + (cell.height() - canvas.line_height()) / 2,
        text: name.to_string(),
        paint: Paint::Text,
        align: TextAlign::Left,
    });
}

/// Fit `image` into the padded cell, keeping its aspect ratio and
/// centring it along the slack axis.
pub fn thumbnail_rect(cell: PixelRect, image: &Bitmap, padding: i32) -> PixelRect {
    let mut rect = cell.inset(padding, padding);
    let (image_w, image_h) = (image.width() as f32, image.height() as f32);
    let ratio = image_h / image_w;
    let (rect_w, rect_h) = (rect.width() as f32, rect.height() as f32);

    if image_w > image_h {
        let pad = ((rect_h - rect_w * ratio) as i32 / 2).max(0);
        rect.top += pad;
        rect.bottom -= pad;
    } else {
        let pad = ((rect_w - rect_h / ratio) as i32 / 2).max(0);
        rect.left += pad;
        rect.right -= pad;
    }
    rect
}

fn draw_events(
    ctx: &FrameContext<'_>,
    bounds: &TimeBounds,
    canvas: &mut dyn Canvas,
    stats: &mut RenderStats,
) {
    let vp = &ctx.viewport;
    let g = *vp.layout.geometry();
    let Some(rows) = vp
        .layout
        .visible_rows(vp.scroll.y, vp.size.height, ctx.data.channel_count())
    else {
        return;
    };

    for row in rows.indices() {
        let top = vp.layout.row_top(row) - vp.scroll.y;
        canvas.draw(DrawOp::PushClip(PixelRect::new(
            g.channel_column_width + g.column_margin,
            top,
            vp.size.width,
            top + g.row_height,
        )));

        // Visible events form one run; stop reading at its end.
        let mut found_first = false;
        for event in (0..).map_while(|index| ctx.data.event_at(row, index)) {
            if bounds.overlaps(event.start_millis(), event.end_millis()) {
                draw_event(ctx, event, top, canvas);
                stats.events += 1;
                found_first = true;
            } else if found_first {
                break;
            }
        }

        canvas.draw(DrawOp::PopClip);
    }
}

fn draw_event(ctx: &FrameContext<'_>, event: &Event, top: i32, canvas: &mut dyn Canvas) {
    let vp = &ctx.viewport;
    let g = vp.layout.geometry();
    let rect = PixelRect::new(
        vp.axis.time_to_pixel(event.start_millis()) - vp.scroll.x,
        top,
        vp.axis.time_to_pixel(event.end_millis()) - g.column_margin - vp.scroll.x,
        top + g.row_height,
    );

    let paint = if event.is_selected() {
        Paint::EventSelected
    } else if event.is_current(vp.now_millis) {
        Paint::EventCurrent
    } else {
        Paint::Event
    };
    canvas.draw(DrawOp::FillRect { rect, paint });

    let inner = rect.inset(g.row_padding, 0);
    let title = fit_text(canvas, event.title(), inner.width());
    if title.is_empty() {
        return;
    }
    canvas.draw(DrawOp::Text {
        x: inner.left,
        y: top + (g.row_height - canvas.line_height()) / 2,
        text: title.to_string(),
        paint: Paint::Text,
        align: TextAlign::Left,
    });
}

fn draw_time_bar(ctx: &FrameContext<'_>, bounds: &TimeBounds, canvas: &mut dyn Canvas) {
    let vp = &ctx.viewport;
    let g = vp.layout.geometry();
    let bar_left = g.channel_column_width + g.column_margin;
    let text_y = (g.time_bar_height - canvas.line_height()) / 2;

    canvas.draw(DrawOp::PushClip(PixelRect::new(
        bar_left,
        0,
        vp.size.width,
        g.time_bar_height,
    )));
    canvas.draw(DrawOp::FillRect {
        rect: PixelRect::from_size(bar_left, 0, vp.size.width, g.time_bar_height),
        paint: Paint::ChannelBackground,
    });
    for tick in tick_times(bounds, vp.axis.window()) {
        canvas.draw(DrawOp::Text {
            x: vp.axis.time_to_pixel(tick) - vp.scroll.x,
            y: text_y,
            text: ctx.labels.short_time(tick),
            paint: Paint::Text,
            align: TextAlign::Left,
        });
    }
    canvas.draw(DrawOp::PopClip);

    // Day indicator over the channel column.
    canvas.draw(DrawOp::FillRect {
        rect: PixelRect::from_size(0, 0, g.channel_column_width, g.time_bar_height),
        paint: Paint::ChannelBackground,
    });
    canvas.draw(DrawOp::Text {
        x: g.channel_column_width / 2,
        y: text_y,
        text: ctx.labels.weekday_name(bounds.lower),
        paint: Paint::Text,
        align: TextAlign::Center,
    });

    canvas.draw(DrawOp::FillRect {
        rect: PixelRect::from_size(0, g.time_bar_height, vp.size.width, g.row_margin),
        paint: Paint::Background,
    });
}

fn draw_now_line(ctx: &FrameContext<'_>, bounds: &TimeBounds, canvas: &mut dyn Canvas) {
    let vp = &ctx.viewport;
    if !bounds.contains(vp.now_millis) {
        return;
    }
    let x = vp.axis.time_to_pixel(vp.now_millis) - vp.scroll.x;
    canvas.draw(DrawOp::FillRect {
        rect: PixelRect::from_size(x, 0, vp.layout.geometry().now_line_width, vp.size.height),
        paint: Paint::TimeLine,
    });
}

fn draw_reset_button(ctx: &FrameContext<'_>, canvas: &mut dyn Canvas) {
    let vp = &ctx.viewport;
    if !vp.reset_button_visible() {
        return;
    }
    let g = vp.layout.geometry();
    let rect = vp.reset_button_rect().translated(vp.scroll.x, vp.scroll.y);
    canvas.draw(DrawOp::Circle {
        cx: rect.right - g.reset_button_size / 2,
        cy: rect.bottom - g.reset_button_size / 2,
        radius: rect.width().min(rect.height()) / 2,
        paint: Paint::TimeLine,
    });
    canvas.draw(DrawOp::ResetIcon {
        dst: rect.inset(g.reset_button_margin, g.reset_button_margin),
    });
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
