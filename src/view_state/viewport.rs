//! Per-frame view snapshot shared by the renderer and the hit tester.

use super::layout::LayoutModel;
use super::time_axis::{TimeAxis, TimeBounds};
use super::types::{PixelRect, ScrollOffset, ViewportSize};

/// Everything needed to map between canvas, viewport and time for one
/// frame. Cheap to copy; rebuilt whenever scroll, size or time changes.
///
/// Coordinate spaces:
/// - *canvas*: the whole scrollable grid, origin at its top-left corner.
/// - *local*: the widget, origin at its top-left corner.
///
/// `canvas = local + scroll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub axis: TimeAxis,
    pub layout: LayoutModel,
    pub size: ViewportSize,
    pub scroll: ScrollOffset,
    pub now_millis: i64,
}

impl Viewport {
    pub fn time_bounds(&self) -> TimeBounds {
        self.axis.visible_bounds(self.scroll.x, self.size.width)
    }

    /// Scroll x at which "now" is centred.
    pub fn now_scroll_x(&self) -> i32 {
        self.axis.now_scroll_position(self.now_millis)
    }

    /// The reset button exists only once the user has scrolled more than a
    /// fraction of the viewport width away from "now".
    pub fn reset_button_visible(&self) -> bool {
        let divisor = self.layout.geometry().reset_threshold_divisor.max(1);
        let distance = (i64::from(self.now_scroll_x()) - i64::from(self.scroll.x)).abs();
        distance > i64::from(self.size.width / divisor)
    }

    /// Reset button square, pinned to the bottom-right corner, in canvas
    /// space.
    pub fn reset_button_rect(&self) -> PixelRect {
        let g = self.layout.geometry();
        let left = self.scroll.x + self.size.width - g.reset_button_size - g.reset_button_margin;
        let top = self.scroll.y + self.size.height - g.reset_button_size - g.reset_button_margin;
        PixelRect::from_size(left, top, g.reset_button_size, g.reset_button_size)
    }

    /// Channel column below the time bar, in local space.
    pub fn channels_hit_area(&self, channel_count: usize) -> PixelRect {
        let g = self.layout.geometry();
        PixelRect::new(
            0,
            g.time_bar_height,
            g.channel_column_width,
            self.rows_bottom(channel_count),
        )
    }

    /// Everything right of the channel column below the time bar, in local
    /// space.
    pub fn programs_hit_area(&self, channel_count: usize) -> PixelRect {
        let g = self.layout.geometry();
        PixelRect::new(
            g.channel_column_width,
            g.time_bar_height,
            self.size.width,
            self.rows_bottom(channel_count),
        )
    }

    /// Local y where the rows end: the viewport bottom, or earlier if the
    /// content is shorter.
    fn rows_bottom(&self, channel_count: usize) -> i32 {
        let content = channel_count as i64 * i64::from(self.layout.geometry().row_pitch());
        content.min(i64::from(self.size.height)) as i32
    }

    pub fn to_canvas(&self, local_x: i32, local_y: i32) -> (i32, i32) {
        (
            self.scroll.x.saturating_add(local_x),
            self.scroll.y.saturating_add(local_y),
        )
    }
}
