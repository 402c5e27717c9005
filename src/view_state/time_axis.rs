//! Time ↔ pixel mapping for the horizontal axis.

use super::layout_params::{GridGeometry, TimeWindow};
use super::types::saturate_i32;

/// Visible time range for one frame, `[lower, upper]` in epoch millis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub lower: i64,
    pub upper: i64,
}

impl TimeBounds {
    /// An interval is visible if it starts inside, ends inside, or spans
    /// the whole window.
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        (start >= self.lower && start <= self.upper)
            || (end >= self.lower && end <= self.upper)
            || (start <= self.lower && end >= self.upper)
    }

    /// Half-open test used for the now-line: `[lower, upper)`.
    pub fn contains(&self, time: i64) -> bool {
        time >= self.lower && time < self.upper
    }
}

/// Bidirectional mapping between epoch milliseconds and canvas x.
///
/// Only exists for a laid-out viewport: [`TimeAxis::recompute`] returns
/// `None` for a zero width, so `millis_per_pixel` is never zero.
///
/// The axis is anchored once per recompute: pixel 0 is "now minus the back
/// window" at that moment, and does not slide with wall-clock time until
/// the next recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxis {
    window: TimeWindow,
    origin_x: i32,
    millis_per_pixel: i64,
    time_offset: i64,
}

impl TimeAxis {
    /// Rebuild the axis for a viewport width, anchored at `now_millis`.
    pub fn recompute(
        window: TimeWindow,
        geometry: &GridGeometry,
        viewport_width: i32,
        now_millis: i64,
    ) -> Option<Self> {
        if viewport_width <= 0 {
            return None;
        }
        // Integer division; a viewport wider than the window in millis
        // would truncate to zero.
        let millis_per_pixel = (window.viewport_millis / i64::from(viewport_width)).max(1);
        Some(Self {
            window,
            origin_x: geometry.timeline_origin_x(),
            millis_per_pixel,
            time_offset: now_millis - window.back_millis,
        })
    }

    pub fn millis_per_pixel(&self) -> i64 {
        self.millis_per_pixel
    }

    /// Epoch time at pixel 0.
    pub fn time_offset(&self) -> i64 {
        self.time_offset
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Canvas x of a time. Includes the reserved channel column on the left.
    pub fn time_to_pixel(&self, time_millis: i64) -> i32 {
        let x = (time_millis - self.time_offset) / self.millis_per_pixel + i64::from(self.origin_x);
        saturate_i32(x)
    }

    /// Time at canvas x, measured from pixel 0 without the column offset.
    pub fn pixel_to_time(&self, x: i32) -> i64 {
        i64::from(x) * self.millis_per_pixel + self.time_offset
    }

    /// Time drawn at canvas x, i.e. the exact inverse of
    /// [`time_to_pixel`](Self::time_to_pixel).
    pub fn timeline_x_to_time(&self, x: i32) -> i64 {
        self.pixel_to_time(x - self.origin_x)
    }

    /// Visible time range for a scroll position and viewport width.
    pub fn visible_bounds(&self, scroll_x: i32, viewport_width: i32) -> TimeBounds {
        TimeBounds {
            lower: self.pixel_to_time(scroll_x),
            upper: self.pixel_to_time(scroll_x.saturating_add(viewport_width)),
        }
    }

    /// Total horizontal scroll range of the canvas.
    pub fn max_horizontal_scroll(&self) -> i32 {
        saturate_i32(self.window.span_millis() / self.millis_per_pixel)
    }

    /// Scroll x that centres "now" in the viewport's time window.
    pub fn now_scroll_position(&self, now_millis: i64) -> i32 {
        self.time_to_pixel(now_millis - self.window.viewport_millis / 2)
    }
}
