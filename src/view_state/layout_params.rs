//! Global guide parameters: time window, grid geometry, scroll tuning.
//!
//! All values are fixed at configuration time and never renegotiated while
//! the widget runs. Pixel values are in the host's pixel unit (one terminal
//! cell for the bundled TUI).

use std::time::Duration;

pub const MINUTE_MILLIS: i64 = 60 * 1000;
pub const HOUR_MILLIS: i64 = 60 * MINUTE_MILLIS;
pub const DAY_MILLIS: i64 = 24 * HOUR_MILLIS;

/// Virtual time window of the scrollable canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// How far before "now" pixel 0 lies.
    pub back_millis: i64,
    /// How far after "now" the canvas extends.
    pub forward_millis: i64,
    /// Time span visible across the full viewport width at native zoom.
    pub viewport_millis: i64,
    /// Spacing of time-bar labels.
    pub tick_interval_millis: i64,
}

impl TimeWindow {
    /// Number of tick labels drawn per frame.
    pub fn tick_count(&self) -> i64 {
        if self.tick_interval_millis <= 0 {
            0
        } else {
            self.viewport_millis / self.tick_interval_millis
        }
    }

    /// Total time span of the canvas.
    pub fn span_millis(&self) -> i64 {
        self.back_millis + self.forward_millis
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            back_millis: 3 * DAY_MILLIS,
            forward_millis: 3 * DAY_MILLIS,
            viewport_millis: 2 * HOUR_MILLIS,
            tick_interval_millis: 30 * MINUTE_MILLIS,
        }
    }
}

/// Fixed sizes of the grid chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub row_height: i32,
    /// Gap between rows; also the stroke under the time bar.
    pub row_margin: i32,
    /// Inset for thumbnails and event titles.
    pub row_padding: i32,
    /// Width of the pinned channel column on the left.
    pub channel_column_width: i32,
    /// Gap between the channel column and the event area.
    pub column_margin: i32,
    pub time_bar_height: i32,
    pub now_line_width: i32,
    pub reset_button_size: i32,
    pub reset_button_margin: i32,
    /// The reset button appears once the "now" position is more than
    /// `viewport_width / reset_threshold_divisor` away from the scroll.
    pub reset_threshold_divisor: i32,
}

impl GridGeometry {
    /// Pixels left of the timeline origin: channel column plus a margin on
    /// each side of it.
    pub fn timeline_origin_x(&self) -> i32 {
        self.channel_column_width + 2 * self.column_margin
    }

    /// Vertical pitch of one row.
    pub fn row_pitch(&self) -> i32 {
        self.row_height + self.row_margin
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            row_height: 3,
            row_margin: 1,
            row_padding: 1,
            channel_column_width: 14,
            column_margin: 1,
            time_bar_height: 1,
            now_line_width: 1,
            reset_button_size: 3,
            reset_button_margin: 1,
            reset_threshold_divisor: 3,
        }
    }
}

/// Scroll physics tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTuning {
    /// Fling friction coefficient. Higher values stop sooner.
    pub fling_friction: f32,
    /// Pixel density used to turn friction into a deceleration.
    pub pixels_per_inch: f32,
    /// Duration of the animated "return to now".
    pub reset_animation: Duration,
    /// Distance moved by one directional nudge.
    pub nudge_step: i32,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            fling_friction: 0.2,
            pixels_per_inch: 4.0,
            reset_animation: Duration::from_millis(600),
            nudge_step: 10,
        }
    }
}

/// Everything the engine needs that is not per-frame state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GuideParams {
    pub window: TimeWindow,
    pub geometry: GridGeometry,
    pub scroll: ScrollTuning,
}
