//! Timing and layout constants for the terminal host.

use std::time::Duration;

/// Height of the status bar in lines.
///
/// Single line for the last click result and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Frame interval while the widget animates or images are loading.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Poll timeout while idle. The now-line only needs a minute-scale refresh.
pub const IDLE_TICK: Duration = Duration::from_secs(30);

/// Only drag samples this recent count towards fling velocity.
pub const FLING_SAMPLE_WINDOW: Duration = Duration::from_millis(100);

/// Release speeds below this (cells per second) end the drag without a fling.
pub const MIN_FLING_VELOCITY: f32 = 10.0;
