//! Time-bar label placement and formatting.

use chrono::{DateTime, Local, TimeZone, Utc};

use super::layout_params::TimeWindow;
use super::time_axis::TimeBounds;

/// Formats instants for the time bar.
pub trait TimeLabels {
    /// Tick label, e.g. `"14:30"`.
    fn short_time(&self, millis: i64) -> String;

    /// Day indicator, e.g. `"Tuesday"`.
    fn weekday_name(&self, millis: i64) -> String;
}

/// Labels rendered in a fixed time zone.
#[derive(Debug, Clone, Copy)]
pub struct ZonedLabels<Tz>(pub Tz);

/// Labels in the host's local time zone.
pub type LocalLabels = ZonedLabels<Local>;

/// Labels in UTC (deterministic across machines).
pub type UtcLabels = ZonedLabels<Utc>;

impl<Tz: TimeZone> ZonedLabels<Tz> {
    fn at(&self, millis: i64) -> Option<DateTime<Tz>> {
        DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(&self.0))
    }
}

impl<Tz: TimeZone> TimeLabels for ZonedLabels<Tz>
where
    Tz::Offset: std::fmt::Display,
{
    fn short_time(&self, millis: i64) -> String {
        self.at(millis)
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }

    fn weekday_name(&self, millis: i64) -> String {
        self.at(millis)
            .map(|t| t.format("%A").to_string())
            .unwrap_or_default()
    }
}

/// Instants of the tick labels for one frame.
///
/// One label per tick slot in the viewport window, each rounded to the
/// nearest multiple of the tick interval.
pub fn tick_times(bounds: &TimeBounds, window: &TimeWindow) -> Vec<i64> {
    let spacing = window.tick_interval_millis;
    if spacing <= 0 {
        return Vec::new();
    }
    (0..window.tick_count())
        .map(|i| spacing * ((bounds.lower + spacing * i + spacing / 2).div_euclid(spacing)))
        .collect()
}
