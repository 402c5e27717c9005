//! Scheduled program event.

/// A scheduled program on a channel.
///
/// `start_millis`/`end_millis` are epoch milliseconds. The `selected` flag
/// is UI-only highlight state: it is not part of equality and never
/// persisted.
#[derive(Debug, Clone)]
pub struct Event {
    start_millis: i64,
    end_millis: i64,
    title: String,
    selected: bool,
}

impl Event {
    pub fn new(start_millis: i64, end_millis: i64, title: impl Into<String>) -> Self {
        Self {
            start_millis,
            end_millis,
            title: title.into(),
            selected: false,
        }
    }

    pub fn start_millis(&self) -> i64 {
        self.start_millis
    }

    pub fn end_millis(&self) -> i64 {
        self.end_millis
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// True iff `now` falls in `[start, end]` (both ends inclusive).
    pub fn is_current(&self, now_millis: i64) -> bool {
        now_millis >= self.start_millis && now_millis <= self.end_millis
    }

    /// True iff `time` falls in `[start, end]`.
    pub fn contains(&self, time_millis: i64) -> bool {
        self.start_millis <= time_millis && self.end_millis >= time_millis
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.start_millis == other.start_millis
            && self.end_millis == other.end_millis
            && self.title == other.title
    }
}

impl Eq for Event {}
