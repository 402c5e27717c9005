//! Guide data source contract and the in-memory implementation.

use super::channel::Channel;
use super::event::Event;

/// Ordered channels with per-channel ordered, non-overlapping events.
///
/// Row `i` of the grid is `channel_at(i)`. Implementations must keep each
/// channel's events sorted ascending by start with `end[i] <= start[i+1]`;
/// the engine relies on this and never re-sorts.
pub trait EpgDataSource {
    fn channel_count(&self) -> usize;

    fn channel_at(&self, index: usize) -> Option<&Channel>;

    /// Events for a channel row. Out-of-range rows yield an empty slice.
    fn events_for(&self, channel_index: usize) -> &[Event];

    fn event_at(&self, channel_index: usize, event_index: usize) -> Option<&Event> {
        self.events_for(channel_index).get(event_index)
    }

    fn has_data(&self) -> bool {
        self.channel_count() > 0
    }

    /// Drop every event's selected highlight.
    fn clear_selection(&mut self);

    /// Mark one event selected. Returns false if the indices are invalid.
    fn select_event(&mut self, channel_index: usize, event_index: usize) -> bool;
}

/// Vec-backed data source.
#[derive(Debug, Clone, Default)]
pub struct GuideData {
    channels: Vec<Channel>,
    events: Vec<Vec<Event>>,
    selected: Option<(usize, usize)>,
}

impl GuideData {
    /// Build from `(channel, events)` rows in display order.
    ///
    /// Events are taken as given; see [`schedule_violation`] for checking
    /// the ordering invariant up front.
    pub fn new(rows: Vec<(Channel, Vec<Event>)>) -> Self {
        let (channels, events) = rows.into_iter().unzip();
        Self {
            channels,
            events,
            selected: None,
        }
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Currently selected `(channel, event)` indices, if any.
    pub fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }
}

impl EpgDataSource for GuideData {
    fn channel_count(&self) -> usize {
        self.channels.len()
    }

    fn channel_at(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    fn events_for(&self, channel_index: usize) -> &[Event] {
        self.events
            .get(channel_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn clear_selection(&mut self) {
        if let Some((ch, ev)) = self.selected.take() {
            if let Some(event) = self.events.get_mut(ch).and_then(|row| row.get_mut(ev)) {
                event.set_selected(false);
            }
        }
    }

    fn select_event(&mut self, channel_index: usize, event_index: usize) -> bool {
        let Some(event) = self
            .events
            .get_mut(channel_index)
            .and_then(|row| row.get_mut(event_index))
        else {
            return false;
        };
        event.set_selected(true);
        self.selected = Some((channel_index, event_index));
        true
    }
}

/// First position in `events` that breaks the schedule invariant.
///
/// Returns the index of the offending event: either its `end` precedes
/// its `start`, or it starts before the previous event ended.
pub fn schedule_violation(events: &[Event]) -> Option<usize> {
    for (i, event) in events.iter().enumerate() {
        if event.end_millis() < event.start_millis() {
            return Some(i);
        }
        if i > 0 && events[i - 1].end_millis() > event.start_millis() {
            return Some(i);
        }
    }
    None
}
