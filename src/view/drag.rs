//! Mouse drag classification: taps, pans and flings.
//!
//! Terminals report presses, drags and releases but no velocity, so the
//! tracker keeps a short history of drag samples and derives the release
//! velocity from it.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::state::Gesture;

use super::constants::{FLING_SAMPLE_WINDOW, MIN_FLING_VELOCITY};

#[derive(Debug, Clone, Copy)]
struct Sample {
    at: Instant,
    x: i32,
    y: i32,
}

/// Tracks one press-drag-release sequence.
#[derive(Debug, Default)]
pub struct DragTracker {
    last: Option<(i32, i32)>,
    moved: bool,
    samples: VecDeque<Sample>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.last.is_some()
    }

    /// Pointer pressed at `(x, y)`.
    pub fn press(&mut self, x: i32, y: i32, at: Instant) -> Gesture {
        self.last = Some((x, y));
        self.moved = false;
        self.samples.clear();
        self.samples.push_back(Sample { at, x, y });
        Gesture::Down
    }

    /// Pointer dragged to `(x, y)`. Returns the pan, if the pointer moved.
    pub fn drag(&mut self, x: i32, y: i32, at: Instant) -> Option<Gesture> {
        let (last_x, last_y) = self.last?;
        if (last_x, last_y) == (x, y) {
            return None;
        }
        self.last = Some((x, y));
        self.moved = true;
        self.samples.push_back(Sample { at, x, y });
        while self
            .samples
            .front()
            .is_some_and(|s| at.duration_since(s.at) > FLING_SAMPLE_WINDOW)
        {
            self.samples.pop_front();
        }
        // Dragging content left scrolls the viewport right.
        Some(Gesture::Pan {
            distance_x: last_x - x,
            distance_y: last_y - y,
        })
    }

    /// Pointer released at `(x, y)`: a tap if it never moved, a fling if it
    /// was still moving fast, otherwise a plain release.
    pub fn release(&mut self, x: i32, y: i32, at: Instant) -> Option<Gesture> {
        self.last?;
        let moved = self.moved;
        let velocity = self.velocity(at);
        self.last = None;
        self.moved = false;
        self.samples.clear();

        if !moved {
            return Some(Gesture::Tap { x, y });
        }
        match velocity {
            Some((vx, vy)) if vx.hypot(vy) >= MIN_FLING_VELOCITY => Some(Gesture::Fling {
                velocity_x: vx,
                velocity_y: vy,
            }),
            _ => Some(Gesture::Release),
        }
    }

    /// Pointer velocity over the recent samples, in cells per second.
    fn velocity(&self, now: Instant) -> Option<(f32, f32)> {
        let last = self.samples.back()?;
        if now.duration_since(last.at) > FLING_SAMPLE_WINDOW {
            // Pointer rested before release.
            return None;
        }
        let first = self.samples.front()?;
        let dt = last.at.duration_since(first.at);
        if dt < Duration::from_millis(1) {
            return None;
        }
        let secs = dt.as_secs_f32();
        Some((
            (last.x - first.x) as f32 / secs,
            (last.y - first.y) as f32 / secs,
        ))
    }
}
