//! Scroll offset, clamping, fling physics and the animated return to now.
//!
//! The controller is a small state machine over the viewport's scroll offset:
//!
//! - `Idle`: offset is static.
//! - `Panning`: gesture deltas are applied directly, truncated at the bounds.
//! - `Flinging`: a constant-deceleration integrator moves the offset as a
//!   function of time since the fling started.
//! - `AnimatingToReset`: `x` eases towards a target over a fixed duration.
//!
//! Motion is cooperative. Nothing runs on its own: the host calls
//! [`ScrollController::step`] once per rendered frame with the frame's
//! elapsed time, and the controller returns to `Idle` once the motion
//! reports completion. Any new gesture force-stops motion first.
//!
//! # Clamping
//! After every operation the offset lies in `[0, max.x] x [0, max.y]`.

use std::time::Duration;

use super::layout_params::ScrollTuning;
use super::types::ScrollOffset;

const GRAVITY_EARTH: f32 = 9.806_65;
const INCHES_PER_METER: f32 = 39.37;
const VISCOUS_FLUID_SCALE: f32 = 8.0;
/// Longest fling, for near-zero friction.
const MAX_FLING_SECS: f32 = 60.0;

/// Externally visible controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    Idle,
    Panning,
    Flinging,
    AnimatingToReset,
}

/// Result of one physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollStep {
    /// The offset changed during this step.
    pub moved: bool,
    /// Motion continues; the host should schedule another frame.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Fling {
    start: ScrollOffset,
    finish: ScrollOffset,
    dir_x: f32,
    dir_y: f32,
    velocity: f32,
    deceleration: f32,
    duration: Duration,
    elapsed: Duration,
}

impl Fling {
    fn new(start: ScrollOffset, vx: f32, vy: f32, max: ScrollOffset, deceleration: f32) -> Self {
        let velocity = vx.hypot(vy);
        let (dir_x, dir_y) = if velocity > 0.0 {
            (vx / velocity, vy / velocity)
        } else {
            (0.0, 0.0)
        };
        // Zero friction would never stop; treat it as no fling at all.
        let secs = if deceleration.is_finite() && deceleration > 0.0 && velocity > 0.0 {
            (velocity / deceleration).min(MAX_FLING_SECS)
        } else {
            0.0
        };
        let (duration, distance) = match Duration::try_from_secs_f32(secs) {
            Ok(duration) if secs > 0.0 => {
                (duration, velocity * secs - deceleration * secs * secs / 2.0)
            }
            _ => (Duration::ZERO, 0.0),
        };
        let finish = ScrollOffset::new(
            start.x.saturating_add((distance * dir_x).round() as i32),
            start.y.saturating_add((distance * dir_y).round() as i32),
        )
        .clamped(max);

        Self {
            start,
            finish,
            dir_x,
            dir_y,
            velocity,
            deceleration,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    fn position(&self, max: ScrollOffset) -> ScrollOffset {
        let t = self.elapsed.as_secs_f32();
        let distance = self.velocity * t - self.deceleration * t * t / 2.0;
        ScrollOffset::new(
            self.start.x.saturating_add((distance * self.dir_x).round() as i32),
            self.start.y.saturating_add((distance * self.dir_y).round() as i32),
        )
        .clamped(max)
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ResetAnimation {
    start_x: i32,
    target_x: i32,
    duration: Duration,
    elapsed: Duration,
}

impl ResetAnimation {
    fn x(&self) -> i32 {
        if self.is_finished() {
            return self.target_x;
        }
        let progress = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let delta = (self.target_x - self.start_x) as f32;
        self.start_x + (delta * viscous_fluid(progress)).round() as i32
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Motion {
    Idle,
    Panning,
    Flinging(Fling),
    Animating(ResetAnimation),
}

/// Owns the scroll offset and its motion.
#[derive(Debug, Clone)]
pub struct ScrollController {
    offset: ScrollOffset,
    max: ScrollOffset,
    motion: Motion,
    tuning: ScrollTuning,
}

impl ScrollController {
    pub fn new(tuning: ScrollTuning) -> Self {
        Self {
            offset: ScrollOffset::default(),
            max: ScrollOffset::default(),
            motion: Motion::Idle,
            tuning,
        }
    }

    pub fn offset(&self) -> ScrollOffset {
        self.offset
    }

    pub fn max_offset(&self) -> ScrollOffset {
        self.max
    }

    pub fn tuning(&self) -> &ScrollTuning {
        &self.tuning
    }

    pub fn phase(&self) -> ScrollPhase {
        match self.motion {
            Motion::Idle => ScrollPhase::Idle,
            Motion::Panning => ScrollPhase::Panning,
            Motion::Flinging(_) => ScrollPhase::Flinging,
            Motion::Animating(_) => ScrollPhase::AnimatingToReset,
        }
    }

    /// True while a fling or reset animation still needs frames.
    pub fn is_in_motion(&self) -> bool {
        matches!(self.motion, Motion::Flinging(_) | Motion::Animating(_))
    }

    /// Install new maximum offsets and re-clamp the current offset.
    ///
    /// Returns true if the offset moved.
    pub fn set_bounds(&mut self, max: ScrollOffset) -> bool {
        self.max = ScrollOffset::new(max.x.max(0), max.y.max(0));
        let clamped = self.offset.clamped(self.max);
        let moved = clamped != self.offset;
        self.offset = clamped;
        moved
    }

    /// Stop any fling or animation where it is. Returns true if motion was
    /// interrupted.
    pub fn force_stop(&mut self) -> bool {
        let was_moving = self.is_in_motion();
        if was_moving {
            self.motion = Motion::Idle;
        }
        was_moving
    }

    /// Apply a pan delta. A delta that would overshoot stops exactly at the
    /// bound. Returns true if the offset moved.
    pub fn pan(&mut self, dx: i32, dy: i32) -> bool {
        self.force_stop();
        self.motion = Motion::Panning;
        self.move_to(ScrollOffset::new(
            self.offset.x.saturating_add(dx),
            self.offset.y.saturating_add(dy),
        ))
    }

    /// End of a pan gesture without a fling.
    pub fn release(&mut self) {
        if self.motion == Motion::Panning {
            self.motion = Motion::Idle;
        }
    }

    /// Start a fling with a scroll-space velocity in pixels per second.
    ///
    /// A non-finite velocity ends the gesture without a fling.
    pub fn fling(&mut self, velocity_x: f32, velocity_y: f32) {
        if !velocity_x.is_finite() || !velocity_y.is_finite() {
            self.force_stop();
            self.release();
            return;
        }
        let deceleration = GRAVITY_EARTH
            * INCHES_PER_METER
            * self.tuning.pixels_per_inch
            * self.tuning.fling_friction;
        self.motion = Motion::Flinging(Fling::new(
            self.offset,
            velocity_x,
            velocity_y,
            self.max,
            deceleration,
        ));
    }

    /// Move `x` to `target_x` over `duration`; `y` is untouched.
    ///
    /// A zero duration jumps immediately.
    pub fn animate_to_x(&mut self, target_x: i32, duration: Duration) {
        self.force_stop();
        let target_x = target_x.clamp(0, self.max.x);
        if duration.is_zero() {
            self.motion = Motion::Idle;
            self.move_to(ScrollOffset::new(target_x, self.offset.y));
            return;
        }
        self.motion = Motion::Animating(ResetAnimation {
            start_x: self.offset.x,
            target_x,
            duration,
            elapsed: Duration::ZERO,
        });
    }

    /// Scroll by a fixed amount immediately (directional nudges).
    pub fn scroll_by(&mut self, dx: i32, dy: i32) -> bool {
        self.force_stop();
        self.motion = Motion::Idle;
        self.move_to(ScrollOffset::new(
            self.offset.x.saturating_add(dx),
            self.offset.y.saturating_add(dy),
        ))
    }

    /// Advance fling/animation by one frame.
    pub fn step(&mut self, elapsed: Duration) -> ScrollStep {
        let max = self.max;
        let (target, finished) = match &mut self.motion {
            Motion::Flinging(fling) => {
                fling.elapsed += elapsed;
                if fling.is_finished() {
                    (fling.finish.clamped(max), true)
                } else {
                    (fling.position(max), false)
                }
            }
            Motion::Animating(animation) => {
                animation.elapsed += elapsed;
                let x = animation.x().clamp(0, max.x);
                (ScrollOffset::new(x, self.offset.y), animation.is_finished())
            }
            Motion::Idle | Motion::Panning => {
                return ScrollStep {
                    moved: false,
                    active: false,
                };
            }
        };

        let moved = self.move_to(target);
        if finished {
            self.motion = Motion::Idle;
        }
        ScrollStep {
            moved,
            active: !finished,
        }
    }

    fn move_to(&mut self, target: ScrollOffset) -> bool {
        let clamped = target.clamped(self.max);
        let moved = clamped != self.offset;
        self.offset = clamped;
        moved
    }
}

/// Ease curve of the reset animation: fast start, long soft landing.
/// Maps `[0, 1]` onto `[0, 1]`.
fn viscous_fluid(progress: f32) -> f32 {
    fn raw(x: f32) -> f32 {
        let x = x * VISCOUS_FLUID_SCALE;
        if x < 1.0 {
            x - (1.0 - (-x).exp())
        } else {
            let start = 0.367_879_44; // 1/e
            let x = 1.0 - (1.0 - x).exp();
            start + x * (1.0 - start)
        }
    }
    (raw(progress.clamp(0.0, 1.0)) / raw(1.0)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "scroll_tests.rs"]
mod tests;
