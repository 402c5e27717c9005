//! The guide widget: owns viewport state and wires the core together.
//!
//! Hosts drive it through the [`Widget`] lifecycle. Everything here runs on
//! the UI thread; the only cross-thread traffic is image-load completions,
//! which the image cache queues until the next frame.

use std::time::Duration;

use tracing::{debug, info};

use crate::model::{Channel, Clock, EpgDataSource, Event};
use crate::view_state::{
    Canvas, FrameContext, GuideParams, HitTestResult, ImageCache, ImageLoader, LayoutModel,
    LocalLabels, RedrawRequest, RenderStats, ScrollController, ScrollOffset, TimeAxis, TimeLabels,
    Viewport, ViewportSize, ZonedLabels, hit_test, render_frame,
};

/// Pointer input, already classified by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Pointer pressed. Stops any fling or animation.
    Down,
    /// Drag step. Distances are scroll deltas: positive values move the
    /// viewport right/down, i.e. the pointer moved left/up.
    Pan { distance_x: i32, distance_y: i32 },
    /// Pointer released without a fling.
    Release,
    /// Pointer released while moving, in pixels per second of pointer
    /// travel. The content follows the pointer, so the scroll runs the
    /// opposite way.
    Fling { velocity_x: f32, velocity_y: f32 },
    /// Single tap at a viewport-local point.
    Tap { x: i32, y: i32 },
}

/// Click reported back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideClick {
    Channel {
        index: usize,
        channel: Channel,
    },
    Event {
        channel_index: usize,
        event_index: usize,
        event: Event,
    },
    /// The "return to now" button. Hosts usually answer with
    /// [`EpgWidget::recalculate_and_redraw`]`(true)`.
    ResetButton,
}

/// Result of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    pub stats: RenderStats,
    /// A fling or animation is running; schedule the next frame promptly.
    pub animating: bool,
}

/// Host-facing lifecycle of a scrollable grid widget.
pub trait Widget {
    fn on_size_changed(&mut self, size: ViewportSize);

    /// Draw one frame and advance scroll physics by `elapsed`.
    fn on_frame(&mut self, elapsed: Duration, canvas: &mut dyn Canvas) -> FrameOutcome;

    fn on_gesture(&mut self, gesture: Gesture) -> Option<GuideClick>;

    fn on_teardown(&mut self);
}

/// Electronic program guide widget.
pub struct EpgWidget<C: Clock> {
    params: GuideParams,
    clock: C,
    data: Option<Box<dyn EpgDataSource>>,
    size: ViewportSize,
    axis: Option<TimeAxis>,
    layout: LayoutModel,
    scroll: ScrollController,
    images: ImageCache,
    labels: Box<dyn TimeLabels>,
    redraw: RedrawRequest,
}

impl<C: Clock> EpgWidget<C> {
    pub fn new(params: GuideParams, clock: C, loader: Box<dyn ImageLoader>) -> Self {
        let labels: LocalLabels = ZonedLabels(chrono::Local);
        Self {
            params,
            clock,
            data: None,
            size: ViewportSize::default(),
            axis: None,
            layout: LayoutModel::new(params.geometry),
            scroll: ScrollController::new(params.scroll),
            images: ImageCache::new(loader),
            labels: Box::new(labels),
            redraw: RedrawRequest::new(),
        }
    }

    /// Replace the label formatter (e.g. UTC labels for reproducible output).
    pub fn with_labels(mut self, labels: Box<dyn TimeLabels>) -> Self {
        self.labels = labels;
        self
    }

    /// Formatter shared by the time bar and anything describing the grid.
    pub fn labels(&self) -> &dyn TimeLabels {
        &*self.labels
    }

    pub fn params(&self) -> &GuideParams {
        &self.params
    }

    pub fn data(&self) -> Option<&dyn EpgDataSource> {
        self.data.as_deref()
    }

    pub fn size(&self) -> ViewportSize {
        self.size
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        self.scroll.offset()
    }

    pub fn max_scroll_offset(&self) -> ScrollOffset {
        self.scroll.max_offset()
    }

    pub fn axis(&self) -> Option<&TimeAxis> {
        self.axis.as_ref()
    }

    pub fn image_cache(&self) -> &ImageCache {
        &self.images
    }

    pub fn is_animating(&self) -> bool {
        self.scroll.is_in_motion()
    }

    /// Read and reset the pending-redraw flag. Animation always needs one.
    pub fn needs_redraw(&self) -> bool {
        self.redraw.take() || self.scroll.is_in_motion()
    }

    fn has_data(&self) -> bool {
        self.data.as_ref().is_some_and(|d| d.has_data())
    }

    /// Install a new data source and re-clamp scroll bounds.
    pub fn set_data(&mut self, data: Box<dyn EpgDataSource>) {
        info!(channels = data.channel_count(), "Guide data set");
        self.data = Some(data);
        self.update_bounds();
        self.redraw.request();
    }

    /// Re-anchor the time axis at the current time, recompute scroll
    /// bounds and scroll to "now", animated or instantly.
    ///
    /// Call after the initial data load and whenever the size changes.
    /// Without data or before layout this is a no-op.
    pub fn recalculate_and_redraw(&mut self, animated: bool) {
        if !self.has_data() || !self.size.is_laid_out() {
            return;
        }
        let now = self.clock.now_millis();
        self.axis = TimeAxis::recompute(
            self.params.window,
            &self.params.geometry,
            self.size.width,
            now,
        );
        self.update_bounds();

        let Some(axis) = self.axis else {
            return;
        };
        let target = axis.now_scroll_position(now);
        let duration = if animated {
            self.params.scroll.reset_animation
        } else {
            Duration::ZERO
        };
        debug!(target, animated, "Scrolling to now");
        self.scroll.animate_to_x(target, duration);
        self.redraw.request();
    }

    fn update_bounds(&mut self) {
        let Some(axis) = self.axis else {
            return;
        };
        let channels = self.data.as_ref().map_or(0, |d| d.channel_count());
        let max = ScrollOffset::new(
            axis.max_horizontal_scroll(),
            self.layout.max_vertical_scroll(channels, self.size.height),
        );
        self.scroll.set_bounds(max);
        debug!(max_x = max.x, max_y = max.y, channels, "Scroll bounds updated");
    }

    /// Drop all cached thumbnails.
    pub fn clear_image_cache(&mut self) {
        self.images.clear();
    }

    pub fn move_up(&mut self) {
        self.nudge(0, -1);
    }

    pub fn move_down(&mut self) {
        self.nudge(0, 1);
    }

    pub fn move_left(&mut self) {
        self.nudge(-1, 0);
    }

    pub fn move_right(&mut self) {
        self.nudge(1, 0);
    }

    /// Scroll by whole nudge steps in each direction.
    pub fn nudge(&mut self, steps_x: i32, steps_y: i32) {
        let step = self.params.scroll.nudge_step;
        if self
            .scroll
            .scroll_by(steps_x.saturating_mul(step), steps_y.saturating_mul(step))
        {
            self.redraw.request();
        }
    }

    /// Drop the current event highlight.
    pub fn clear_selection(&mut self) {
        if let Some(data) = self.data.as_mut() {
            data.clear_selection();
            self.redraw.request();
        }
    }

    /// Per-frame snapshot, once the viewport is laid out.
    pub fn viewport(&self) -> Option<Viewport> {
        Some(Viewport {
            axis: self.axis?,
            layout: self.layout,
            size: self.size,
            scroll: self.scroll.offset(),
            now_millis: self.clock.now_millis(),
        })
    }

    fn handle_tap(&mut self, x: i32, y: i32) -> Option<GuideClick> {
        let viewport = self.viewport()?;
        let data = self.data.as_mut()?;
        let hit = hit_test(&viewport, &**data, x, y);
        debug!(x, y, ?hit, "Tap");

        match hit {
            HitTestResult::Miss => None,
            HitTestResult::ResetButton => Some(GuideClick::ResetButton),
            HitTestResult::Channel { channel } => {
                data.channel_at(channel).cloned().map(|c| GuideClick::Channel {
                    index: channel,
                    channel: c,
                })
            }
            HitTestResult::Event { channel, event } => {
                data.clear_selection();
                data.select_event(channel, event);
                self.redraw.request();
                data.event_at(channel, event).cloned().map(|e| GuideClick::Event {
                    channel_index: channel,
                    event_index: event,
                    event: e,
                })
            }
        }
    }
}

impl<C: Clock> Widget for EpgWidget<C> {
    fn on_size_changed(&mut self, size: ViewportSize) {
        debug!(width = size.width, height = size.height, "Size changed");
        self.size = size;
        if !size.is_laid_out() {
            self.axis = None;
            return;
        }
        self.recalculate_and_redraw(false);
    }

    fn on_frame(&mut self, elapsed: Duration, canvas: &mut dyn Canvas) -> FrameOutcome {
        self.images.pump();

        let stats = match (self.viewport(), self.data.as_deref()) {
            (Some(viewport), Some(data)) => {
                let ctx = FrameContext {
                    viewport,
                    data,
                    labels: &*self.labels,
                    redraw: &self.redraw,
                };
                render_frame(&ctx, &mut self.images, canvas)
            }
            _ => RenderStats::default(),
        };

        let step = self.scroll.step(elapsed);
        if step.moved {
            // The new offset has not been drawn yet.
            self.redraw.request();
        }
        FrameOutcome {
            stats,
            animating: step.active,
        }
    }

    fn on_gesture(&mut self, gesture: Gesture) -> Option<GuideClick> {
        match gesture {
            Gesture::Down => {
                self.scroll.force_stop();
                None
            }
            Gesture::Pan {
                distance_x,
                distance_y,
            } => {
                if self.scroll.pan(distance_x, distance_y) {
                    self.redraw.request();
                }
                None
            }
            Gesture::Release => {
                self.scroll.release();
                None
            }
            Gesture::Fling {
                velocity_x,
                velocity_y,
            } => {
                debug!(velocity_x, velocity_y, "Fling");
                self.scroll.fling(-velocity_x, -velocity_y);
                self.redraw.request();
                None
            }
            Gesture::Tap { x, y } => self.handle_tap(x, y),
        }
    }

    fn on_teardown(&mut self) {
        self.scroll.force_stop();
        self.clear_image_cache();
    }
}

#[cfg(test)]
#[path = "widget_tests.rs"]
mod tests;
