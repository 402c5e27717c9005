//! Core view-state value types

use std::cell::Cell;
use std::rc::Rc;

/// Widget size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportSize {
    pub width: i32,
    pub height: i32,
}

impl ViewportSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// A viewport with no area has not been laid out yet; nothing that
    /// divides by the width may run until this is true.
    pub fn is_laid_out(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Scroll position of the viewport's top-left corner on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

impl ScrollOffset {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise clamp into `[0, max.x] x [0, max.y]`.
    pub fn clamped(self, max: ScrollOffset) -> Self {
        Self {
            x: self.x.clamp(0, max.x.max(0)),
            y: self.y.clamp(0, max.y.max(0)),
        }
    }
}

/// Axis-aligned rectangle, half-open: `[left, right) x [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle from origin and size.
    pub fn from_size(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Move by `(-dx, -dy)`: converts canvas space to viewport space when
    /// given the scroll offset.
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left - dx,
            self.top - dy,
            self.right - dx,
            self.bottom - dy,
        )
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    pub fn inset(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right - dx,
            self.bottom - dy,
        )
    }

    pub fn intersection(&self, other: &PixelRect) -> PixelRect {
        PixelRect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        )
    }
}

/// Shared "please draw another frame" flag.
///
/// Cloned into image-load callbacks; the host polls it to decide whether
/// to schedule a frame. Single-threaded: completions are marshalled onto
/// the UI thread before they touch it.
#[derive(Debug, Clone, Default)]
pub struct RedrawRequest(Rc<Cell<bool>>);

impl RedrawRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }

    /// Read and reset the flag.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// Narrow to `i32`, pinning out-of-range values at the ends.
pub(crate) fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
