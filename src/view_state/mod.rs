//! View-state layer - coordinate mapping, scrolling, hit-testing and drawing
//!
//! This module is the pure core of the guide: it never touches a terminal or
//! any other UI toolkit. Hosts feed it sizes, gestures and frame ticks and
//! receive draw operations and click results back.
//!
//! # Module Structure
//!
//! - `types`: Core value types (ViewportSize, ScrollOffset, PixelRect, RedrawRequest)
//! - `layout_params`: GuideParams - time window, grid geometry, scroll tuning
//! - `time_axis`: TimeAxis - time ↔ pixel mapping and visible time bounds
//! - `layout`: LayoutModel - row index ↔ y mapping and visible rows
//! - `visible_range`: VisibleRows - inclusive range of visible channel rows
//! - `scroll`: ScrollController - clamped offset, fling and reset animation
//! - `viewport`: Viewport - per-frame snapshot shared by renderer and hit tester
//! - `hit_test`: HitTestResult - tap resolution to reset button, channel or event
//! - `canvas`: DrawOp / Canvas - toolkit-free drawing surface
//! - `time_labels`: tick placement and label formatting
//! - `image_cache`: ImageCache - thumbnail cache with load deduplication
//! - `renderer`: render_frame - the per-frame draw pipeline

pub mod canvas;
pub mod image_cache;
pub mod layout;
pub mod layout_params;
pub mod renderer;
pub mod scroll;
pub mod time_axis;
pub mod time_labels;
pub mod types;
pub mod viewport;
pub mod visible_range;

pub use canvas::{Canvas, DrawOp, Paint, RecordingCanvas, TextAlign};
pub use hit_test::{HitTestResult, hit_test};
pub use image_cache::{ImageCache, ImageLoader, LoadCompletion, OnLoaded};
pub use layout::LayoutModel;
pub use layout_params::{GridGeometry, GuideParams, ScrollTuning, TimeWindow};
pub use renderer::{FrameContext, RenderStats, render_frame};
pub use scroll::{ScrollController, ScrollPhase, ScrollStep};
pub use time_axis::{TimeAxis, TimeBounds};
pub use time_labels::{LocalLabels, TimeLabels, ZonedLabels};
pub use types::{PixelRect, RedrawRequest, ScrollOffset, ViewportSize};
pub use viewport::Viewport;
pub use visible_range::VisibleRows;
