//! Electronic program guide (epgview)
//!
//! A scrollable channels-by-time grid with fling scrolling, a "return to now"
//! button and asynchronously loaded channel thumbnails.
//!
//! The crate follows a Pure Core / Impure Shell split: `view_state` and
//! `state` are toolkit-free and deterministic under an injected clock, while
//! `view` hosts the widget in a crossterm terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
