//! Widget state machine (pure).
//!
//! The guide widget and its input handlers. No terminal access: hosts feed
//! sizes, gestures, key actions and frame ticks in, and get draw ops and
//! clicks out.

pub mod key_handler;
pub mod widget;

// Re-export for convenience
pub use key_handler::{KeyOutcome, handle_key_action};
pub use widget::{EpgWidget, FrameOutcome, Gesture, GuideClick, Widget};
