//! Domain model types (pure).
//!
//! Channels, events, the data-source contract, decoded thumbnails, the
//! injected clock, keyboard actions and the error taxonomy.

pub mod bitmap;
pub mod channel;
pub mod clock;
pub mod data_source;
pub mod error;
pub mod event;
pub mod identifiers;
pub mod key_action;

// Re-export for convenience
pub use bitmap::Bitmap;
pub use channel::Channel;
pub use clock::{Clock, FixedClock, SystemClock};
pub use data_source::{EpgDataSource, GuideData, schedule_violation};
pub use error::{AppError, GuideLoadError, ImageLoadError};
pub use event::Event;
pub use identifiers::{ChannelId, ImageKey, InvalidChannelId, InvalidImageKey};
pub use key_action::KeyAction;
