//! Channel row descriptor.

use super::identifiers::{ChannelId, ImageKey};

/// One row of the guide.
///
/// Immutable. Identity is `id`; the row index is the channel's position
/// in the data source and is not stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    id: ChannelId,
    display_name: String,
    image_key: ImageKey,
}

impl Channel {
    pub fn new(id: ChannelId, display_name: impl Into<String>, image_key: ImageKey) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            image_key,
        }
    }

    pub fn id(&self) -> &ChannelId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn image_key(&self) -> &ImageKey {
        &self.image_key
    }
}
