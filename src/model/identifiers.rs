//! Core identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time.
//! Raw constructors are never exported - use smart constructors only.

use std::fmt;

/// Stable identity of a channel. Row position is NOT part of identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

impl ChannelId {
    /// Smart constructor: validates non-empty channel ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidChannelId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidChannelId)
        } else {
            Ok(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key under which a channel thumbnail is fetched and cached.
///
/// Usually a path or URL. Several channels may share one key; the
/// image cache deduplicates loads by this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageKey(String);

impl ImageKey {
    /// Smart constructor: validates non-empty image key
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidImageKey> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidImageKey)
        } else {
            Ok(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Channel ID cannot be empty")]
pub struct InvalidChannelId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Image key cannot be empty")]
pub struct InvalidImageKey;
