//! Error types for epgview.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions up to [`AppError`].
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`GuideLoadError`] - Reading or validating the guide file
//!   - `ConfigError` / `LoggingError` - startup failures (defined next to their modules)
//!   - `std::io::Error` - Terminal failures
//! - [`ImageLoadError`] - Thumbnail load failures. These never reach `AppError`: the image
//!   cache logs and drops them, and the next visibility pass retries.
//!
//! # Recovery Strategy
//!
//! The grid engine itself has no fatal conditions. Missing data and an unsized viewport are
//! no-ops; image failures render the row without a thumbnail. Only startup (config, guide
//! file, terminal) can fail the process.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load the program guide.
    #[error("Failed to load guide: {0}")]
    Guide(#[from] GuideLoadError),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when loading a guide file.
///
/// Each variant carries enough context (path, channel, event index) to point the user at
/// the offending input.
#[derive(Debug, Error)]
pub enum GuideLoadError {
    /// The guide file does not exist.
    #[error("Guide file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// The guide file exists but could not be read.
    #[error("Failed to read guide file {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The guide file is not valid guide JSON.
    #[error("Invalid guide JSON in {path}: {message}")]
    Json {
        /// Path being parsed.
        path: PathBuf,
        /// serde_json error message (includes line/column).
        message: String,
    },

    /// A channel or event field failed validation (e.g. empty id).
    #[error("Invalid channel #{channel}: {reason}")]
    InvalidChannel {
        /// 0-based channel row.
        channel: usize,
        /// What was wrong.
        reason: String,
    },

    /// A channel's events are unsorted, overlapping, or end before they start.
    #[error("Channel '{channel_id}' event #{event} breaks schedule order")]
    UnorderedEvents {
        /// Channel identifier.
        channel_id: String,
        /// 0-based index of the first offending event.
        event: usize,
    },
}

/// Errors from the image-loading collaborator.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    /// The image source could not be read.
    #[error("Failed to read image '{key}': {source}")]
    Io {
        /// Image key being loaded.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes could not be decoded as an image.
    #[error("Failed to decode image '{key}': {message}")]
    Decode {
        /// Image key being loaded.
        key: String,
        /// Decoder error message.
        message: String,
    },

    /// The decoded image has zero area.
    #[error("Image '{key}' is empty")]
    EmptyImage {
        /// Image key being loaded.
        key: String,
    },

    /// The loader dropped its completion without calling it.
    #[error("Load of image '{key}' was abandoned")]
    Abandoned {
        /// Image key being loaded.
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guide_error_converts_into_app_error() {
        let err: AppError = GuideLoadError::FileNotFound {
            path: PathBuf::from("/nope.json"),
        }
        .into();
        assert!(matches!(err, AppError::Guide(_)));
        assert!(err.to_string().contains("/nope.json"));
    }

    #[test]
    fn io_error_converts_into_terminal_error() {
        let err: AppError = std::io::Error::other("broken pipe").into();
        assert!(matches!(err, AppError::Terminal(_)));
    }

    #[test]
    fn unordered_events_message_names_channel_and_index() {
        let err = GuideLoadError::UnorderedEvents {
            channel_id: "svt1".to_string(),
            event: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("svt1"));
        assert!(msg.contains("#3"));
    }

    #[test]
    fn image_decode_error_names_key() {
        let err = ImageLoadError::Decode {
            key: "logo.png".to_string(),
            message: "bad header".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to decode image 'logo.png': bad header");
    }
}
