//! JSON guide files.
//!
//! ```json
//! {
//!   "channels": [
//!     {
//!       "id": "svt1",
//!       "name": "SVT1",
//!       "image": "logos/svt1.png",
//!       "events": [
//!         { "start": "2024-05-01T18:00:00Z", "end": "2024-05-01T18:30:00Z", "title": "Rapport" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Timestamps are RFC 3339. Relative image paths resolve against the guide
//! file's directory.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::model::{
    Channel, ChannelId, Event, GuideData, GuideLoadError, ImageKey, schedule_violation,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GuideFile {
    channels: Vec<ChannelRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChannelRecord {
    id: String,
    name: String,
    image: String,
    #[serde(default)]
    events: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EventRecord {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    title: String,
}

/// Load and validate a guide file.
///
/// # Errors
///
/// Returns `GuideLoadError::FileNotFound` if the file does not exist,
/// `Io` if it cannot be read, `Json` for malformed content and
/// `InvalidChannel` / `UnorderedEvents` for data that breaks the guide's
/// invariants.
pub fn load_guide(path: impl AsRef<Path>) -> Result<GuideData, GuideLoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(GuideLoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| GuideLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_guide(&contents, path)
}

/// Parse guide JSON. `path` names the source in errors and anchors relative
/// image paths.
pub fn parse_guide(json: &str, path: &Path) -> Result<GuideData, GuideLoadError> {
    let file: GuideFile = serde_json::from_str(json).map_err(|e| GuideLoadError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let base_dir = path.parent();

    let mut rows = Vec::with_capacity(file.channels.len());
    let mut event_count = 0;
    for (index, record) in file.channels.into_iter().enumerate() {
        let id = ChannelId::new(record.id).map_err(|e| GuideLoadError::InvalidChannel {
            channel: index,
            reason: e.to_string(),
        })?;
        let image = ImageKey::new(resolve_image(&record.image, base_dir)).map_err(|e| {
            GuideLoadError::InvalidChannel {
                channel: index,
                reason: e.to_string(),
            }
        })?;

        let events: Vec<Event> = record
            .events
            .into_iter()
            .map(|e| Event::new(e.start.timestamp_millis(), e.end.timestamp_millis(), e.title))
            .collect();
        if let Some(event) = schedule_violation(&events) {
            return Err(GuideLoadError::UnorderedEvents {
                channel_id: id.to_string(),
                event,
            });
        }

        event_count += events.len();
        rows.push((Channel::new(id, record.name, image), events));
    }

    info!(
        path = %path.display(),
        channels = rows.len(),
        events = event_count,
        "Guide loaded"
    );
    Ok(GuideData::new(rows))
}

/// URLs and absolute paths pass through; relative paths join `base_dir`.
fn resolve_image(raw: &str, base_dir: Option<&Path>) -> String {
    if raw.is_empty() || raw.contains("://") || Path::new(raw).is_absolute() {
        return raw.to_string();
    }
    match base_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(raw).to_string_lossy().into_owned(),
        _ => raw.to_string(),
    }
}
