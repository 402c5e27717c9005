//! Channel thumbnail cache with per-key load deduplication.
//!
//! Loads run wherever the injected [`ImageLoader`] puts them (usually a
//! worker thread). Their completions never touch the cache directly: they
//! are sent over an mpsc channel and applied on the UI thread when the
//! host calls [`ImageCache::pump`], once per frame.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, warn};

use crate::model::{Bitmap, ImageKey, ImageLoadError};

/// Completion handed to a loader. Safe to call from any thread, exactly
/// once.
pub type LoadCompletion = Box<dyn FnOnce(Result<Bitmap, ImageLoadError>) + Send>;

/// Callback run on the UI thread after a key's bitmap lands in the cache.
pub type OnLoaded = Box<dyn FnOnce(&ImageKey)>;

/// Starts an asynchronous load of a thumbnail sized for `width x height`.
///
/// No ordering or timeout guarantees. Implementations must eventually call
/// `completion` exactly once.
pub trait ImageLoader {
    fn load(&self, key: &ImageKey, width: u32, height: u32, completion: LoadCompletion);
}

impl<L: ImageLoader + ?Sized> ImageLoader for Rc<L> {
    fn load(&self, key: &ImageKey, width: u32, height: u32, completion: LoadCompletion) {
        (**self).load(key, width, height, completion)
    }
}

type Completed = (ImageKey, Result<Bitmap, ImageLoadError>);

/// Sending half of one load. Dropping it unsent reports `Abandoned`, so a
/// loader that loses its completion still clears the pending marker.
struct Reply {
    key: Option<ImageKey>,
    tx: Sender<Completed>,
}

impl Reply {
    fn send(mut self, result: Result<Bitmap, ImageLoadError>) {
        if let Some(key) = self.key.take() {
            // The receiver is gone only after the cache was dropped.
            let _ = self.tx.send((key, result));
        }
    }
}

impl Drop for Reply {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            let err = ImageLoadError::Abandoned { key: key.to_string() };
            let _ = self.tx.send((key, Err(err)));
        }
    }
}

/// Resolved bitmaps plus in-flight markers, keyed by image key.
pub struct ImageCache {
    loader: Box<dyn ImageLoader>,
    resolved: HashMap<ImageKey, Arc<Bitmap>>,
    pending: HashMap<ImageKey, OnLoaded>,
    completed_tx: Sender<Completed>,
    completed_rx: Receiver<Completed>,
}

impl ImageCache {
    pub fn new(loader: Box<dyn ImageLoader>) -> Self {
        let (completed_tx, completed_rx) = mpsc::channel();
        Self {
            loader,
            resolved: HashMap::new(),
            pending: HashMap::new(),
            completed_tx,
            completed_rx,
        }
    }

    /// Cached bitmap for `key`, if loaded.
    pub fn get(&self, key: &ImageKey) -> Option<Arc<Bitmap>> {
        self.resolved.get(key).cloned()
    }

    /// Start loading `key` unless it is cached or already in flight.
    ///
    /// Returns true if a new load was started. `on_loaded` runs after a
    /// successful load; for a deduplicated request it is dropped, since the
    /// first requester's callback already covers the redraw.
    pub fn ensure_loading(&mut self, key: &ImageKey, width: u32, height: u32, on_loaded: OnLoaded) -> bool {
        if self.resolved.contains_key(key) || self.pending.contains_key(key) {
            return false;
        }
        debug!(key = %key, width, height, "Starting image load");
        self.pending.insert(key.clone(), on_loaded);

        let reply = Reply {
            key: Some(key.clone()),
            tx: self.completed_tx.clone(),
        };
        self.loader
            .load(key, width, height, Box::new(move |result| reply.send(result)));
        true
    }

    /// Apply completed loads. Returns how many bitmaps were stored.
    pub fn pump(&mut self) -> usize {
        let mut stored = 0;
        while let Ok((key, result)) = self.completed_rx.try_recv() {
            let on_loaded = self.pending.remove(&key);
            match result {
                Ok(bitmap) => {
                    debug!(key = %key, width = bitmap.width(), height = bitmap.height(), "Image loaded");
                    self.resolved.insert(key.clone(), Arc::new(bitmap));
                    stored += 1;
                    if let Some(callback) = on_loaded {
                        callback(&key);
                    }
                }
                Err(err) => {
                    // Not cached: the next visibility pass retries.
                    warn!(key = %key, error = %err, "Image load failed");
                }
            }
        }
        stored
    }

    /// Drop every resolved bitmap. In-flight loads are not cancelled.
    pub fn clear(&mut self) {
        debug!(count = self.resolved.len(), "Clearing image cache");
        self.resolved.clear();
    }

    /// Number of resolved bitmaps.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    pub fn is_pending(&self, key: &ImageKey) -> bool {
        self.pending.contains_key(key)
    }

    /// True if any load is still in flight.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("resolved", &self.resolved.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "image_cache_tests.rs"]
mod tests;
