//! Filesystem thumbnail loader.
//!
//! Decoding happens on a short-lived worker thread per request; the
//! completion is handed back through the image cache's channel, so nothing
//! here touches UI state.

use std::path::Path;
use std::thread;

use tracing::{debug, warn};

use crate::model::{Bitmap, ImageKey, ImageLoadError};
use crate::view_state::{ImageLoader, LoadCompletion};

/// Loads thumbnails from local image files (PNG, JPEG, ...).
///
/// Image keys are file paths. Keys that are URLs fail with an I/O error and
/// the row keeps its text fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageLoader;

impl FsImageLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&self, key: &ImageKey, width: u32, height: u32, completion: LoadCompletion) {
        let key = key.clone();
        let spawned = thread::Builder::new()
            .name("epgview-image".to_string())
            .spawn(move || {
                let result = decode_thumbnail(&key, width, height);
                completion(result);
            });
        if let Err(e) = spawned {
            // Dropping the completion reports the load as abandoned.
            warn!(error = %e, "Failed to spawn image loader thread");
        }
    }
}

/// Decode `key` and scale it to fit within `width` x `height`, keeping the
/// aspect ratio.
///
/// # Errors
///
/// `Io` when the file cannot be opened, `Decode` for unsupported or corrupt
/// data and `EmptyImage` when nothing is left after scaling.
pub fn decode_thumbnail(key: &ImageKey, width: u32, height: u32) -> Result<Bitmap, ImageLoadError> {
    let image = image::open(Path::new(key.as_str())).map_err(|e| match e {
        image::ImageError::IoError(source) => ImageLoadError::Io {
            key: key.to_string(),
            source,
        },
        other => ImageLoadError::Decode {
            key: key.to_string(),
            message: other.to_string(),
        },
    })?;

    let rgba = image.thumbnail(width.max(1), height.max(1)).to_rgba8();
    let (w, h) = rgba.dimensions();
    debug!(key = %key, width = w, height = h, "Thumbnail decoded");
    Bitmap::from_rgba(w, h, rgba.into_raw()).ok_or_else(|| ImageLoadError::EmptyImage {
        key: key.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::mpsc;
    use std::time::Duration;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("epgview-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn decodes_and_scales_to_fit() {
        let dir = temp_dir("decode");
        let path = dir.join("wide.png");
        write_png(&path, 200, 100);

        let key = ImageKey::new(path.to_string_lossy()).unwrap();
        let bitmap = decode_thumbnail(&key, 64, 64).unwrap();
        assert_eq!(bitmap.width(), 64);
        assert_eq!(bitmap.height(), 32);
        assert_eq!(bitmap.pixel(0, 0), [10, 20, 30, 255]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let key = ImageKey::new("/definitely/not/here/logo.png").unwrap();
        assert!(matches!(
            decode_thumbnail(&key, 32, 32),
            Err(ImageLoadError::Io { .. })
        ));
    }

    #[test]
    fn garbage_bytes_are_decode_error() {
        let dir = temp_dir("garbage");
        let path = dir.join("logo.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let key = ImageKey::new(path.to_string_lossy()).unwrap();
        let result = decode_thumbnail(&key, 32, 32);
        assert!(
            matches!(result, Err(ImageLoadError::Decode { .. })),
            "got {result:?}"
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn loader_completes_off_thread() {
        let dir = temp_dir("loader");
        let path = dir.join("logo.png");
        write_png(&path, 16, 16);

        let (tx, rx) = mpsc::channel();
        let key = ImageKey::new(path.to_string_lossy()).unwrap();
        FsImageLoader::new().load(
            &key,
            8,
            8,
            Box::new(move |result| {
                let _ = tx.send(result.map(|b| (b.width(), b.height())));
            }),
        );

        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result.unwrap(), (8, 8));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
