//! Tests for ImageCache

use super::*;
use std::cell::{Cell, RefCell};
use std::thread::JoinHandle;

/// Loader whose completions are fired by the test.
#[derive(Default)]
struct ManualLoader {
    requests: RefCell<Vec<(ImageKey, u32, u32)>>,
    completions: RefCell<Vec<LoadCompletion>>,
}

impl ManualLoader {
    fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn complete_next(&self, result: Result<Bitmap, ImageLoadError>) {
        let completion = self.completions.borrow_mut().remove(0);
        completion(result);
    }
}

impl ImageLoader for ManualLoader {
    fn load(&self, key: &ImageKey, width: u32, height: u32, completion: LoadCompletion) {
        self.requests.borrow_mut().push((key.clone(), width, height));
        self.completions.borrow_mut().push(completion);
    }
}

/// Loader that completes on a spawned thread.
#[derive(Default)]
struct ThreadLoader {
    handles: RefCell<Vec<JoinHandle<()>>>,
}

impl ThreadLoader {
    fn join_all(&self) {
        for handle in self.handles.borrow_mut().drain(..) {
            handle.join().unwrap();
        }
    }
}

impl ImageLoader for ThreadLoader {
    fn load(&self, _key: &ImageKey, width: u32, height: u32, completion: LoadCompletion) {
        let handle = std::thread::spawn(move || {
            completion(Ok(Bitmap::solid(width, height, [1, 2, 3, 255])));
        });
        self.handles.borrow_mut().push(handle);
    }
}

/// Loader that loses every completion, like a worker that failed to start.
#[derive(Default)]
struct DroppingLoader {
    requests: Cell<usize>,
}

impl ImageLoader for DroppingLoader {
    fn load(&self, _key: &ImageKey, _width: u32, _height: u32, completion: LoadCompletion) {
        self.requests.set(self.requests.get() + 1);
        drop(completion);
    }
}

fn key(raw: &str) -> ImageKey {
    ImageKey::new(raw).unwrap()
}

fn manual_cache() -> (Rc<ManualLoader>, ImageCache) {
    let loader = Rc::new(ManualLoader::default());
    let cache = ImageCache::new(Box::new(Rc::clone(&loader)));
    (loader, cache)
}

fn noop() -> OnLoaded {
    Box::new(|_| {})
}

mod dedup {
    use super::*;

    #[test]
    fn second_request_before_completion_starts_no_load() {
        let (loader, mut cache) = manual_cache();
        assert!(cache.ensure_loading(&key("a.png"), 10, 10, noop()));
        assert!(!cache.ensure_loading(&key("a.png"), 10, 10, noop()));
        assert_eq!(loader.request_count(), 1);
        assert!(cache.is_pending(&key("a.png")));
    }

    #[test]
    fn distinct_keys_load_independently() {
        let (loader, mut cache) = manual_cache();
        cache.ensure_loading(&key("a.png"), 10, 10, noop());
        cache.ensure_loading(&key("b.png"), 10, 10, noop());
        assert_eq!(loader.request_count(), 2);
    }

    #[test]
    fn loaded_key_is_not_requested_again() {
        let (loader, mut cache) = manual_cache();
        cache.ensure_loading(&key("a.png"), 4, 2, noop());
        loader.complete_next(Ok(Bitmap::solid(4, 2, [0, 0, 0, 255])));
        cache.pump();
        assert!(!cache.ensure_loading(&key("a.png"), 4, 2, noop()));
        assert_eq!(loader.request_count(), 1);
    }

    #[test]
    fn target_size_is_forwarded() {
        let (loader, mut cache) = manual_cache();
        cache.ensure_loading(&key("a.png"), 12, 7, noop());
        assert_eq!(loader.requests.borrow()[0], (key("a.png"), 12, 7));
    }
}

mod completion {
    use super::*;

    #[test]
    fn completion_is_invisible_until_pump() {
        let (loader, mut cache) = manual_cache();
        cache.ensure_loading(&key("a.png"), 4, 2, noop());
        loader.complete_next(Ok(Bitmap::solid(4, 2, [9, 9, 9, 255])));
        assert!(cache.get(&key("a.png")).is_none());

        assert_eq!(cache.pump(), 1);
        let bitmap = cache.get(&key("a.png")).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (4, 2));
        assert!(!cache.is_pending(&key("a.png")));
    }

    #[test]
    fn success_runs_on_loaded_callback() {
        let (loader, mut cache) = manual_cache();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        cache.ensure_loading(&key("a.png"), 1, 1, Box::new(move |_| flag.set(true)));

        loader.complete_next(Ok(Bitmap::solid(1, 1, [0, 0, 0, 255])));
        assert!(!fired.get());
        cache.pump();
        assert!(fired.get());
    }

    #[test]
    fn failure_clears_pending_and_allows_retry() {
        let (loader, mut cache) = manual_cache();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        cache.ensure_loading(&key("a.png"), 1, 1, Box::new(move |_| flag.set(true)));

        loader.complete_next(Err(ImageLoadError::EmptyImage {
            key: "a.png".to_string(),
        }));
        assert_eq!(cache.pump(), 0);
        assert!(!fired.get());
        assert!(cache.get(&key("a.png")).is_none());
        assert!(!cache.is_pending(&key("a.png")));

        assert!(cache.ensure_loading(&key("a.png"), 1, 1, noop()));
        assert_eq!(loader.request_count(), 2);
    }

    #[test]
    fn dropped_completion_clears_pending_on_pump() {
        let loader = Rc::new(DroppingLoader::default());
        let mut cache = ImageCache::new(Box::new(Rc::clone(&loader)));
        cache.ensure_loading(&key("a.png"), 1, 1, noop());
        assert!(cache.is_pending(&key("a.png")));

        assert_eq!(cache.pump(), 0);
        assert!(!cache.is_pending(&key("a.png")));
        assert!(!cache.has_pending());

        assert!(cache.ensure_loading(&key("a.png"), 1, 1, noop()));
        assert_eq!(loader.requests.get(), 2);
    }

    #[test]
    fn called_completion_reports_once() {
        let (loader, mut cache) = manual_cache();
        cache.ensure_loading(&key("a.png"), 1, 1, noop());
        loader.complete_next(Ok(Bitmap::solid(1, 1, [0, 0, 0, 255])));

        assert_eq!(cache.pump(), 1);
        assert_eq!(cache.pump(), 0);
        assert!(cache.get(&key("a.png")).is_some());
    }

    #[test]
    fn completions_from_worker_threads_are_applied_on_pump() {
        let loader = Rc::new(ThreadLoader::default());
        let mut cache = ImageCache::new(Box::new(Rc::clone(&loader)));
        cache.ensure_loading(&key("a.png"), 3, 3, noop());
        cache.ensure_loading(&key("b.png"), 5, 5, noop());
        loader.join_all();

        assert_eq!(cache.pump(), 2);
        assert_eq!(cache.len(), 2);
        assert!(!cache.has_pending());
    }
}

mod clear {
    use super::*;

    #[test]
    fn clear_drops_resolved_bitmaps() {
        let (loader, mut cache) = manual_cache();
        cache.ensure_loading(&key("a.png"), 1, 1, noop());
        loader.complete_next(Ok(Bitmap::solid(1, 1, [0, 0, 0, 255])));
        cache.pump();
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&key("a.png")).is_none());
    }

    #[test]
    fn in_flight_load_survives_clear() {
        let (loader, mut cache) = manual_cache();
        cache.ensure_loading(&key("a.png"), 1, 1, noop());
        cache.clear();
        assert!(cache.is_pending(&key("a.png")));

        loader.complete_next(Ok(Bitmap::solid(1, 1, [0, 0, 0, 255])));
        assert_eq!(cache.pump(), 1);
        assert_eq!(loader.request_count(), 1);
    }
}
