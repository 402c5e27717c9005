//! Guide and thumbnail sources.
//!
//! - `guide_file`: JSON guide files parsed into [`GuideData`](crate::model::GuideData)
//! - `image_file`: thumbnails decoded from local image files on worker threads

pub mod guide_file;
pub mod image_file;

pub use guide_file::{load_guide, parse_guide};
pub use image_file::{FsImageLoader, decode_thumbnail};
