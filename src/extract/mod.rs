//! Media extraction
//!
//! Turns flat article and metaobject records into sitemap media entries.
//! Images come from article featured images, `<img>` tags in article bodies
//! and game-release records; videos come from video records.

pub mod image;
pub mod scanner;
pub mod video;

pub use image::{extract_article_images, extract_release_image};
pub use scanner::scan_image_sources;
pub use video::{extract_video, extract_videos, parse_duration_seconds, publication_date, VideoExtraction};
