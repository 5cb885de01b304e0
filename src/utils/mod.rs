//! Utility functions for the sitemap generator
//!
//! - `url` for media locator normalization
//! - `human_format` for run summary reporting

pub mod human_format;
pub mod url;

pub use url::UrlUtils;
