//! Sitemap document model and XML rendering
//!
//! A document is an ordered list of `<url>` groups, each pairing a page
//! locator with the media found on that page. The media type fixes the
//! extension namespace, so an image document can never carry video entries
//! and the other way round.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
//!   <url>
//!     <loc>https://example.com/blogs/news/launch</loc>
//!     <image:image>
//!       <image:loc>https://cdn.example.com/a.png</image:loc>
//!       <image:title>Launch</image:title>
//!       <image:caption>Launch</image:caption>
//!     </image:image>
//!   </url>
//! </urlset>
//! ```

use std::borrow::Cow;

pub mod media;
pub mod render;
pub mod validate;

pub use media::{ImageDescriptor, MediaKind, SitemapMedia, VideoDescriptor};
pub use render::render;
pub use validate::{validate_document, DocumentCheck};

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` block
#[derive(Debug, Clone, PartialEq)]
pub struct UrlGroup<M> {
    pub page_url: String,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
    pub media: Vec<M>,
}

impl<M> UrlGroup<M> {
    pub fn new<S: Into<String>>(page_url: S, media: Vec<M>) -> Self {
        Self {
            page_url: page_url.into(),
            changefreq: None,
            priority: None,
            media,
        }
    }

    pub fn with_changefreq(mut self, changefreq: Option<String>) -> Self {
        self.changefreq = changefreq;
        self
    }

    pub fn with_priority(mut self, priority: Option<String>) -> Self {
        self.priority = priority;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SitemapStats {
    pub groups: usize,
    pub entries: usize,
}

/// Ordered `<url>` groups of one media type
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapDocument<M> {
    groups: Vec<UrlGroup<M>>,
}

impl<M> Default for SitemapDocument<M> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<M> SitemapDocument<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page group; a page without media is omitted. Returns whether it was kept.
    pub fn push_group(&mut self, group: UrlGroup<M>) -> bool {
        if group.media.is_empty() {
            return false;
        }
        self.groups.push(group);
        true
    }

    /// Append a group that is emitted even when it has no media (fixed index pages)
    pub fn push_index_group(&mut self, group: UrlGroup<M>) {
        self.groups.push(group);
    }

    pub fn groups(&self) -> &[UrlGroup<M>] {
        &self.groups
    }

    pub fn stats(&self) -> SitemapStats {
        SitemapStats {
            groups: self.groups.len(),
            entries: self.groups.iter().map(|group| group.media.len()).sum(),
        }
    }
}

/// Whether `c` may appear in an XML 1.0 document
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Escape special XML characters
///
/// `&` goes first so entities introduced by later substitutions are left alone.
/// Characters XML 1.0 does not allow (most C0 controls, U+FFFE, U+FFFF) are
/// dropped.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    let has_illegal = !s.chars().all(is_xml_char);
    if !has_illegal && !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let cleaned: Cow<'_, str> = if has_illegal {
        Cow::Owned(s.chars().filter(|c| is_xml_char(*c)).collect())
    } else {
        Cow::Borrowed(s)
    };

    Cow::Owned(
        cleaned
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
