//! Run driver for the image and video sitemaps
//!
//! One linear pass per run: fetch, normalize, extract, render, check,
//! write. Nothing is written unless every earlier step succeeded.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::client::CatalogSource;
use crate::config::{Config, ImageSitemapConfig, ShopConfig, VideoSitemapConfig};
use crate::errors::{AppError, AppResult};
use crate::extract::{extract_article_images, extract_release_image, extract_videos, VideoExtraction};
use crate::normalizer::{normalize_blogs, normalize_metaobjects, ArticleRecord, MetaobjectRecord};
use crate::sitemap::{
    render, validate_document, ImageDescriptor, MediaKind, SitemapDocument, SitemapMedia,
    SitemapStats, UrlGroup, VideoDescriptor,
};
use crate::utils::human_format::{format_elapsed, format_kilobytes};

pub mod output;

pub use output::write_atomically;

/// Outcome of one successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub kind: MediaKind,
    pub output_path: PathBuf,
    pub stats: SitemapStats,
    pub bytes_written: u64,
    /// Video records left out for lack of an identifier
    pub skipped_records: usize,
    pub elapsed: Duration,
}

pub struct SitemapRunner {
    shop: ShopConfig,
    images: ImageSitemapConfig,
    videos: VideoSitemapConfig,
    output_override: Option<PathBuf>,
}

impl SitemapRunner {
    pub fn new(config: &Config) -> Self {
        Self {
            shop: config.shop.clone(),
            images: config.images.clone(),
            videos: config.videos.clone(),
            output_override: None,
        }
    }

    /// Write to `path` instead of the configured output file
    pub fn with_output_path<P: Into<PathBuf>>(mut self, path: Option<P>) -> Self {
        self.output_override = path.map(Into::into);
        self
    }

    fn output_path<'a>(&'a self, configured: &'a Path) -> &'a Path {
        self.output_override.as_deref().unwrap_or(configured)
    }

    /// Generate the image sitemap from blog articles and game-release records
    pub async fn run_images(&self, catalog: &dyn CatalogSource) -> AppResult<RunSummary> {
        let started = Instant::now();
        info!("Generating image sitemap");

        let blogs = catalog
            .fetch_blogs(self.images.blog_page_size, self.images.article_page_size)
            .await?;
        info!("Fetched {} blogs", blogs.len());

        let releases = match catalog
            .fetch_metaobjects(
                &self.images.release_metaobject_type,
                self.images.metaobject_page_size,
            )
            .await
        {
            Ok(nodes) => nodes,
            Err(e) if e.is_api_error() => {
                warn!("Continuing without game-release images: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let (articles, summaries) = normalize_blogs(blogs);
        for blog in &summaries {
            info!("Blog '{}': {} articles", blog.handle, blog.article_count);
        }
        info!("Total articles: {}", articles.len());

        let releases = normalize_metaobjects(releases);
        info!(
            "Fetched {} '{}' metaobjects",
            releases.len(),
            self.images.release_metaobject_type
        );

        let document = build_image_document(&self.shop, &self.images, &articles, &releases);
        let path = self.output_path(&self.images.output_path);
        self.finish(document, path, 0, started)
    }

    /// Generate the video sitemap, stamping undated videos with the current time
    pub async fn run_videos(&self, catalog: &dyn CatalogSource) -> AppResult<RunSummary> {
        self.run_videos_at(catalog, Utc::now()).await
    }

    /// Generate the video sitemap with an explicit run start time
    pub async fn run_videos_at(
        &self,
        catalog: &dyn CatalogSource,
        run_started: DateTime<Utc>,
    ) -> AppResult<RunSummary> {
        let started = Instant::now();
        info!("Generating video sitemap");

        let nodes = catalog
            .fetch_metaobjects(&self.videos.metaobject_type, self.videos.page_size)
            .await?;
        let records = normalize_metaobjects(nodes);
        info!(
            "Fetched {} '{}' metaobjects",
            records.len(),
            self.videos.metaobject_type
        );

        let extraction = extract_videos(&records, &self.videos, run_started);
        info!("Valid videos: {}", extraction.descriptors.len());
        if extraction.skipped > 0 {
            warn!("Skipped {} video records without id_video", extraction.skipped);
        }

        let skipped = extraction.skipped;
        let document = build_video_document(&self.shop, &self.videos, extraction);
        let path = self.output_path(&self.videos.output_path);
        self.finish(document, path, skipped, started)
    }

    fn finish<M: SitemapMedia>(
        &self,
        document: SitemapDocument<M>,
        path: &Path,
        skipped_records: usize,
        started: Instant,
    ) -> AppResult<RunSummary> {
        let stats = document.stats();
        let xml = render(&document);

        let check = validate_document(&xml)?;
        if check.url_blocks != stats.groups || check.media_elements != stats.entries {
            return Err(AppError::invalid_document(format!(
                "rendered {} url blocks with {} {} entries, expected {} with {}",
                check.url_blocks,
                check.media_elements,
                M::KIND.as_str(),
                stats.groups,
                stats.entries
            )));
        }
        debug!("XML is well-formed");

        let bytes_written = write_atomically(path, xml.as_bytes())?;
        let elapsed = started.elapsed();

        info!(
            "Wrote {} {} entries in {} url blocks to {} ({}, {})",
            stats.entries,
            M::KIND.as_str(),
            stats.groups,
            path.display(),
            format_kilobytes(bytes_written),
            format_elapsed(elapsed)
        );

        Ok(RunSummary {
            kind: M::KIND,
            output_path: path.to_path_buf(),
            stats,
            bytes_written,
            skipped_records,
            elapsed,
        })
    }
}

/// One group per article with media, then the release calendar group if any
/// release record carries an image
pub fn build_image_document(
    shop: &ShopConfig,
    config: &ImageSitemapConfig,
    articles: &[ArticleRecord],
    releases: &[MetaobjectRecord],
) -> SitemapDocument<ImageDescriptor> {
    let mut document = SitemapDocument::new();

    for article in articles {
        let images = extract_article_images(article);
        let page = shop.article_url(&article.blog_handle, &article.handle);
        if !document.push_group(UrlGroup::new(page, images)) {
            debug!("Article {}/{} has no images", article.blog_handle, article.handle);
        }
    }

    let release_images: Vec<ImageDescriptor> = releases
        .iter()
        .filter_map(|record| extract_release_image(record, config))
        .collect();
    document.push_group(UrlGroup::new(
        shop.page_url(&config.release_calendar_path),
        release_images,
    ));

    document
}

/// The single blog index group holding every video, kept even when empty
pub fn build_video_document(
    shop: &ShopConfig,
    config: &VideoSitemapConfig,
    extraction: VideoExtraction,
) -> SitemapDocument<VideoDescriptor> {
    let mut document = SitemapDocument::new();
    document.push_index_group(
        UrlGroup::new(shop.blog_url(&config.blog_handle), extraction.descriptors)
            .with_changefreq(config.changefreq.clone())
            .with_priority(config.priority.clone()),
    );
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(blog: &str, handle: &str, image: Option<&str>) -> ArticleRecord {
        ArticleRecord {
            blog_handle: blog.to_string(),
            blog_title: blog.to_string(),
            handle: handle.to_string(),
            title: handle.to_uppercase(),
            image_url: image.map(str::to_string),
            image_alt_text: None,
            html_content: None,
        }
    }

    #[test]
    fn test_image_document_skips_articles_without_media() {
        let shop = ShopConfig::default();
        let articles = vec![
            article("news", "a", Some("https://x/a.png")),
            article("news", "b", None),
            article("guides", "c", Some("//x/c.png")),
        ];
        let doc = build_image_document(&shop, &ImageSitemapConfig::default(), &articles, &[]);

        let pages: Vec<&str> = doc.groups().iter().map(|g| g.page_url.as_str()).collect();
        assert_eq!(
            pages,
            [
                "https://gaming-hub.fr/blogs/news/a",
                "https://gaming-hub.fr/blogs/guides/c"
            ]
        );
    }

    #[test]
    fn test_release_group_only_with_images() {
        let shop = ShopConfig::default();
        let config = ImageSitemapConfig::default();
        let no_images: Vec<MetaobjectRecord> =
            vec![[("titre", "Zelda")].into_iter().collect()];
        let doc = build_image_document(&shop, &config, &[], &no_images);
        assert!(doc.groups().is_empty());

        let with_image: Vec<MetaobjectRecord> = vec![
            [("titre", "Zelda")].into_iter().collect(),
            [("image_url", "https://x/m.png")].into_iter().collect(),
        ];
        let doc = build_image_document(&shop, &config, &[], &with_image);
        assert_eq!(doc.groups().len(), 1);
        assert_eq!(
            doc.groups()[0].page_url,
            "https://gaming-hub.fr/blogs/calendrier-des-sorties-de-jeux-video"
        );
        assert_eq!(doc.stats().entries, 1);
    }

    #[test]
    fn test_video_document_keeps_empty_index() {
        let doc = build_video_document(
            &ShopConfig::default(),
            &VideoSitemapConfig::default(),
            VideoExtraction::default(),
        );
        let xml = render(&doc);
        assert!(xml.contains(
            "<loc>https://gaming-hub.fr/blogs/films-et-cinematiques-de-jeux-videos</loc>"
        ));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(!xml.contains("<video:video>"));
    }
}
