//! Image descriptors from articles and game-release records

use tracing::trace;

use super::scanner::scan_image_sources;
use crate::config::ImageSitemapConfig;
use crate::normalizer::{ArticleRecord, MetaobjectRecord};
use crate::sitemap::ImageDescriptor;
use crate::utils::UrlUtils;

/// All images of one article: the featured image first, then images embedded
/// in the content, skipping any locator already collected for this article.
pub fn extract_article_images(article: &ArticleRecord) -> Vec<ImageDescriptor> {
    let mut images: Vec<ImageDescriptor> = Vec::new();

    if let Some(loc) = article
        .image_url
        .as_deref()
        .and_then(UrlUtils::normalize_media_url)
    {
        let title = article
            .image_alt_text
            .as_deref()
            .filter(|alt| !alt.is_empty())
            .unwrap_or(&article.title);
        images.push(ImageDescriptor {
            loc,
            title: title.to_string(),
            caption: article.title.clone(),
        });
    }

    if let Some(html) = article.html_content.as_deref() {
        for src in scan_image_sources(html) {
            let Some(loc) = UrlUtils::normalize_media_url(&src) else {
                continue;
            };
            if images.iter().any(|image| image.loc == loc) {
                trace!("Skipping duplicate image {} in article {}", loc, article.handle);
                continue;
            }
            images.push(ImageDescriptor {
                loc,
                title: article.title.clone(),
                caption: article.title.clone(),
            });
        }
    }

    images
}

/// Image of one game-release record, if it carries an `image_url`
pub fn extract_release_image(
    record: &MetaobjectRecord,
    config: &ImageSitemapConfig,
) -> Option<ImageDescriptor> {
    let loc = record
        .non_empty("image_url")
        .and_then(UrlUtils::normalize_media_url)?;
    let name = record.non_empty("titre");

    Some(ImageDescriptor {
        loc,
        title: name.unwrap_or(&config.release_image_title).to_string(),
        caption: name.unwrap_or(&config.release_image_caption).to_string(),
    })
}
