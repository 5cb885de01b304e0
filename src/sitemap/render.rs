//! Sitemap XML serialization

use std::fmt::Write;

use super::{escape_xml, SitemapDocument, SitemapMedia, SITEMAP_NS};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Render a document to its XML text
///
/// Pure: the same document always yields the same bytes.
pub fn render<M: SitemapMedia>(document: &SitemapDocument<M>) -> String {
    let mut out = String::with_capacity(256 + document.stats().entries * 320);

    out.push_str(XML_DECLARATION);
    out.push('\n');
    let _ = writeln!(out, r#"<urlset xmlns="{SITEMAP_NS}""#);
    let _ = writeln!(out, r#"        xmlns:{}="{}">"#, M::PREFIX, M::NAMESPACE);

    for group in document.groups() {
        out.push_str("  <url>\n");
        let _ = writeln!(out, "    <loc>{}</loc>", escape_xml(&group.page_url));
        if let Some(changefreq) = &group.changefreq {
            let _ = writeln!(out, "    <changefreq>{}</changefreq>", escape_xml(changefreq));
        }
        if let Some(priority) = &group.priority {
            let _ = writeln!(out, "    <priority>{}</priority>", escape_xml(priority));
        }
        for media in &group.media {
            media.write_element(&mut out, 4);
        }
        out.push_str("  </url>\n");
    }

    out.push_str("</urlset>\n");
    out
}
