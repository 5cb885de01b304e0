//! Flattening of API payloads into per-entity records
//!
//! Blogs arrive as nested connections and metaobjects as key/value field
//! lists. Extraction only ever sees the flat records built here.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{BlogNode, MetaobjectNode};

/// One blog article, scoped to a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub blog_handle: String,
    pub blog_title: String,
    pub handle: String,
    pub title: String,
    pub image_url: Option<String>,
    pub image_alt_text: Option<String>,
    pub html_content: Option<String>,
}

/// Per-blog article tally for operator reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogSummary {
    pub handle: String,
    pub title: String,
    pub article_count: usize,
}

/// Field key to value mapping of one metaobject
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaobjectRecord {
    pub handle: Option<String>,
    fields: HashMap<String, String>,
}

impl MetaobjectRecord {
    /// Raw field value, absent when the key is missing or was null
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Field value with empty strings treated as absent
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetaobjectRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            handle: None,
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Flatten every article of every blog, keeping blog order then article order
pub fn normalize_blogs(blogs: Vec<BlogNode>) -> (Vec<ArticleRecord>, Vec<BlogSummary>) {
    let mut articles = Vec::new();
    let mut summaries = Vec::with_capacity(blogs.len());

    for blog in blogs {
        summaries.push(BlogSummary {
            handle: blog.handle.clone(),
            title: blog.title.clone(),
            article_count: blog.articles.len(),
        });

        for node in blog.articles.into_nodes() {
            let (image_url, image_alt_text) = match node.image {
                Some(image) => (image.url, image.alt_text),
                None => (None, None),
            };

            articles.push(ArticleRecord {
                blog_handle: blog.handle.clone(),
                blog_title: blog.title.clone(),
                handle: node.handle,
                title: node.title,
                image_url,
                image_alt_text,
                html_content: node.content,
            });
        }
    }

    debug!(
        "Normalized {} articles from {} blogs",
        articles.len(),
        summaries.len()
    );
    (articles, summaries)
}

/// Build the field mapping of one metaobject in a single pass
///
/// Later duplicates win. A later `null` value removes an earlier one, so the
/// key reads as absent.
pub fn normalize_metaobject(node: MetaobjectNode) -> MetaobjectRecord {
    let mut fields = HashMap::with_capacity(node.fields.len());

    for field in node.fields {
        match field.value {
            Some(value) => {
                fields.insert(field.key, value);
            }
            None => {
                fields.remove(&field.key);
            }
        }
    }

    MetaobjectRecord {
        handle: node.handle,
        fields,
    }
}

pub fn normalize_metaobjects(nodes: Vec<MetaobjectNode>) -> Vec<MetaobjectRecord> {
    nodes.into_iter().map(normalize_metaobject).collect()
}
