//! Content catalog seam between the run driver and the API

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{queries, GraphqlClient};
use crate::errors::AppResult;
use crate::models::{BlogNode, BlogsPayload, MetaobjectNode, MetaobjectsPayload};

/// Source of blog articles and metaobjects
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// First page of blogs, each with its first page of articles
    async fn fetch_blogs(&self, blog_page_size: u32, article_page_size: u32)
        -> AppResult<Vec<BlogNode>>;

    /// First page of metaobjects of one type
    async fn fetch_metaobjects(
        &self,
        metaobject_type: &str,
        page_size: u32,
    ) -> AppResult<Vec<MetaobjectNode>>;
}

/// Catalog backed by one Shopify GraphQL surface
pub struct ShopifyCatalog {
    client: GraphqlClient,
    cancel: CancellationToken,
}

impl ShopifyCatalog {
    pub fn new(client: GraphqlClient, cancel: CancellationToken) -> Self {
        Self { client, cancel }
    }
}

#[async_trait]
impl CatalogSource for ShopifyCatalog {
    async fn fetch_blogs(
        &self,
        blog_page_size: u32,
        article_page_size: u32,
    ) -> AppResult<Vec<BlogNode>> {
        info!(
            "Fetching blogs from {} API",
            self.client.surface().as_str()
        );
        let query = queries::blogs_query(blog_page_size, article_page_size);
        let payload: BlogsPayload = self.client.execute(&query, &self.cancel).await?;
        Ok(payload.blogs.into_nodes().collect())
    }

    async fn fetch_metaobjects(
        &self,
        metaobject_type: &str,
        page_size: u32,
    ) -> AppResult<Vec<MetaobjectNode>> {
        info!(
            "Fetching '{}' metaobjects from {} API",
            metaobject_type,
            self.client.surface().as_str()
        );
        let query = queries::metaobjects_query(metaobject_type, page_size);
        let payload: MetaobjectsPayload = self.client.execute(&query, &self.cancel).await?;
        Ok(payload
            .metaobjects
            .map(|list| list.nodes)
            .unwrap_or_default())
    }
}
