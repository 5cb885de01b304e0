//! Wire types for the commerce GraphQL payloads
//!
//! These mirror the JSON shapes exactly (edges/node connections for blogs and
//! articles, nodes/fields lists for metaobjects). Identifiers the sitemap
//! cannot do without are required, so a payload missing them fails to decode
//! instead of producing half-built records further down.

use serde::Deserialize;

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<GraphqlErrors>,
}

/// Shopify reports GraphQL failures as a list, but auth failures as a bare string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GraphqlErrors {
    List(Vec<GraphqlError>),
    Message(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

impl GraphqlErrors {
    pub fn messages(self) -> Vec<String> {
        match self {
            Self::List(errors) => errors.into_iter().map(|e| e.message).collect(),
            Self::Message(message) => vec![message],
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(errors) => errors.is_empty(),
            Self::Message(message) => message.is_empty(),
        }
    }
}

/// Relay-style connection (`edges { node }`)
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// Flat node list (`nodes`)
#[derive(Debug, Clone, Deserialize)]
pub struct NodeList<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Connection<T> {
    pub fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges.into_iter().map(|edge| edge.node)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct BlogsPayload {
    pub blogs: Connection<BlogNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogNode {
    #[serde(default)]
    pub id: Option<String>,
    pub handle: String,
    pub title: String,
    pub articles: Connection<ArticleNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleNode {
    #[serde(default)]
    pub id: Option<String>,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub image: Option<ImageNode>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// `metaobjects` may come back null when the type is unknown to the storefront
#[derive(Debug, Deserialize)]
pub struct MetaobjectsPayload {
    #[serde(default)]
    pub metaobjects: Option<NodeList<MetaobjectNode>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetaobjectNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default = "Vec::new")]
    pub fields: Vec<FieldNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldNode {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}
