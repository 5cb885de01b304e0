//! GraphQL client for the commerce API
//!
//! One POST per call, no retries. Every request is bounded by the configured
//! deadline and abandoned as soon as the run's cancellation token fires.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::{ApiConfig, Credentials, ShopConfig};
use crate::errors::{AppError, AppResult};
use crate::models::GraphqlResponse;

pub mod catalog;
pub mod queries;

pub use catalog::{CatalogSource, ShopifyCatalog};

/// Which API a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiSurface {
    /// Public, read-only content API
    Storefront,
    /// Private administrative API with full catalog access
    Admin,
}

impl ApiSurface {
    pub fn endpoint(&self, shop: &ShopConfig) -> String {
        match self {
            Self::Storefront => format!(
                "https://{}/api/{}/graphql.json",
                shop.storefront_domain, shop.storefront_api_version
            ),
            Self::Admin => format!(
                "https://{}/admin/api/{}/graphql.json",
                shop.admin_domain, shop.admin_api_version
            ),
        }
    }

    /// Header carrying the access token
    pub fn token_header(&self) -> &'static str {
        match self {
            Self::Storefront => "X-Shopify-Storefront-Access-Token",
            Self::Admin => "X-Shopify-Access-Token",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Storefront => "storefront",
            Self::Admin => "admin",
        }
    }
}

pub struct GraphqlClient {
    client: Client,
    surface: ApiSurface,
    endpoint: String,
    credentials: Credentials,
    request_timeout: Duration,
}

impl GraphqlClient {
    /// Create a client for one API surface of the configured shop
    pub fn new(
        surface: ApiSurface,
        shop: &ShopConfig,
        api: &ApiConfig,
        credentials: Credentials,
    ) -> AppResult<Self> {
        Self::with_endpoint(surface, surface.endpoint(shop), api, credentials)
    }

    /// Create a client against an explicit endpoint URL
    pub fn with_endpoint<E: Into<String>>(
        surface: ApiSurface,
        endpoint: E,
        api: &ApiConfig,
        credentials: Credentials,
    ) -> AppResult<Self> {
        let endpoint = endpoint.into();
        let client = Client::builder()
            .user_agent(api.user_agent.as_str())
            .connect_timeout(api.request_timeout)
            .build()
            .map_err(|e| AppError::transport(&endpoint, format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            surface,
            endpoint,
            credentials,
            request_timeout: api.request_timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn surface(&self) -> ApiSurface {
        self.surface
    }

    /// Run one query document and decode its `data` member into `T`
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> AppResult<T> {
        debug!(
            "POST {} ({} API, {} byte query)",
            self.endpoint,
            self.surface.as_str(),
            query.len()
        );

        let request = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(self.surface.token_header(), self.credentials.token())
            .json(&json!({ "query": query }));

        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|e| AppError::transport(&self.endpoint, e.to_string()))?;
            let status = response.status();
            let body = response.bytes().await.map_err(|e| {
                AppError::transport(&self.endpoint, format!("failed to read response: {e}"))
            })?;
            Ok::<_, AppError>((status, body))
        };

        let (status, body) = tokio::select! {
            _ = cancel.cancelled() => return Err(AppError::cancelled(&self.endpoint)),
            outcome = tokio::time::timeout(self.request_timeout, exchange) => match outcome {
                Ok(result) => result?,
                Err(_) => return Err(AppError::timeout(&self.endpoint, self.request_timeout)),
            },
        };

        debug!("{} answered {} with {} bytes", self.endpoint, status, body.len());
        decode_response(&self.endpoint, status, &body)
    }
}

/// Turn a raw response body into typed data or the matching error
pub fn decode_response<T: DeserializeOwned>(
    endpoint: &str,
    status: StatusCode,
    body: &[u8],
) -> AppResult<T> {
    let envelope: GraphqlResponse<serde_json::Value> = serde_json::from_slice(body)
        .map_err(|e| AppError::transport(endpoint, format!("HTTP {status}: response is not JSON: {e}")))?;

    if let Some(errors) = envelope.errors {
        if !errors.is_empty() {
            return Err(AppError::api(endpoint, errors.messages()));
        }
    }

    let data = match envelope.data {
        Some(data) if !data.is_null() => data,
        _ => {
            return Err(AppError::api(
                endpoint,
                vec![format!("HTTP {status}: response carried no data")],
            ))
        }
    };

    serde_json::from_value(data).map_err(|e| {
        AppError::transport(endpoint, format!("response did not match expected schema: {e}"))
    })
}
