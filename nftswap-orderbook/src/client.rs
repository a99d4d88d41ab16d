//! The orderbook HTTP client.

use crate::error::OrderbookError;
use crate::types::{PostOrderBody, PostedOrder, SearchOrdersQuery, SearchOrdersResponse};
use nftswap_evm::v4::SignedNftOrder;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

/// The hosted orderbook service.
pub const DEFAULT_ORDERBOOK_URL: &str = "https://api.trader.xyz";

/// Configuration for [`OrderbookClient`].
#[derive(Debug, Clone)]
pub struct OrderbookConfig {
    /// Service base URL, without a trailing slash.
    pub url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Optional pre-configured reqwest client. If `None`, a new client is
    /// created with the configured timeout.
    pub http_client: Option<reqwest::Client>,
}

impl Default for OrderbookConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ORDERBOOK_URL.to_owned(),
            timeout: Duration::from_secs(30),
            http_client: None,
        }
    }
}

impl OrderbookConfig {
    /// Creates a config with the given service base URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

/// Client for the hosted orderbook service.
#[derive(Debug, Clone)]
pub struct OrderbookClient {
    url: String,
    client: reqwest::Client,
}

impl Default for OrderbookClient {
    fn default() -> Self {
        Self::new(OrderbookConfig::default())
    }
}

impl OrderbookClient {
    /// Creates a client from a config.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed, which
    /// only happens when the TLS backend fails to initialize.
    #[must_use]
    pub fn new(config: OrderbookConfig) -> Self {
        let client = config.http_client.unwrap_or_else(|| {
            reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .expect("reqwest client construction")
        });
        let url = config.url.trim_end_matches('/').to_owned();
        Self { url, client }
    }

    /// Creates a client against the hosted service with default settings.
    #[must_use]
    pub fn hosted() -> Self {
        Self::default()
    }

    /// Posts a signed order to the orderbook.
    ///
    /// The chain id travels as a decimal string; `metadata` is opaque
    /// key/value data stored alongside the order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderbookError::Api`] with the parsed error body on a
    /// non-2xx response, or [`OrderbookError::Http`] on transport failure.
    pub async fn post_order(
        &self,
        order: &SignedNftOrder,
        chain_id: u64,
        metadata: Option<&HashMap<String, String>>,
    ) -> Result<PostedOrder, OrderbookError> {
        let body = PostOrderBody {
            order,
            chain_id: chain_id.to_string(),
            metadata,
        };
        tracing::debug!(chain_id, "posting order to orderbook");
        let response = self
            .client
            .post(format!("{}/orderbook/order", self.url))
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Searches the orderbook with structured filters.
    ///
    /// Entries the service returns that fail to parse are skipped rather
    /// than failing the page.
    ///
    /// # Errors
    ///
    /// Returns [`OrderbookError::Api`] with the parsed error body on a
    /// non-2xx response, or [`OrderbookError::Http`] on transport failure.
    pub async fn search_orders(
        &self,
        query: &SearchOrdersQuery,
    ) -> Result<Vec<PostedOrder>, OrderbookError> {
        let response = self
            .client
            .get(format!("{}/orderbook/orders", self.url))
            .query(query)
            .send()
            .await?;
        let payload: SearchOrdersResponse = Self::decode(response).await?;
        tracing::debug!(count = payload.orders.len(), "orderbook search returned");
        Ok(payload.orders)
    }

    /// Decodes a 2xx body, or surfaces the parsed JSON error body.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, OrderbookError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response
                .json::<serde_json::Value>()
                .await
                .unwrap_or(serde_json::Value::Null);
            Err(OrderbookError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}
