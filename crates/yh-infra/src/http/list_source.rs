//! HTTP adapter for [`RemoteListSourcePort`].
//!
//! `GET <endpoint>?page=<n>&limit=<n>` returning
//! `{ items: [...], meta?: { currentPage, totalPages, totalItems, itemsPerPage } }`.

use std::marker::PhantomData;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use yh_core::ports::{ListSourceError, RemoteListSourcePort};
use yh_core::{CollectionKey, PageResponse};

use crate::config::EndpointConfig;

pub struct HttpListSource<T> {
    client: reqwest::Client,
    base_url: String,
    endpoints: EndpointConfig,
    _item: PhantomData<fn() -> T>,
}

impl<T> HttpListSource<T> {
    pub fn new(
        base_url: impl Into<String>,
        endpoints: EndpointConfig,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, base_url, endpoints))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        endpoints: EndpointConfig,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            endpoints,
            _item: PhantomData,
        }
    }
}

#[async_trait]
impl<T> RemoteListSourcePort<T> for HttpListSource<T>
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(
        &self,
        key: &CollectionKey,
        page: u32,
        limit: u32,
    ) -> Result<PageResponse<T>, ListSourceError> {
        let url = self.endpoints.resolve(&self.base_url, key)?;
        debug!(key = %key, url = %url, page, limit, "requesting page");

        let response = self
            .client
            .get(&url)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await
            .map_err(|e| ListSourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(key = %key, url = %url, status = status.as_u16(), "page request rejected");
            return Err(ListSourceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ListSourceError::Network(e.to_string()))?;
        let page_response: PageResponse<T> =
            serde_json::from_slice(&body).map_err(|e| ListSourceError::Decode(e.to_string()))?;

        debug!(
            key = %key,
            page,
            received = page_response.items.len(),
            has_meta = page_response.meta.is_some(),
            "page received"
        );
        Ok(page_response)
    }
}
