//! HTTP plumbing for the catalog services.

use async_trait::async_trait;
use common::{facet_key::FacetKey, facet_option::FacetOption, search_query::SearchQuery, search_result::SearchResponse};
use serde::de::DeserializeOwned;

use crate::{api, backend::CatalogBackend, config::CatalogApiConfig};


#[derive(Debug, Clone)]
pub struct HttpCatalogBackend {
    client: reqwest::Client,
    config: CatalogApiConfig,
}

impl HttpCatalogBackend {
    pub fn new(config: CatalogApiConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(CatalogApiConfig::from_env())
    }

    pub fn config(&self) -> &CatalogApiConfig {
        &self.config
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> anyhow::Result<T> {
        let url = self.config.url(path);
        let t0 = std::time::Instant::now();
        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let response_txt = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("Error: {} {}: {}", status, url, response_txt);
        }
        let dt_ms = t0.elapsed().as_millis();
        tracing::debug!("GET {} -> {} bytes in {}ms", url, response_txt.len(), dt_ms);
        let parsed = serde_json::from_str::<T>(&response_txt)
            .map_err(|e| anyhow::anyhow!("Invalid response from {}: {}", url, e))?;
        Ok(parsed)
    }
}

#[async_trait]
impl CatalogBackend for HttpCatalogBackend {
    async fn facet_options(&self, key: FacetKey) -> anyhow::Result<Vec<FacetOption>> {
        api::facet_catalog::fetch_facet_options(self, key).await
    }

    async fn brand_lines(&self, brand_ids: &[String]) -> anyhow::Result<Vec<FacetOption>> {
        api::brand_options::fetch_brand_lines(self, brand_ids).await
    }

    async fn brand_collections(&self, brand_ids: &[String]) -> anyhow::Result<Vec<FacetOption>> {
        api::brand_options::fetch_brand_collections(self, brand_ids).await
    }

    async fn search(&self, query: &SearchQuery) -> anyhow::Result<SearchResponse> {
        api::search::search_skus(self, query).await
    }
}
