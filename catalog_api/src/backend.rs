//! The seam between the filter state and the catalog services.

use async_trait::async_trait;
use common::{facet_key::FacetKey, facet_option::FacetOption, search_query::SearchQuery, search_result::SearchResponse};


#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn facet_options(&self, key: FacetKey) -> anyhow::Result<Vec<FacetOption>>;

    async fn brand_lines(&self, brand_ids: &[String]) -> anyhow::Result<Vec<FacetOption>>;

    async fn brand_collections(&self, brand_ids: &[String]) -> anyhow::Result<Vec<FacetOption>>;

    async fn search(&self, query: &SearchQuery) -> anyhow::Result<SearchResponse>;
}
