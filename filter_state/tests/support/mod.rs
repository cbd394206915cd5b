#![allow(dead_code)]

use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use catalog_api::{CatalogApiConfig, CatalogBackend};
use common::{
    available_facets::AvailableFacetSet,
    facet_key::FacetKey,
    facet_option::FacetOption,
    search_query::SearchQuery,
    search_result::{SearchResponse, SkuSummary},
};

/// Search terms containing "slow" take a second, terms containing "fail"
/// error out. Brand "down" fails both brand endpoints, "broken" only
/// collections. Every search response holds one item whose id is the request's query
/// string, so tests can tell which request was applied.
#[derive(Default)]
pub struct FakeCatalog {
    pub searches: Mutex<Vec<SearchQuery>>,
    pub brand_requests: Mutex<Vec<Vec<String>>>,
}

impl FakeCatalog {
    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }

    pub fn brand_request_count(&self) -> usize {
        self.brand_requests.lock().unwrap().len()
    }

    fn brand_options(brand_ids: &[String], suffix: &str) -> Vec<FacetOption> {
        brand_ids
            .iter()
            .map(|id| FacetOption::new(format!("{id}-{suffix}"), format!("{id} {suffix}")).with_parent(id.clone()))
            .collect()
    }

    async fn brand_delay(brand_ids: &[String]) {
        let delay = if brand_ids.len() == 1 && brand_ids[0] == "slow" { 1000 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}

#[async_trait]
impl CatalogBackend for FakeCatalog {
    async fn facet_options(&self, key: FacetKey) -> anyhow::Result<Vec<FacetOption>> {
        Ok(vec![FacetOption::new(format!("{key}-1"), "One")])
    }

    async fn brand_lines(&self, brand_ids: &[String]) -> anyhow::Result<Vec<FacetOption>> {
        self.brand_requests.lock().unwrap().push(brand_ids.to_vec());
        Self::brand_delay(brand_ids).await;
        if brand_ids.iter().any(|id| id == "down") {
            anyhow::bail!("502 Bad Gateway");
        }
        Ok(Self::brand_options(brand_ids, "line"))
    }

    async fn brand_collections(&self, brand_ids: &[String]) -> anyhow::Result<Vec<FacetOption>> {
        Self::brand_delay(brand_ids).await;
        if brand_ids.iter().any(|id| id == "broken" || id == "down") {
            anyhow::bail!("500 Internal Server Error");
        }
        Ok(Self::brand_options(brand_ids, "fw24"))
    }

    async fn search(&self, query: &SearchQuery) -> anyhow::Result<SearchResponse> {
        self.searches.lock().unwrap().push(query.clone());
        let delay = if query.query_string.contains("slow") { 1000 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        if query.query_string.contains("fail") {
            anyhow::bail!("connection reset by peer");
        }
        Ok(SearchResponse {
            items: vec![SkuSummary {
                id: query.to_query_string(),
                name: "Item".to_string(),
                brand_name: None,
                image_url: None,
                background_removed_image_url: None,
                price: Some(120.0),
            }],
            total: 1,
            available_facets: Some(AvailableFacetSet::default().with_labels(FacetKey::SizeId, &["S", "M"])),
        })
    }
}

pub fn config() -> CatalogApiConfig {
    CatalogApiConfig::default()
}

pub async fn settle() {
    tokio::time::sleep(Duration::from_secs(5)).await;
}
