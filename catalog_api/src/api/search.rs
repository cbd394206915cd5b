//! SKU search endpoint.

use common::{search_query::SearchQuery, search_result::SearchResponse};

use crate::{http_utils::HttpCatalogBackend, wire::RawSearchResponse};

pub const SEARCH_PATH: &str = "sku/search";

pub async fn search_skus(http: &HttpCatalogBackend, query: &SearchQuery) -> anyhow::Result<SearchResponse> {
    let pairs = query.to_query_pairs();
    let raw = http.get_json::<RawSearchResponse>(SEARCH_PATH, &pairs).await?;
    let response = raw.into_response();
    tracing::debug!("search {} -> {} items of {}", query.to_query_string(), response.items.len(), response.total);
    Ok(response)
}
