//! Lines and collections that depend on the selected brands.

use common::facet_option::FacetOption;

use crate::{http_utils::HttpCatalogBackend, wire::{RawFacetOption, into_options}};

pub const BRAND_LINES_PATH: &str = "brands/lines";
pub const BRAND_COLLECTIONS_PATH: &str = "brands/collections";

fn brand_query(brand_ids: &[String]) -> Vec<(String, String)> {
    vec![("brandIds".to_string(), brand_ids.join(","))]
}

pub async fn fetch_brand_lines(http: &HttpCatalogBackend, brand_ids: &[String]) -> anyhow::Result<Vec<FacetOption>> {
    if brand_ids.is_empty() {
        return Ok(Vec::new());
    }
    let raw = http.get_json::<Vec<RawFacetOption>>(BRAND_LINES_PATH, &brand_query(brand_ids)).await?;
    Ok(into_options(raw))
}

pub async fn fetch_brand_collections(http: &HttpCatalogBackend, brand_ids: &[String]) -> anyhow::Result<Vec<FacetOption>> {
    if brand_ids.is_empty() {
        return Ok(Vec::new());
    }
    let raw = http.get_json::<Vec<RawFacetOption>>(BRAND_COLLECTIONS_PATH, &brand_query(brand_ids)).await?;
    Ok(into_options(raw))
}
