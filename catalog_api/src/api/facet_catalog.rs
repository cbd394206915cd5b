//! Facet catalog endpoints and the catalog loader.

use common::{facet_key::FacetKey, facet_option::{FacetCatalog, FacetOption}};
use futures::future::join_all;

use crate::{backend::CatalogBackend, http_utils::HttpCatalogBackend, wire::{RawFacetOption, catalog_segment, into_options}};


pub async fn fetch_facet_options(http: &HttpCatalogBackend, key: FacetKey) -> anyhow::Result<Vec<FacetOption>> {
    let Some(segment) = catalog_segment(key) else {
        anyhow::bail!("facet {} has no catalog endpoint", key);
    };
    let raw = http.get_json::<Vec<RawFacetOption>>(segment, &[]).await?;
    Ok(into_options(raw))
}

/// Facets whose options come from a catalog endpoint.
pub fn catalog_facets() -> Vec<FacetKey> {
    FacetKey::ALL.into_iter().filter(|key| catalog_segment(*key).is_some()).collect()
}

/// Fetches every catalog facet concurrently. A facet whose fetch fails is
/// left empty so the rest of the filters stay usable.
pub async fn load_catalog<B: CatalogBackend + ?Sized>(backend: &B) -> FacetCatalog {
    let keys = catalog_facets();
    let fetched = join_all(keys.iter().map(|key| backend.facet_options(*key))).await;

    let mut catalog = FacetCatalog::default();
    for (key, result) in keys.into_iter().zip(fetched) {
        match result {
            Ok(options) => catalog.insert(key, options),
            Err(e) => {
                tracing::warn!("failed to load facet options for {}: {:#}", key, e);
                catalog.insert(key, Vec::new());
            }
        }
    }
    tracing::info!("facet catalog loaded: {} facets", catalog.facets.len());
    catalog
}
