use serde::{Deserialize, Serialize};

use crate::available_facets::AvailableFacetSet;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuSummary {
    pub id: String,
    pub name: String,
    pub brand_name: Option<String>,
    pub image_url: Option<String>,
    pub background_removed_image_url: Option<String>,
    pub price: Option<f64>,
}

impl SkuSummary {
    /// Falls back to the original image when no cut-out exists.
    pub fn display_image(&self, show_original: bool) -> Option<&str> {
        if show_original {
            return self.image_url.as_deref();
        }
        self.background_removed_image_url.as_deref().or(self.image_url.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchResponse {
    pub items: Vec<SkuSummary>,
    pub total: u64,
    pub available_facets: Option<AvailableFacetSet>,
}
