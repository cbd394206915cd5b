//! JSON shapes returned by the catalog services and their conversion into
//! the shared models.

use std::collections::BTreeMap;

use common::{
    available_facets::{AvailableFacet, AvailableFacetSet, FacetCount},
    facet_key::FacetKey,
    facet_option::{Decoration, FacetOption},
    search_result::{SearchResponse, SkuSummary},
};
use serde::{Deserialize, Serialize};


/// Catalog path segment for facets that have a catalog endpoint.
pub fn catalog_segment(key: FacetKey) -> Option<&'static str> {
    Some(match key {
        FacetKey::BrandId => "brands",
        FacetKey::DepartmentId => "vufs/departments",
        FacetKey::CategoryId => "vufs/categories",
        FacetKey::SubcategoryId => "vufs/subcategories",
        FacetKey::ApparelId => "vufs/apparels",
        FacetKey::StyleId => "vufs/styles",
        FacetKey::PatternId => "vufs/patterns",
        FacetKey::FitId => "vufs/fits",
        FacetKey::GenderId => "vufs/genders",
        FacetKey::MaterialId => "vufs/materials",
        FacetKey::ColorId => "vufs/colors",
        FacetKey::SizeId => "vufs/sizes",
        FacetKey::Nationality => "vufs/nationalities",
        FacetKey::Years => "vufs/years",
        FacetKey::Months => "vufs/months",
        FacetKey::Days => "vufs/days",
        FacetKey::Condition => "vufs/conditions",
        FacetKey::LineId | FacetKey::Collection | FacetKey::MinPrice | FacetKey::MaxPrice | FacetKey::SortBy => return None,
    })
}

/// Availability sections are keyed either by facet key (`sizeId`) or by
/// section name (`sizes`).
pub fn facet_key_for_section(name: &str) -> Option<FacetKey> {
    if let Some(key) = FacetKey::parse(name) {
        return Some(key);
    }
    let key = match name {
        "lines" => FacetKey::LineId,
        "collections" => FacetKey::Collection,
        _ => return FacetKey::ALL
            .into_iter()
            .find(|key| catalog_segment(*key).map(|s| s.rsplit('/').next() == Some(name)).unwrap_or(false)),
    };
    Some(key)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFacetOption {
    #[serde(default)]
    pub id: serde_json::Value,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub parent_id: Option<serde_json::Value>,
}

fn id_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl RawFacetOption {
    /// `None` for entries without a usable id.
    pub fn into_option(self) -> Option<FacetOption> {
        let id = id_string(&self.id)?;
        let non_empty = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
        let decoration = if let Some(logo) = non_empty(self.logo) {
            Decoration::Logo(logo)
        } else if let Some(hex) = non_empty(self.hex) {
            Decoration::Swatch(hex)
        } else if let Some(code) = non_empty(self.code) {
            Decoration::Flag(code)
        } else if let Some(icon) = non_empty(self.icon) {
            Decoration::Icon(icon)
        } else {
            Decoration::None
        };
        Some(FacetOption {
            id,
            label: self.name,
            decoration,
            parent_id: self.parent_id.as_ref().and_then(id_string),
        })
    }
}

pub fn into_options(raw: Vec<RawFacetOption>) -> Vec<FacetOption> {
    raw.into_iter().filter_map(RawFacetOption::into_option).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSku {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub removed_background_image_url: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAvailableFacet {
    Counts(Vec<FacetCount>),
    Labels(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSearchResponse {
    pub items: Vec<RawSku>,
    pub total: Option<u64>,
    pub available_facets: Option<BTreeMap<String, RawAvailableFacet>>,
}

impl RawSearchResponse {
    pub fn into_response(self) -> SearchResponse {
        let items = self
            .items
            .into_iter()
            .filter_map(|raw| {
                Some(SkuSummary {
                    id: id_string(&raw.id)?,
                    name: raw.name,
                    brand_name: raw.brand_name,
                    image_url: raw.image_url,
                    background_removed_image_url: raw.removed_background_image_url,
                    price: raw.price,
                })
            })
            .collect::<Vec<_>>();
        let total = self.total.unwrap_or(items.len() as u64);
        let available_facets = self.available_facets.map(|sections| {
            let mut set = AvailableFacetSet::default();
            for (name, facet) in sections {
                let Some(key) = facet_key_for_section(&name) else {
                    tracing::debug!("ignoring unknown availability section: {}", name);
                    continue;
                };
                let facet = match facet {
                    RawAvailableFacet::Counts(counts) => AvailableFacet::Counts(counts),
                    RawAvailableFacet::Labels(labels) => AvailableFacet::Labels(labels),
                };
                set.facets.insert(key, facet);
            }
            set
        });
        SearchResponse { items, total, available_facets }
    }
}
