//! Selectable facet options and the per-facet catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::facet_key::FacetKey;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Decoration {
    #[default]
    None,
    Logo(String),
    Swatch(String),
    Flag(String),
    Icon(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub id: String,
    pub label: String,
    pub decoration: Decoration,
    /// Entry of the parent tier for hierarchical facets.
    pub parent_id: Option<String>,
}

impl FacetOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), decoration: Decoration::None, parent_id: None }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = decoration;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacetCatalog {
    pub facets: BTreeMap<FacetKey, Vec<FacetOption>>,
}

impl FacetCatalog {
    pub fn options(&self, key: FacetKey) -> &[FacetOption] {
        self.facets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, key: FacetKey, options: Vec<FacetOption>) {
        self.facets.insert(key, options);
    }

    pub fn find(&self, key: FacetKey, id: &str) -> Option<&FacetOption> {
        self.options(key).iter().find(|option| option.id == id)
    }
}
