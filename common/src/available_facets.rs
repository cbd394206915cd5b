//! Facet availability supplied alongside a search response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::facet_key::FacetKey;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub id: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailableFacet {
    /// Labels or ids, matched case-insensitively.
    Labels(Vec<String>),
    /// Exact option ids with hit counts.
    Counts(Vec<FacetCount>),
}

impl AvailableFacet {
    pub fn is_empty(&self) -> bool {
        match self {
            AvailableFacet::Labels(labels) => labels.is_empty(),
            AvailableFacet::Counts(counts) => counts.iter().all(|c| c.count == 0),
        }
    }

    /// `None` when the option is absent; `Some(count)` otherwise (labels carry no count).
    pub fn lookup(&self, id: &str, label: &str) -> Option<Option<u64>> {
        match self {
            AvailableFacet::Labels(labels) => {
                let (id, label) = (id.to_lowercase(), label.to_lowercase());
                labels
                    .iter()
                    .map(|l| l.to_lowercase())
                    .any(|l| l == label || l == id)
                    .then_some(None)
            }
            AvailableFacet::Counts(counts) => counts
                .iter()
                .find(|c| c.id == id && c.count > 0)
                .map(|c| Some(c.count)),
        }
    }
}

/// Ephemeral; replaced with every search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AvailableFacetSet {
    pub facets: BTreeMap<FacetKey, AvailableFacet>,
}

impl AvailableFacetSet {
    pub fn get(&self, key: FacetKey) -> Option<&AvailableFacet> {
        self.facets.get(&key)
    }

    pub fn with_labels(mut self, key: FacetKey, labels: &[&str]) -> Self {
        self.facets.insert(key, AvailableFacet::Labels(labels.iter().map(|l| l.to_string()).collect()));
        self
    }

    pub fn with_counts(mut self, key: FacetKey, counts: &[(&str, u64)]) -> Self {
        let counts = counts.iter().map(|(id, count)| FacetCount { id: id.to_string(), count: *count }).collect();
        self.facets.insert(key, AvailableFacet::Counts(counts));
        self
    }
}
