//! Shared search query models and helpers.

use serde::{Deserialize, Serialize};

use crate::{facet_key::FacetKey, filter_selection::FilterSelection, search_const::PAGE_SIZE};


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub query_string: String,
    pub selection: FilterSelection,
    pub page: u64,
    pub page_size: u64,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self { query_string: String::new(), selection: FilterSelection::default(), page: 0, page_size: PAGE_SIZE }
    }
}

impl SearchQuery {
    pub fn new(query_string: impl Into<String>, selection: FilterSelection) -> Self {
        Self { query_string: query_string.into(), selection, ..Self::default() }
    }

    pub fn sort(&self) -> Option<String> {
        self.selection.serialized(FacetKey::SortBy)
    }

    /// Request parameters in a fixed order. Absent facets and a blank query
    /// string are omitted rather than sent empty.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let query_string = self.query_string.trim();
        if !query_string.is_empty() {
            pairs.push(("q".to_string(), query_string.to_string()));
        }
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs.push(("limit".to_string(), self.page_size.to_string()));
        for (key, value) in self.selection.iter() {
            let value = value.serialized();
            if value.is_empty() {
                continue;
            }
            pairs.push((key.as_str().to_string(), value));
        }
        pairs
    }

    /// Unencoded; used for logs and to identify requests.
    pub fn to_query_string(&self) -> String {
        self.to_query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::filter_selection::FacetValue;

    fn multi(values: &[&str]) -> FacetValue {
        FacetValue::Multi(values.iter().map(|v| v.to_string()).collect::<BTreeSet<_>>())
    }

    #[test]
    fn facets_serialize_in_key_order_and_multi_values_are_joined() {
        let mut selection = FilterSelection::new();
        selection.insert(FacetKey::SortBy, FacetValue::Single("price_asc".into()));
        selection.insert(FacetKey::SizeId, multi(&["m", "s"]));
        selection.insert(FacetKey::BrandId, multi(&["b2", "b1"]));
        let query = SearchQuery::new("  denim ", selection);

        assert_eq!(
            query.to_query_string(),
            "q=denim&page=0&limit=24&brandId=b1,b2&sizeId=m,s&sortBy=price_asc"
        );
        assert_eq!(query.sort().as_deref(), Some("price_asc"));
    }

    #[test]
    fn blank_query_and_absent_facets_are_omitted() {
        let query = SearchQuery::new("   ", FilterSelection::new());
        let pairs = query.to_query_pairs();
        assert!(pairs.iter().all(|(k, v)| k != "q" && !v.is_empty()));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn equal_selections_serialize_identically() {
        let mut a = FilterSelection::new();
        a.insert(FacetKey::ColorId, multi(&["red", "blue"]));
        let mut b = FilterSelection::new();
        b.insert(FacetKey::ColorId, multi(&["blue", "red"]));
        assert_eq!(
            SearchQuery::new("x", a).to_query_pairs(),
            SearchQuery::new("x", b).to_query_pairs()
        );
    }
}
