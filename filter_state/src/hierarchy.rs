//! Dependent facets: department → category → subcategory → apparel item.

use std::collections::BTreeSet;

use common::{
    facet_key::FacetKey,
    facet_option::{FacetCatalog, FacetOption},
    filter_selection::FilterSelection,
};

pub const APPAREL_HIERARCHY: [FacetKey; 4] = [
    FacetKey::DepartmentId,
    FacetKey::CategoryId,
    FacetKey::SubcategoryId,
    FacetKey::ApparelId,
];

/// Derives the visible options of each level from the parent level's
/// selection. Pure: no caching, no network.
#[derive(Debug, Clone, PartialEq)]
pub struct DependentFacetResolver {
    levels: Vec<FacetKey>,
}

impl Default for DependentFacetResolver {
    fn default() -> Self {
        Self::new(APPAREL_HIERARCHY.to_vec())
    }
}

impl DependentFacetResolver {
    pub fn new(levels: Vec<FacetKey>) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[FacetKey] {
        &self.levels
    }

    pub fn parent_of(&self, key: FacetKey) -> Option<FacetKey> {
        let index = self.levels.iter().position(|level| *level == key)?;
        index.checked_sub(1).map(|parent| self.levels[parent])
    }

    /// Facets outside the chain, and levels whose parent has no selection,
    /// show their whole catalog.
    pub fn visible_options<'a>(&self, catalog: &'a FacetCatalog, selection: &FilterSelection, key: FacetKey) -> Vec<&'a FacetOption> {
        let options = catalog.options(key);
        let Some(parent) = self.parent_of(key) else {
            return options.iter().collect();
        };
        let parents = selection.selected_values(parent);
        if parents.is_empty() {
            return options.iter().collect();
        }
        options
            .iter()
            .filter(|option| option.parent_id.as_deref().map(|p| parents.contains(p)).unwrap_or(false))
            .collect()
    }

    /// Selected values of `key` that no selected parent accounts for. These
    /// stay selected until cleared explicitly.
    pub fn orphaned_selections(&self, catalog: &FacetCatalog, selection: &FilterSelection, key: FacetKey) -> BTreeSet<String> {
        let selected = selection.selected_values(key);
        let Some(parent) = self.parent_of(key) else {
            return BTreeSet::new();
        };
        // without a parent selection nothing can have lost its parent
        if selected.is_empty() || !selection.has_selection(parent) {
            return BTreeSet::new();
        }
        let visible = self
            .visible_options(catalog, selection, key)
            .into_iter()
            .map(|option| option.id.as_str())
            .collect::<BTreeSet<_>>();
        selected.difference(&visible).map(|id| id.to_string()).collect()
    }
}
