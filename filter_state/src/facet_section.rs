//! View model for one filter section: hierarchy, availability and selection
//! folded together.

use common::{
    available_facets::AvailableFacetSet,
    facet_key::FacetKey,
    facet_option::{FacetCatalog, FacetOption},
    filter_selection::FilterSelection,
};

use crate::{availability::{Availability, AvailabilityFilter}, hierarchy::DependentFacetResolver};


#[derive(Debug, Clone, PartialEq)]
pub struct SectionOption {
    pub option: FacetOption,
    pub selected: bool,
    /// False for selected values the current results no longer contain.
    pub available: bool,
    /// Selected, but no selected parent accounts for it.
    pub orphaned: bool,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacetSection {
    pub key: FacetKey,
    pub options: Vec<SectionOption>,
    pub has_selection: bool,
}

impl FacetSection {
    pub fn option_ids(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.option.id.as_str()).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.options.iter().filter(|o| o.selected).count()
    }
}

/// `None` when the section should be hidden.
pub fn facet_section(
    catalog: &FacetCatalog,
    selection: &FilterSelection,
    available: Option<&AvailableFacetSet>,
    resolver: &DependentFacetResolver,
    key: FacetKey,
) -> Option<FacetSection> {
    let filter = AvailabilityFilter::new(available);
    let dependent = resolver.visible_options(catalog, selection, key);
    let surviving = filter.filter(key, dependent);
    if !filter.section_visible(key, surviving.len(), selection) {
        return None;
    }

    let orphans = resolver.orphaned_selections(catalog, selection, key);
    let mut options = surviving
        .into_iter()
        .map(|(option, availability)| SectionOption {
            option: option.clone(),
            selected: selection.is_selected(key, &option.id),
            available: true,
            orphaned: false,
            count: availability.count(),
        })
        .collect::<Vec<_>>();

    // selected values filtered out above are still listed so they can be cleared
    for id in selection.selected_values(key) {
        if options.iter().any(|o| o.option.id == id) {
            continue;
        }
        let option = catalog.find(key, id).cloned().unwrap_or_else(|| FacetOption::new(id, id));
        let availability = filter.availability(key, &option);
        options.push(SectionOption {
            selected: true,
            available: availability.is_visible(),
            orphaned: orphans.contains(id),
            count: match availability {
                Availability::Absent => Some(0),
                other => other.count(),
            },
            option,
        });
    }

    Some(FacetSection { key, options, has_selection: selection.has_selection(key) })
}

pub fn facet_sections(
    catalog: &FacetCatalog,
    selection: &FilterSelection,
    available: Option<&AvailableFacetSet>,
    resolver: &DependentFacetResolver,
    keys: &[FacetKey],
) -> Vec<FacetSection> {
    keys.iter()
        .filter_map(|key| facet_section(catalog, selection, available, resolver, *key))
        .collect()
}
