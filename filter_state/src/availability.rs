//! Narrows facet options to those present in the current result set.

use common::{
    available_facets::AvailableFacetSet,
    facet_key::FacetKey,
    facet_option::FacetOption,
    filter_selection::FilterSelection,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// No availability data for this facet.
    Unknown,
    Present(Option<u64>),
    Absent,
}

impl Availability {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Availability::Absent)
    }

    pub fn count(&self) -> Option<u64> {
        match self {
            Availability::Present(count) => *count,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AvailabilityFilter<'a> {
    available: Option<&'a AvailableFacetSet>,
}

impl<'a> AvailabilityFilter<'a> {
    pub fn new(available: Option<&'a AvailableFacetSet>) -> Self {
        Self { available }
    }

    pub fn pass_through() -> Self {
        Self { available: None }
    }

    pub fn availability(&self, key: FacetKey, option: &FacetOption) -> Availability {
        let Some(facet) = self.available.and_then(|set| set.get(key)) else {
            return Availability::Unknown;
        };
        match facet.lookup(&option.id, &option.label) {
            Some(count) => Availability::Present(count),
            None => Availability::Absent,
        }
    }

    pub fn filter<'o>(&self, key: FacetKey, options: impl IntoIterator<Item = &'o FacetOption>) -> Vec<(&'o FacetOption, Availability)> {
        options
            .into_iter()
            .map(|option| (option, self.availability(key, option)))
            .filter(|(_, availability)| availability.is_visible())
            .collect()
    }

    /// A facet with a selection always stays visible so it can be cleared.
    /// Otherwise it is hidden once nothing is left to pick.
    pub fn section_visible(&self, key: FacetKey, surviving_options: usize, selection: &FilterSelection) -> bool {
        if selection.has_selection(key) {
            return true;
        }
        if let Some(facet) = self.available.and_then(|set| set.get(key)) {
            if facet.is_empty() {
                return false;
            }
        }
        surviving_options > 0
    }
}
