//! Filter selection state and its mutation rules.
//!
//! Mutators return `true` only when the selection (or search term) actually
//! changed. Unknown keys, empty values, values of the wrong cardinality and
//! locked facets are ignored without error.

use std::collections::BTreeSet;

use common::{
    facet_key::FacetKey,
    filter_selection::{FacetValue, FilterSelection},
};


#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetStateStore {
    selection: FilterSelection,
    search_term: String,
    locked: BTreeSet<FacetKey>,
}

impl FacetStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn locked(&self) -> &BTreeSet<FacetKey> {
        &self.locked
    }

    pub fn is_locked(&self, key: FacetKey) -> bool {
        self.locked.contains(&key)
    }

    /// Pins a facet for the hosting page, e.g. `brandId` on a brand page.
    /// Returns `false` when the value is malformed or the facet was already
    /// pinned to it.
    pub fn lock(&mut self, key: FacetKey, value: FacetValue) -> bool {
        let Some(value) = sanitize_value(key, value) else {
            tracing::debug!("ignoring malformed lock value for {}", key);
            return false;
        };
        let unchanged = self.is_locked(key) && self.selection.get(key) == Some(&value);
        self.selection.insert(key, value);
        self.locked.insert(key);
        !unchanged
    }

    fn mutable_key(&self, key: &str) -> Option<FacetKey> {
        let Some(key) = FacetKey::parse(key) else {
            tracing::debug!("ignoring unknown facet key: {}", key);
            return None;
        };
        if self.is_locked(key) {
            tracing::debug!("ignoring mutation of locked facet: {}", key);
            return None;
        }
        Some(key)
    }

    /// Selecting the current value again clears it; `None` clears.
    pub fn set_single(&mut self, key: &str, value: Option<&str>) -> bool {
        let Some(key) = self.mutable_key(key) else {
            return false;
        };
        if key.is_multi() {
            tracing::debug!("set_single on multi-value facet {} ignored", key);
            return false;
        }
        match value {
            None => self.selection.remove(key).is_some(),
            Some("") => false,
            Some(value) if self.selection.is_selected(key, value) => self.selection.remove(key).is_some(),
            Some(value) => {
                self.selection.insert(key, FacetValue::Single(value.to_string()));
                true
            }
        }
    }

    pub fn toggle_multi(&mut self, key: &str, value: &str) -> bool {
        let Some(key) = self.mutable_key(key) else {
            return false;
        };
        if !key.is_multi() {
            tracing::debug!("toggle_multi on single-value facet {} ignored", key);
            return false;
        }
        if value.is_empty() || value.contains(',') {
            tracing::debug!("ignoring malformed value {:?} for {}", value, key);
            return false;
        }
        let mut values = match self.selection.remove(key) {
            Some(FacetValue::Multi(values)) => values,
            Some(FacetValue::Single(s)) => BTreeSet::from([s]),
            None => BTreeSet::new(),
        };
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        // empty sets drop the key
        self.selection.insert(key, FacetValue::Multi(values));
        true
    }

    pub fn clear_facet(&mut self, key: &str) -> bool {
        let Some(key) = self.mutable_key(key) else {
            return false;
        };
        self.selection.remove(key).is_some()
    }

    /// Removes every facet that is neither in `except` nor locked.
    pub fn clear_all(&mut self, except: &BTreeSet<FacetKey>) -> bool {
        let before = self.selection.len();
        let locked = &self.locked;
        self.selection.retain(|key| except.contains(&key) || locked.contains(&key));
        before != self.selection.len()
    }

    pub fn set_search_term(&mut self, term: &str) -> bool {
        if self.search_term == term {
            return false;
        }
        self.search_term = term.to_string();
        true
    }

    /// Sets both price bounds. `None` removes a bound, unparseable or negative
    /// bounds are left as they were, inverted bounds are swapped.
    pub fn set_price_range(&mut self, min: Option<&str>, max: Option<&str>) -> bool {
        let current = |key| self.selection.serialized(key);
        let resolve = |key: FacetKey, bound: Option<&str>| -> Option<String> {
            match bound {
                None => None,
                Some(raw) => match parse_price(raw) {
                    Some(_) => Some(raw.trim().to_string()),
                    None => {
                        tracing::debug!("ignoring invalid price bound {:?} for {}", raw, key);
                        current(key)
                    }
                },
            }
        };
        let mut min = resolve(FacetKey::MinPrice, min);
        let mut max = resolve(FacetKey::MaxPrice, max);
        let inverted = matches!((&min, &max), (Some(lo), Some(hi)) if parse_price(lo) > parse_price(hi));
        if inverted {
            std::mem::swap(&mut min, &mut max);
        }

        let mut changed = false;
        for (key, bound) in [(FacetKey::MinPrice, min), (FacetKey::MaxPrice, max)] {
            if self.is_locked(key) || self.selection.serialized(key) == bound {
                continue;
            }
            match bound {
                Some(value) => self.selection.insert(key, FacetValue::Single(value)),
                None => {
                    self.selection.remove(key);
                }
            }
            changed = true;
        }
        changed
    }

    /// Replaces everything except locked facets, which keep their pinned values.
    /// Incoming values go through the same checks as the single mutators.
    pub fn replace(&mut self, selection: FilterSelection, search_term: &str) -> bool {
        let mut next = FilterSelection::new();
        for (key, value) in selection.iter() {
            if self.is_locked(key) {
                continue;
            }
            match sanitize_value(key, value.clone()) {
                Some(value) => next.insert(key, value),
                None => tracing::debug!("dropping malformed value for {}", key),
            }
        }
        for key in self.locked.iter() {
            if let Some(value) = self.selection.get(*key) {
                next.insert(*key, value.clone());
            }
        }
        let changed = next != self.selection || self.search_term != search_term;
        self.selection = next;
        self.search_term = search_term.to_string();
        changed
    }
}

/// Normalizes a value to the key's cardinality. Empty elements and elements
/// containing `,` are dropped from multi values; a multi value on a
/// single-value key survives only if exactly one element is left. `None` when
/// nothing valid remains.
pub fn sanitize_value(key: FacetKey, value: FacetValue) -> Option<FacetValue> {
    let valid_element = |v: &String| !v.is_empty() && !v.contains(',');
    let value = match (key.is_multi(), value) {
        (true, FacetValue::Multi(values)) => FacetValue::Multi(values.into_iter().filter(valid_element).collect()),
        (true, FacetValue::Single(s)) => FacetValue::Multi(Some(s).into_iter().filter(valid_element).collect()),
        (false, FacetValue::Single(s)) => FacetValue::Single(s),
        (false, FacetValue::Multi(values)) => {
            let mut values = values.into_iter().filter(valid_element);
            match (values.next(), values.next()) {
                (Some(only), None) => FacetValue::Single(only),
                _ => return None,
            }
        }
    };
    if value.is_empty() {
        return None;
    }
    if matches!(key, FacetKey::MinPrice | FacetKey::MaxPrice) && parse_price(&value.serialized()).is_none() {
        return None;
    }
    Some(value)
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite() && *p >= 0.0)
}
