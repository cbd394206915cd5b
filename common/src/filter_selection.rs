//! The current filter selection: facet key to selected value(s).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::facet_key::FacetKey;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetValue {
    Single(String),
    Multi(BTreeSet<String>),
}

impl FacetValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FacetValue::Single(s) => s.is_empty(),
            FacetValue::Multi(values) => values.is_empty(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            FacetValue::Single(s) => s == value,
            FacetValue::Multi(values) => values.contains(value),
        }
    }

    /// Multi values are joined in sorted order so equal sets serialize equally.
    pub fn serialized(&self) -> String {
        match self {
            FacetValue::Single(s) => s.clone(),
            FacetValue::Multi(values) => values.iter().map(String::as_str).collect::<Vec<_>>().join(","),
        }
    }
}

/// Keys present always carry a non-empty value; `insert` drops empty ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FilterSelection {
    values: BTreeMap<FacetKey, FacetValue>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FacetKey) -> Option<&FacetValue> {
        self.values.get(&key)
    }

    pub fn contains_key(&self, key: FacetKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn has_selection(&self, key: FacetKey) -> bool {
        self.contains_key(key)
    }

    pub fn is_selected(&self, key: FacetKey, value: &str) -> bool {
        self.values.get(&key).map(|v| v.contains(value)).unwrap_or(false)
    }

    pub fn selected_values(&self, key: FacetKey) -> BTreeSet<&str> {
        match self.values.get(&key) {
            None => BTreeSet::new(),
            Some(FacetValue::Single(s)) => BTreeSet::from([s.as_str()]),
            Some(FacetValue::Multi(values)) => values.iter().map(String::as_str).collect(),
        }
    }

    pub fn serialized(&self, key: FacetKey) -> Option<String> {
        self.values.get(&key).map(FacetValue::serialized)
    }

    /// Inserting an empty value removes the key instead.
    pub fn insert(&mut self, key: FacetKey, value: FacetValue) {
        if value.is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    pub fn remove(&mut self, key: FacetKey) -> Option<FacetValue> {
        self.values.remove(&key)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(FacetKey) -> bool) {
        self.values.retain(|key, _| keep(*key));
    }

    pub fn iter(&self) -> impl Iterator<Item = (FacetKey, &FacetValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = FacetKey> + '_ {
        self.values.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}
