//! Persisted display preferences (original vs background-removed images).

use std::{collections::BTreeMap, path::PathBuf};

use common::search_const::SHOW_ORIGINAL_IMAGE_KEY;


pub trait PreferenceStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A flat JSON object on disk. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
}

impl JsonFilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> anyhow::Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = std::fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

/// Unreadable or unset preferences mean "show the background-removed image".
pub fn show_original_image(store: &impl PreferenceStore) -> bool {
    match store.get(SHOW_ORIGINAL_IMAGE_KEY) {
        Ok(value) => value.map(|v| v.trim() == "true").unwrap_or(false),
        Err(e) => {
            tracing::warn!("failed to read image preference: {:#}", e);
            false
        }
    }
}

pub fn set_show_original_image(store: &mut impl PreferenceStore, show_original: bool) -> anyhow::Result<()> {
    store.set(SHOW_ORIGINAL_IMAGE_KEY, if show_original { "true" } else { "false" })
}

/// Flips the preference and returns the new value.
pub fn toggle_show_original_image(store: &mut impl PreferenceStore) -> anyhow::Result<bool> {
    let next = !show_original_image(&*store);
    set_show_original_image(store, next)?;
    Ok(next)
}
