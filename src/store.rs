//! The persisted metadata store: one JSON object keyed by filename.
//!
//! Keys are kept in a [`BTreeMap`] so every write is sorted, which keeps the
//! committed file diff-friendly. The store is read once, changed in memory and
//! written once; there is no locking, so only one writer may run at a time.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use crate::models::MetadataRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataStore {
    pub records: BTreeMap<String, MetadataRecord>,
}

impl MetadataStore {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, filename: &str) -> Option<&MetadataRecord> {
        self.records.get(filename)
    }

    pub fn get_mut(&mut self, filename: &str) -> Option<&mut MetadataRecord> {
        self.records.get_mut(filename)
    }

    pub fn insert(&mut self, filename: String, record: MetadataRecord) {
        self.records.insert(filename, record);
    }

    pub fn remove(&mut self, filename: &str) -> Option<MetadataRecord> {
        self.records.remove(filename)
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.records.contains_key(filename)
    }

    /// Parse a store document.
    pub fn from_json(text: &str) -> Result<Self> {
        let records: BTreeMap<String, MetadataRecord> =
            serde_json::from_str(text).context("Store is not a JSON object of records")?;
        Ok(Self { records })
    }

    /// Pretty-printed (2-space), key-sorted JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}

/// Load the store, failing on a missing or unreadable file.
pub fn load(path: &Path) -> Result<MetadataStore> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read metadata store: {}", path.display()))?;
    MetadataStore::from_json(&text)
        .with_context(|| format!("Failed to parse metadata store: {}", path.display()))
}

/// Overwrite the store file with the full sorted document.
pub fn save(path: &Path, store: &MetadataStore) -> Result<()> {
    let json = store.to_json()?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write metadata store: {}", path.display()))?;
    Ok(())
}
