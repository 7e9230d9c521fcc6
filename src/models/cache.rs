use std::collections::BTreeMap;
use std::fmt;

use serde_derive::{Deserialize, Serialize};

use crate::models::AssetEntry;

/// Identity of one cache leaf: (asset type, component, asset name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    pub asset_type: String,
    pub component: String,
    pub name: String,
}

impl AssetKey {
    pub fn new(asset_type: &str, component: &str, name: &str) -> AssetKey {
        AssetKey {
            asset_type: asset_type.to_string(),
            component: component.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.asset_type, self.component, self.name)
    }
}

/// A lookup miss, carrying the deepest level that was found. Never conflated
/// with transport errors: a missing cache entry is an answer, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookupError {
    TypeNotFound(String),
    ComponentNotFound(String, String),
    AssetNotFound(String, String, String),
}

impl fmt::Display for CacheLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheLookupError::TypeNotFound(asset_type) => {
                write!(f, "Asset type \"{}\" not found in cache", asset_type)
            }
            CacheLookupError::ComponentNotFound(asset_type, component) => write!(
                f,
                "Component \"{}\" not found under asset type \"{}\"",
                component, asset_type
            ),
            CacheLookupError::AssetNotFound(asset_type, component, name) => write!(
                f,
                "Asset \"{}\" not found under \"{}/{}\"",
                name, asset_type, component
            ),
        }
    }
}

impl std::error::Error for CacheLookupError {}

/// Three-level asset metadata cache: type -> component -> name -> entry.
///
/// Serializes as the bare nested JSON object, matching the on-disk cache
/// file shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct AssetCache {
    entries: BTreeMap<String, BTreeMap<String, BTreeMap<String, AssetEntry>>>,
}

impl AssetCache {
    pub fn insert(&mut self, key: &AssetKey, entry: AssetEntry) {
        self.entries
            .entry(key.asset_type.clone())
            .or_default()
            .entry(key.component.clone())
            .or_default()
            .insert(key.name.clone(), entry);
    }

    pub fn get(
        &self,
        asset_type: &str,
        component: &str,
        name: &str,
    ) -> Result<&AssetEntry, CacheLookupError> {
        let components = self
            .entries
            .get(asset_type)
            .ok_or_else(|| CacheLookupError::TypeNotFound(asset_type.to_string()))?;
        let names = components.get(component).ok_or_else(|| {
            CacheLookupError::ComponentNotFound(asset_type.to_string(), component.to_string())
        })?;
        names.get(name).ok_or_else(|| {
            CacheLookupError::AssetNotFound(
                asset_type.to_string(),
                component.to_string(),
                name.to_string(),
            )
        })
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&String, &BTreeMap<String, BTreeMap<String, AssetEntry>>)> {
        self.entries.iter()
    }

    pub fn entry_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(|components| components.values())
            .map(|names| names.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}
