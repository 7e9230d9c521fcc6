use std::collections::BTreeMap;

use serde_derive::{Deserialize, Serialize};

/// A partial specification of assets: `{type: {component: [names...]}}`.
///
/// Empty or missing levels mean "all" when a selection scopes a rebuild
/// pass. In the persisted tracking file an empty name list instead records
/// that the user deselected everything for that component.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Selection {
    groups: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl Selection {
    /// Build a selection from CLI-style scope flags. A missing asset type
    /// yields the empty selection, which scopes to everything.
    pub fn from_scope(
        asset_type: Option<&str>,
        component: Option<&str>,
        names: &[String],
    ) -> Selection {
        let mut groups = BTreeMap::new();
        if let Some(asset_type) = asset_type {
            let mut components = BTreeMap::new();
            if let Some(component) = component {
                components.insert(component.to_string(), names.to_vec());
            }
            groups.insert(asset_type.to_string(), components);
        }
        Selection { groups }
    }

    pub fn insert(&mut self, asset_type: &str, component: &str, names: Vec<String>) {
        self.groups
            .entry(asset_type.to_string())
            .or_default()
            .insert(component.to_string(), names);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn includes_type(&self, asset_type: &str) -> bool {
        self.groups.is_empty() || self.groups.contains_key(asset_type)
    }

    pub fn includes_component(&self, asset_type: &str, component: &str) -> bool {
        if self.groups.is_empty() {
            return true;
        }
        match self.groups.get(asset_type) {
            Some(components) => components.is_empty() || components.contains_key(component),
            None => false,
        }
    }

    /// The explicit name list for a (type, component) pair, if one was
    /// given. `None` or an empty list both mean "all names" to a rebuild.
    pub fn names(&self, asset_type: &str, component: &str) -> Option<&Vec<String>> {
        self.groups.get(asset_type)?.get(component)
    }

    /// Reconcile a freshly submitted selection for one component into this
    /// persisted selection.
    ///
    /// Types and components present in `new` are added or replaced
    /// wholesale (the caller always submits its full current selection for
    /// the component, so last write wins). Any persisted entry for
    /// `selected_component` that does not appear in `new` at all is cleared
    /// to an empty list, recording an explicit deselect-everything. Entries
    /// belonging to other components are never touched, even when absent
    /// from `new`.
    pub fn merge_component(&mut self, selected_component: &str, new: &Selection) {
        for (asset_type, components) in &new.groups {
            match self.groups.get_mut(asset_type) {
                None => {
                    self.groups.insert(asset_type.clone(), components.clone());
                }
                Some(existing) => {
                    for (component, names) in components {
                        existing.insert(component.clone(), names.clone());
                    }
                }
            }
        }

        for (asset_type, components) in &mut self.groups {
            if let Some(names) = components.get_mut(selected_component) {
                let still_selected = new
                    .groups
                    .get(asset_type)
                    .is_some_and(|c| c.contains_key(selected_component));
                if !still_selected {
                    names.clear();
                }
            }
        }
    }
}
