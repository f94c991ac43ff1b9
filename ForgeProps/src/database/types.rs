//! Type definitions for resolved objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category name → (attribute name → formatted value)
pub type PropertyMap = BTreeMap<String, BTreeMap<String, String>>;

/// The effective properties of one object after inheritance is applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectProperties {
    /// Object id (position in the offsets table)
    #[serde(rename = "ObjectID")]
    pub object_id: usize,
    /// Display name; the object's own name wins over inherited ones
    #[serde(rename = "Name")]
    pub name: String,
    /// External identifier from the id table
    #[serde(rename = "ExternalID")]
    pub external_id: String,
    /// Displayable properties grouped by category
    #[serde(rename = "Properties")]
    pub properties: PropertyMap,
    /// Parent ids in the order the walk met them
    #[serde(rename = "Parents")]
    pub parents: Vec<i64>,
}

impl ObjectProperties {
    pub fn new(object_id: usize, external_id: impl Into<String>) -> Self {
        Self {
            object_id,
            name: String::new(),
            external_id: external_id.into(),
            properties: PropertyMap::new(),
            parents: Vec::new(),
        }
    }

    /// Set the name unless one is already present.
    pub fn set_name_if_unset(&mut self, name: &str) {
        if self.name.is_empty() {
            self.name = name.to_string();
        }
    }

    /// Store a property, replacing any earlier value for the same key.
    pub fn insert_property(&mut self, category: &str, name: &str, value: String) {
        self.properties
            .entry(category.to_string())
            .or_default()
            .insert(name.to_string(), value);
    }

    /// Look up a formatted property value.
    #[must_use]
    pub fn get(&self, category: &str, name: &str) -> Option<&str> {
        self.properties
            .get(category)
            .and_then(|props| props.get(name))
            .map(String::as_str)
    }
}

/// Size of the loaded tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub attribute_count: usize,
    /// Highest object id
    pub object_count: usize,
    pub pair_count: usize,
    pub value_count: usize,
    pub external_id_count: usize,
}
