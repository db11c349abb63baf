//! Generic element and element-type representations.
//!
//! These are the uniform shapes the metadata-store contract trades in. An
//! [`Element`] carries no knowledge of the typed object it was projected
//! from; attribute values are opaque JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A named, identified category of storable element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ElementType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The contract's uniform representation of a stored object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub name: String,
    /// Opaque payload; the codec for the element's type gives it meaning.
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl Element {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Attribute value by key, if present and not JSON `null`.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    /// Attribute as a string, if present and string-typed.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attribute(key).and_then(Value::as_str)
    }
}
