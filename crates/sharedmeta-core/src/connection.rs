//! Database connection definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A shared database connection definition.
///
/// Identity is the `name`; two definitions refer to the same connection when
/// their names match. Everything else is configuration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ConnectionDef {
    pub name: String,
    /// Driver identifier, e.g. "postgresql" or "mysql".
    #[serde(default)]
    pub driver: String,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Driver-specific options passed through verbatim.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl ConnectionDef {
    /// Create a definition with just identity and driver set.
    pub fn new(name: impl Into<String>, driver: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver: driver.into(),
            ..Default::default()
        }
    }

    /// Case-insensitive name comparison, the lookup rule used throughout the
    /// store.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
