//! Translation between typed shared objects and generic elements.

use crate::config::StoreDefaults;
use crate::connection::ConnectionDef;
use crate::error::{MetaStoreError, Result};
use crate::metastore::{Element, ElementType};
use crate::registry::SharedObject;
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute keys used by the connection codec.
pub mod attr {
    pub const DRIVER: &str = "driver";
    pub const HOST: &str = "host";
    pub const PORT: &str = "port";
    pub const DATABASE: &str = "database";
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const OPTIONS: &str = "options";
}

/// Converts one kind of shared object to and from the generic element
/// representation.
///
/// Each codec also describes the element type it serves and recognizes the
/// objects it can encode, so a store can hold a table of codecs and route
/// by type id.
pub trait ElementCodec: Send + Sync {
    /// The element-type descriptor for this codec's object kind.
    fn element_type(&self) -> Result<ElementType>;

    /// True if this codec can encode `object`.
    fn handles(&self, object: &SharedObject) -> bool;

    /// Project a typed object into a generic element.
    fn encode(&self, object: &SharedObject) -> Result<Element>;

    /// Rebuild a typed object from a generic element.
    fn decode(&self, element: &Element) -> Result<SharedObject>;
}

/// Codec for [`ConnectionDef`] shared objects.
///
/// Element id and name are both the connection name; connection fields map
/// to flat attributes. `decode(encode(x))` reproduces `x`.
#[derive(Debug, Default)]
pub struct ConnectionCodec;

impl ConnectionCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ElementCodec for ConnectionCodec {
    fn element_type(&self) -> Result<ElementType> {
        Ok(
            ElementType::new(
                StoreDefaults::CONNECTION_TYPE_ID,
                StoreDefaults::CONNECTION_TYPE_NAME,
            )
            .with_description(StoreDefaults::CONNECTION_TYPE_DESCRIPTION),
        )
    }

    fn handles(&self, object: &SharedObject) -> bool {
        matches!(object, SharedObject::Connection(_))
    }

    fn encode(&self, object: &SharedObject) -> Result<Element> {
        let SharedObject::Connection(conn) = object;

        let mut element = Element::new(&conn.name, &conn.name)
            .with_attribute(attr::DRIVER, conn.driver.as_str());
        if let Some(ref host) = conn.host {
            element = element.with_attribute(attr::HOST, host.as_str());
        }
        if let Some(port) = conn.port {
            element = element.with_attribute(attr::PORT, port);
        }
        if let Some(ref database) = conn.database {
            element = element.with_attribute(attr::DATABASE, database.as_str());
        }
        if let Some(ref username) = conn.username {
            element = element.with_attribute(attr::USERNAME, username.as_str());
        }
        if let Some(ref password) = conn.password {
            element = element.with_attribute(attr::PASSWORD, password.as_str());
        }
        if !conn.options.is_empty() {
            let options: serde_json::Map<String, Value> = conn
                .options
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            element = element.with_attribute(attr::OPTIONS, Value::Object(options));
        }

        Ok(element)
    }

    fn decode(&self, element: &Element) -> Result<SharedObject> {
        let name = if !element.name.is_empty() {
            element.name.clone()
        } else if !element.id.is_empty() {
            element.id.clone()
        } else {
            return Err(MetaStoreError::translation(
                "connection element has neither a name nor an id",
            ));
        };

        let mut conn = ConnectionDef {
            name,
            driver: string_attr(element, attr::DRIVER)?.unwrap_or_default(),
            host: string_attr(element, attr::HOST)?,
            database: string_attr(element, attr::DATABASE)?,
            username: string_attr(element, attr::USERNAME)?,
            password: string_attr(element, attr::PASSWORD)?,
            port: None,
            options: BTreeMap::new(),
        };

        if let Some(value) = element.attribute(attr::PORT) {
            let port = value
                .as_u64()
                .and_then(|p| u16::try_from(p).ok())
                .ok_or_else(|| {
                    MetaStoreError::translation(format!(
                        "connection '{}' has an invalid port attribute: {}",
                        conn.name, value
                    ))
                })?;
            conn.port = Some(port);
        }

        if let Some(value) = element.attribute(attr::OPTIONS) {
            let map = value.as_object().ok_or_else(|| {
                MetaStoreError::translation(format!(
                    "connection '{}' has a non-object options attribute",
                    conn.name
                ))
            })?;
            for (key, option) in map {
                let option = option.as_str().ok_or_else(|| {
                    MetaStoreError::translation(format!(
                        "connection '{}' option '{}' is not a string",
                        conn.name, key
                    ))
                })?;
                conn.options.insert(key.clone(), option.to_string());
            }
        }

        Ok(SharedObject::Connection(conn))
    }
}

/// String attribute by key; a present but non-string value is a translation
/// error.
fn string_attr(element: &Element, key: &str) -> Result<Option<String>> {
    match element.attribute(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(MetaStoreError::translation(format!(
            "attribute '{}' must be a string, got: {}",
            key, other
        ))),
    }
}
