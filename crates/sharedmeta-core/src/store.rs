//! Metadata-store facade over the shared-object registry.
//!
//! [`SharedObjectsStore`] lets callers that only know the [`MetaStore`]
//! contract read and write the typed objects owned by a
//! [`SharedObjectRegistry`]. Reads project registry contents into generic
//! elements on every call; writes decode the element, mutate the registry
//! and persist it. The namespace and the element-type catalog are fixed:
//! attempts to change either are rejected.

use crate::codec::{ConnectionCodec, ElementCodec};
use crate::config::StoreDefaults;
use crate::error::{MetaStoreError, Result};
use crate::metastore::{Element, ElementType, MetaStore};
use crate::registry::SharedObjectRegistry;
use std::sync::Arc;
use tracing::debug;

/// One supported object kind: its cached descriptor plus the codec that
/// translates it.
struct TypeHandler {
    element_type: ElementType,
    codec: Arc<dyn ElementCodec>,
}

/// [`MetaStore`] implementation backed by a [`SharedObjectRegistry`].
pub struct SharedObjectsStore {
    registry: Arc<SharedObjectRegistry>,
    /// Registration table, built once at construction. Currently a single
    /// entry for database connections.
    handlers: Vec<TypeHandler>,
}

impl SharedObjectsStore {
    /// Create a store over `registry`.
    ///
    /// Populates the element-type table from each codec; a codec that cannot
    /// describe its type fails construction with an
    /// [`Initialization`](MetaStoreError::Initialization) error.
    pub fn new(registry: Arc<SharedObjectRegistry>) -> Result<Self> {
        let codecs: Vec<Arc<dyn ElementCodec>> = vec![Arc::new(ConnectionCodec::new())];

        let mut handlers = Vec::with_capacity(codecs.len());
        for codec in codecs {
            let element_type =
                codec
                    .element_type()
                    .map_err(|e| MetaStoreError::Initialization {
                        message: format!("failed to populate element type: {}", e),
                    })?;
            handlers.push(TypeHandler {
                element_type,
                codec,
            });
        }

        Ok(Self { registry, handlers })
    }

    /// The registry this store reads from and writes to.
    pub fn registry(&self) -> &Arc<SharedObjectRegistry> {
        &self.registry
    }

    fn handler_for(&self, type_id: &str) -> Option<&TypeHandler> {
        self.handlers.iter().find(|h| h.element_type.id == type_id)
    }
}

impl MetaStore for SharedObjectsStore {
    fn list_namespaces(&self) -> Result<Vec<String>> {
        Ok(vec![StoreDefaults::NAMESPACE.to_string()])
    }

    fn namespace_exists(&self, namespace: &str) -> Result<bool> {
        Ok(namespace == StoreDefaults::NAMESPACE)
    }

    fn create_namespace(&self, _namespace: &str) -> Result<()> {
        Err(MetaStoreError::unsupported(
            "the shared objects store doesn't support creating namespaces",
        ))
    }

    fn delete_namespace(&self, _namespace: &str) -> Result<()> {
        Err(MetaStoreError::unsupported(
            "the shared objects store doesn't support deleting namespaces",
        ))
    }

    fn list_element_types(&self, _namespace: &str) -> Result<Vec<ElementType>> {
        Ok(self
            .handlers
            .iter()
            .map(|h| h.element_type.clone())
            .collect())
    }

    fn list_element_type_ids(&self, _namespace: &str) -> Result<Vec<String>> {
        Ok(self
            .handlers
            .iter()
            .map(|h| h.element_type.id.clone())
            .collect())
    }

    fn get_element_type(&self, _namespace: &str, type_id: &str) -> Result<Option<ElementType>> {
        Ok(self.handler_for(type_id).map(|h| h.element_type.clone()))
    }

    fn get_element_type_by_name(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ElementType>> {
        Ok(self
            .list_element_types(namespace)?
            .into_iter()
            .find(|ty| ty.name.eq_ignore_ascii_case(name)))
    }

    fn create_element_type(&self, _namespace: &str, _element_type: &ElementType) -> Result<()> {
        Err(MetaStoreError::unsupported(
            "the shared objects store doesn't support creating new element types",
        ))
    }

    fn update_element_type(&self, _namespace: &str, _element_type: &ElementType) -> Result<()> {
        Err(MetaStoreError::unsupported(
            "the shared objects store doesn't support updating element types",
        ))
    }

    fn delete_element_type(&self, _namespace: &str, _type_id: &str) -> Result<()> {
        Err(MetaStoreError::unsupported(
            "the shared objects store doesn't support deleting element types",
        ))
    }

    fn list_elements(&self, _namespace: &str, type_id: &str) -> Result<Vec<Element>> {
        let Some(handler) = self.handler_for(type_id) else {
            return Ok(Vec::new());
        };

        let mut elements = Vec::new();
        for object in self.registry.values()? {
            if handler.codec.handles(&object) {
                elements.push(handler.codec.encode(&object)?);
            }
        }
        Ok(elements)
    }

    fn list_element_ids(&self, namespace: &str, type_id: &str) -> Result<Vec<String>> {
        Ok(self
            .list_elements(namespace, type_id)?
            .into_iter()
            .map(|e| e.id)
            .collect())
    }

    fn get_element(
        &self,
        namespace: &str,
        type_id: &str,
        element_id: &str,
    ) -> Result<Option<Element>> {
        Ok(self
            .list_elements(namespace, type_id)?
            .into_iter()
            .find(|e| e.id == element_id))
    }

    fn get_element_by_name(
        &self,
        namespace: &str,
        element_type: &ElementType,
        name: &str,
    ) -> Result<Option<Element>> {
        Ok(self
            .list_elements(namespace, &element_type.id)?
            .into_iter()
            .find(|e| e.name.eq_ignore_ascii_case(name)))
    }

    fn create_element(&self, namespace: &str, type_id: &str, element: &Element) -> Result<()> {
        // Duplicate check happens before any mutation
        if self.get_element(namespace, type_id, &element.id)?.is_some() {
            return Err(MetaStoreError::DuplicateElement {
                type_id: type_id.to_string(),
                element_id: element.id.clone(),
            });
        }

        let Some(handler) = self.handler_for(type_id) else {
            return Err(MetaStoreError::unsupported(format!(
                "storing elements with element type id '{}' is not supported in the shared objects store",
                type_id
            )));
        };

        let object = handler.codec.decode(element)?;
        debug!("Creating element '{}' of type '{}'", element.id, type_id);
        self.registry.store_object(object)?;
        self.registry.save()
    }

    fn update_element(
        &self,
        namespace: &str,
        type_id: &str,
        element_id: &str,
        element: &Element,
    ) -> Result<()> {
        let Some(handler) = self.handler_for(type_id) else {
            return Err(MetaStoreError::unsupported(format!(
                "updating elements with element type id '{}' is not supported in the shared objects store",
                type_id
            )));
        };

        let existing = self.get_element(namespace, type_id, element_id)?.ok_or_else(|| {
            MetaStoreError::ElementNotFound {
                type_id: type_id.to_string(),
                element_id: element_id.to_string(),
            }
        })?;

        // A rename replaces the old object rather than leaving both behind.
        if existing.id != element.id {
            let old = handler.codec.decode(&existing)?;
            self.registry.remove_object(&old)?;
        }

        let object = handler.codec.decode(element)?;
        debug!("Updating element '{}' of type '{}'", element_id, type_id);
        self.registry.store_object(object)?;
        self.registry.save()
    }

    fn delete_element(&self, namespace: &str, type_id: &str, element_id: &str) -> Result<()> {
        // Unknown type ids and missing ids are tolerated: delete is
        // idempotent (see the trait contract).
        let Some(handler) = self.handler_for(type_id) else {
            return Ok(());
        };

        let Some(element) = self.get_element(namespace, type_id, element_id)? else {
            return Ok(());
        };

        let object = handler.codec.decode(&element)?;
        debug!("Deleting element '{}' of type '{}'", element_id, type_id);
        self.registry.remove_object(&object)?;
        self.registry.save()
    }
}
