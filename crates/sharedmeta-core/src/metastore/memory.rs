//! Plain in-memory metadata store.
//!
//! The fully mutable reference implementation of [`MetaStore`]: namespaces,
//! element types and elements all live in maps behind a single lock. Nothing
//! is persisted.

use crate::error::{MetaStoreError, Result};
use crate::metastore::{Element, ElementType, MetaStore};
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct NamespaceData {
    /// Element types by id.
    types: BTreeMap<String, ElementType>,
    /// Elements by type id, then element id.
    elements: BTreeMap<String, BTreeMap<String, Element>>,
}

/// In-memory [`MetaStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryMetaStore {
    namespaces: RwLock<BTreeMap<String, NamespaceData>>,
}

impl MemoryMetaStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<String, NamespaceData>>> {
        self.namespaces
            .read()
            .map_err(|_| MetaStoreError::Other("Failed to acquire store read lock".to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<String, NamespaceData>>> {
        self.namespaces
            .write()
            .map_err(|_| MetaStoreError::Other("Failed to acquire store write lock".to_string()))
    }
}

impl MetaStore for MemoryMetaStore {
    fn list_namespaces(&self) -> Result<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    fn namespace_exists(&self, namespace: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(namespace))
    }

    fn create_namespace(&self, namespace: &str) -> Result<()> {
        let mut namespaces = self.write()?;
        if namespaces.contains_key(namespace) {
            return Err(MetaStoreError::NamespaceExists {
                namespace: namespace.to_string(),
            });
        }
        namespaces.insert(namespace.to_string(), NamespaceData::default());
        Ok(())
    }

    fn delete_namespace(&self, namespace: &str) -> Result<()> {
        let mut namespaces = self.write()?;
        let data = namespaces
            .get(namespace)
            .ok_or_else(|| MetaStoreError::NamespaceNotFound {
                namespace: namespace.to_string(),
            })?;
        if !data.types.is_empty() {
            return Err(MetaStoreError::DependenciesExist {
                message: format!(
                    "namespace '{}' still contains {} element type(s)",
                    namespace,
                    data.types.len()
                ),
            });
        }
        namespaces.remove(namespace);
        Ok(())
    }

    fn list_element_types(&self, namespace: &str) -> Result<Vec<ElementType>> {
        Ok(self
            .read()?
            .get(namespace)
            .map(|data| data.types.values().cloned().collect())
            .unwrap_or_default())
    }

    fn list_element_type_ids(&self, namespace: &str) -> Result<Vec<String>> {
        Ok(self
            .read()?
            .get(namespace)
            .map(|data| data.types.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn get_element_type(&self, namespace: &str, type_id: &str) -> Result<Option<ElementType>> {
        Ok(self
            .read()?
            .get(namespace)
            .and_then(|data| data.types.get(type_id).cloned()))
    }

    fn get_element_type_by_name(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<ElementType>> {
        Ok(self.read()?.get(namespace).and_then(|data| {
            data.types
                .values()
                .find(|ty| ty.name.eq_ignore_ascii_case(name))
                .cloned()
        }))
    }

    fn create_element_type(&self, namespace: &str, element_type: &ElementType) -> Result<()> {
        let mut namespaces = self.write()?;
        let data = namespaces
            .get_mut(namespace)
            .ok_or_else(|| MetaStoreError::NamespaceNotFound {
                namespace: namespace.to_string(),
            })?;
        if data.types.contains_key(&element_type.id) {
            return Err(MetaStoreError::ElementTypeExists {
                type_id: element_type.id.clone(),
            });
        }
        data.types
            .insert(element_type.id.clone(), element_type.clone());
        Ok(())
    }

    fn update_element_type(&self, namespace: &str, element_type: &ElementType) -> Result<()> {
        let mut namespaces = self.write()?;
        let data = namespaces
            .get_mut(namespace)
            .ok_or_else(|| MetaStoreError::NamespaceNotFound {
                namespace: namespace.to_string(),
            })?;
        if !data.types.contains_key(&element_type.id) {
            return Err(MetaStoreError::ElementTypeNotFound {
                type_id: element_type.id.clone(),
            });
        }
        data.types
            .insert(element_type.id.clone(), element_type.clone());
        Ok(())
    }

    fn delete_element_type(&self, namespace: &str, type_id: &str) -> Result<()> {
        let mut namespaces = self.write()?;
        let data = namespaces
            .get_mut(namespace)
            .ok_or_else(|| MetaStoreError::NamespaceNotFound {
                namespace: namespace.to_string(),
            })?;
        if !data.types.contains_key(type_id) {
            return Err(MetaStoreError::ElementTypeNotFound {
                type_id: type_id.to_string(),
            });
        }
        let element_count = data.elements.get(type_id).map(BTreeMap::len).unwrap_or(0);
        if element_count > 0 {
            return Err(MetaStoreError::DependenciesExist {
                message: format!(
                    "element type '{}' still contains {} element(s)",
                    type_id, element_count
                ),
            });
        }
        data.types.remove(type_id);
        data.elements.remove(type_id);
        Ok(())
    }

    fn list_elements(&self, namespace: &str, type_id: &str) -> Result<Vec<Element>> {
        Ok(self
            .read()?
            .get(namespace)
            .and_then(|data| data.elements.get(type_id))
            .map(|elements| elements.values().cloned().collect())
            .unwrap_or_default())
    }

    fn list_element_ids(&self, namespace: &str, type_id: &str) -> Result<Vec<String>> {
        Ok(self
            .read()?
            .get(namespace)
            .and_then(|data| data.elements.get(type_id))
            .map(|elements| elements.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn get_element(
        &self,
        namespace: &str,
        type_id: &str,
        element_id: &str,
    ) -> Result<Option<Element>> {
        Ok(self
            .read()?
            .get(namespace)
            .and_then(|data| data.elements.get(type_id))
            .and_then(|elements| elements.get(element_id).cloned()))
    }

    fn get_element_by_name(
        &self,
        namespace: &str,
        element_type: &ElementType,
        name: &str,
    ) -> Result<Option<Element>> {
        Ok(self
            .read()?
            .get(namespace)
            .and_then(|data| data.elements.get(&element_type.id))
            .and_then(|elements| {
                elements
                    .values()
                    .find(|e| e.name.eq_ignore_ascii_case(name))
                    .cloned()
            }))
    }

    fn create_element(&self, namespace: &str, type_id: &str, element: &Element) -> Result<()> {
        let mut namespaces = self.write()?;
        let data = namespaces
            .get_mut(namespace)
            .ok_or_else(|| MetaStoreError::NamespaceNotFound {
                namespace: namespace.to_string(),
            })?;
        if !data.types.contains_key(type_id) {
            return Err(MetaStoreError::ElementTypeNotFound {
                type_id: type_id.to_string(),
            });
        }
        let elements = data.elements.entry(type_id.to_string()).or_default();
        if elements.contains_key(&element.id) {
            return Err(MetaStoreError::DuplicateElement {
                type_id: type_id.to_string(),
                element_id: element.id.clone(),
            });
        }
        elements.insert(element.id.clone(), element.clone());
        Ok(())
    }

    fn update_element(
        &self,
        namespace: &str,
        type_id: &str,
        element_id: &str,
        element: &Element,
    ) -> Result<()> {
        let mut namespaces = self.write()?;
        let data = namespaces
            .get_mut(namespace)
            .ok_or_else(|| MetaStoreError::NamespaceNotFound {
                namespace: namespace.to_string(),
            })?;
        if !data.types.contains_key(type_id) {
            return Err(MetaStoreError::ElementTypeNotFound {
                type_id: type_id.to_string(),
            });
        }
        let elements = data.elements.entry(type_id.to_string()).or_default();
        if !elements.contains_key(element_id) {
            return Err(MetaStoreError::ElementNotFound {
                type_id: type_id.to_string(),
                element_id: element_id.to_string(),
            });
        }
        elements.remove(element_id);
        elements.insert(element.id.clone(), element.clone());
        Ok(())
    }

    fn delete_element(&self, namespace: &str, type_id: &str, element_id: &str) -> Result<()> {
        let mut namespaces = self.write()?;
        if let Some(elements) = namespaces
            .get_mut(namespace)
            .and_then(|data| data.elements.get_mut(type_id))
        {
            elements.remove(element_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_namespace() -> MemoryMetaStore {
        let store = MemoryMetaStore::new();
        store.create_namespace("default").unwrap();
        store
    }

    #[test]
    fn test_namespace_lifecycle() {
        let store = MemoryMetaStore::new();
        assert!(!store.namespace_exists("default").unwrap());

        store.create_namespace("default").unwrap();
        assert!(store.namespace_exists("default").unwrap());
        assert_eq!(store.list_namespaces().unwrap(), vec!["default"]);

        let err = store.create_namespace("default").unwrap_err();
        assert!(matches!(err, MetaStoreError::NamespaceExists { .. }));

        store.delete_namespace("default").unwrap();
        assert!(!store.namespace_exists("default").unwrap());
    }

    #[test]
    fn test_delete_namespace_with_types_fails() {
        let store = store_with_namespace();
        let ty = ElementType::new("kind", "Kind");
        store.create_element_type("default", &ty).unwrap();

        let err = store.delete_namespace("default").unwrap_err();
        assert!(matches!(err, MetaStoreError::DependenciesExist { .. }));
    }

    #[test]
    fn test_element_type_lifecycle() {
        let store = store_with_namespace();
        let ty = ElementType::new("kind", "Kind");

        store.create_element_type("default", &ty).unwrap();
        assert_eq!(store.list_element_type_ids("default").unwrap(), vec!["kind"]);
        assert!(store
            .get_element_type_by_name("default", "KIND")
            .unwrap()
            .is_some());

        let err = store.create_element_type("default", &ty).unwrap_err();
        assert!(matches!(err, MetaStoreError::ElementTypeExists { .. }));

        let updated = ty.clone().with_description("now with docs");
        store.update_element_type("default", &updated).unwrap();
        assert_eq!(
            store
                .get_element_type("default", "kind")
                .unwrap()
                .unwrap()
                .description
                .as_deref(),
            Some("now with docs")
        );

        store.delete_element_type("default", "kind").unwrap();
        assert!(store.get_element_type("default", "kind").unwrap().is_none());
    }

    #[test]
    fn test_element_crud() {
        let store = store_with_namespace();
        store
            .create_element_type("default", &ElementType::new("kind", "Kind"))
            .unwrap();

        let element = Element::new("a", "A").with_attribute("host", "db.internal");
        store.create_element("default", "kind", &element).unwrap();

        assert_eq!(store.list_element_ids("default", "kind").unwrap(), vec!["a"]);
        let err = store.create_element("default", "kind", &element).unwrap_err();
        assert!(err.is_duplicate());

        let replacement = Element::new("a", "A2");
        store
            .update_element("default", "kind", "a", &replacement)
            .unwrap();
        assert_eq!(
            store.get_element("default", "kind", "a").unwrap().unwrap().name,
            "A2"
        );

        store.delete_element("default", "kind", "a").unwrap();
        assert!(store.get_element("default", "kind", "a").unwrap().is_none());
        // Deleting again is a no-op
        store.delete_element("default", "kind", "a").unwrap();
    }

    #[test]
    fn test_update_missing_element_fails() {
        let store = store_with_namespace();
        store
            .create_element_type("default", &ElementType::new("kind", "Kind"))
            .unwrap();

        let err = store
            .update_element("default", "kind", "ghost", &Element::new("ghost", "G"))
            .unwrap_err();
        assert!(matches!(err, MetaStoreError::ElementNotFound { .. }));
    }

    #[test]
    fn test_delete_type_with_elements_fails() {
        let store = store_with_namespace();
        store
            .create_element_type("default", &ElementType::new("kind", "Kind"))
            .unwrap();
        store
            .create_element("default", "kind", &Element::new("a", "A"))
            .unwrap();

        let err = store.delete_element_type("default", "kind").unwrap_err();
        assert!(matches!(err, MetaStoreError::DependenciesExist { .. }));
    }
}
