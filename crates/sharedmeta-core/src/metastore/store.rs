//! The generic metadata-store contract.

use crate::error::Result;
use crate::metastore::{Element, ElementType};

/// A namespace / element-type / element metadata store.
///
/// Implementations range from a fully mutable in-memory store
/// ([`MemoryMetaStore`](crate::metastore::MemoryMetaStore)) to restricted
/// facades over other storage
/// ([`SharedObjectsStore`](crate::store::SharedObjectsStore)). Lookups that
/// find nothing return `Ok(None)` or an empty list; only real requirement
/// violations are errors.
pub trait MetaStore {
    // Namespaces

    fn list_namespaces(&self) -> Result<Vec<String>>;

    fn namespace_exists(&self, namespace: &str) -> Result<bool>;

    fn create_namespace(&self, namespace: &str) -> Result<()>;

    fn delete_namespace(&self, namespace: &str) -> Result<()>;

    // Element types

    fn list_element_types(&self, namespace: &str) -> Result<Vec<ElementType>>;

    fn list_element_type_ids(&self, namespace: &str) -> Result<Vec<String>>;

    fn get_element_type(&self, namespace: &str, type_id: &str) -> Result<Option<ElementType>>;

    /// Lookup by display name, case-insensitively.
    fn get_element_type_by_name(&self, namespace: &str, name: &str)
        -> Result<Option<ElementType>>;

    fn create_element_type(&self, namespace: &str, element_type: &ElementType) -> Result<()>;

    fn update_element_type(&self, namespace: &str, element_type: &ElementType) -> Result<()>;

    fn delete_element_type(&self, namespace: &str, type_id: &str) -> Result<()>;

    // Elements

    fn list_elements(&self, namespace: &str, type_id: &str) -> Result<Vec<Element>>;

    fn list_element_ids(&self, namespace: &str, type_id: &str) -> Result<Vec<String>>;

    fn get_element(
        &self,
        namespace: &str,
        type_id: &str,
        element_id: &str,
    ) -> Result<Option<Element>>;

    /// Lookup by element name, case-insensitively.
    fn get_element_by_name(
        &self,
        namespace: &str,
        element_type: &ElementType,
        name: &str,
    ) -> Result<Option<Element>>;

    /// Store a new element. Fails with
    /// [`DuplicateElement`](crate::error::MetaStoreError::DuplicateElement)
    /// if an element with the same id already exists under `type_id`, before
    /// any mutation takes place.
    fn create_element(&self, namespace: &str, type_id: &str, element: &Element) -> Result<()>;

    /// Replace an existing element. Fails with
    /// [`ElementNotFound`](crate::error::MetaStoreError::ElementNotFound) if
    /// no element with `element_id` exists under `type_id`.
    fn update_element(
        &self,
        namespace: &str,
        type_id: &str,
        element_id: &str,
        element: &Element,
    ) -> Result<()>;

    /// Delete an element. Deleting an id that does not exist is a silent
    /// no-op, not an error; callers that need to distinguish must check with
    /// [`get_element`](MetaStore::get_element) first.
    fn delete_element(&self, namespace: &str, type_id: &str, element_id: &str) -> Result<()>;
}
