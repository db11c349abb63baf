//! Integration tests for the shared-objects store public interface.
//!
//! Exercises the full path: generic elements in, typed objects in the
//! registry, JSON on disk, and back.

use sharedmeta_core::codec::attr;
use sharedmeta_core::{
    ConnectionCodec, ConnectionDef, Element, ElementCodec, MetaStore, MetaStoreError,
    SharedObject, SharedObjectRegistry, SharedObjectsStore, StoreDefaults,
};
use std::sync::Arc;
use tempfile::TempDir;

const NS: &str = StoreDefaults::NAMESPACE;
const TYPE_ID: &str = StoreDefaults::CONNECTION_TYPE_ID;

/// Store over a fresh registry in a temp directory.
fn create_test_store() -> (SharedObjectsStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(StoreDefaults::SHARED_FILE_NAME);
    let registry = Arc::new(SharedObjectRegistry::load(&path).unwrap());
    let store = SharedObjectsStore::new(registry).unwrap();
    (store, temp_dir)
}

fn connection_element(name: &str) -> Element {
    Element::new(name, name)
        .with_attribute(attr::DRIVER, "postgresql")
        .with_attribute(attr::HOST, "db.internal")
        .with_attribute(attr::PORT, 5432)
        .with_attribute(attr::DATABASE, "analytics")
}

#[test]
fn test_namespace_membership_is_exact() {
    let (store, _temp) = create_test_store();

    assert!(store.namespace_exists(NS).unwrap());
    for other in ["", "Default", "DEFAULT", "production", "default "] {
        assert!(!store.namespace_exists(other).unwrap(), "{other:?}");
    }
}

#[test]
fn test_namespace_and_type_mutations_always_unsupported() {
    let (store, _temp) = create_test_store();
    let ty = sharedmeta_core::ElementType::new("anything", "Anything");

    assert!(store.create_namespace("new").unwrap_err().is_unsupported());
    assert!(store.delete_namespace(NS).unwrap_err().is_unsupported());
    assert!(store.create_element_type(NS, &ty).unwrap_err().is_unsupported());
    assert!(store.update_element_type(NS, &ty).unwrap_err().is_unsupported());
    assert!(store
        .delete_element_type(NS, TYPE_ID)
        .unwrap_err()
        .is_unsupported());
}

#[test]
fn test_round_trip_through_registry() {
    let (store, _temp) = create_test_store();

    // Insert a typed object directly into the registry
    let mut conn = ConnectionDef::new("warehouse", "postgresql");
    conn.host = Some("db.internal".to_string());
    conn.port = Some(5432);
    store
        .registry()
        .store_object(SharedObject::Connection(conn.clone()))
        .unwrap();

    // Visible through the generic contract
    let element = store.get_element(NS, TYPE_ID, "warehouse").unwrap().unwrap();
    assert_eq!(element.id, "warehouse");

    // Decoding the projection reproduces the object
    let decoded = ConnectionCodec::new().decode(&element).unwrap();
    assert_eq!(decoded, SharedObject::Connection(conn));
}

#[test]
fn test_reads_are_idempotent() {
    let (store, _temp) = create_test_store();
    for name in ["alpha", "beta", "gamma"] {
        store
            .create_element(NS, TYPE_ID, &connection_element(name))
            .unwrap();
    }

    let first = store.list_elements(NS, TYPE_ID).unwrap();
    let second = store.list_elements(NS, TYPE_ID).unwrap();
    assert_eq!(first.len(), second.len());
    assert_eq!(
        first.iter().map(|e| &e.id).collect::<Vec<_>>(),
        second.iter().map(|e| &e.id).collect::<Vec<_>>()
    );
}

#[test]
fn test_duplicate_create_fails_and_leaves_registry_unchanged() {
    let (store, _temp) = create_test_store();
    store
        .create_element(NS, TYPE_ID, &connection_element("warehouse"))
        .unwrap();

    let changed = connection_element("warehouse").with_attribute(attr::PORT, 9999);
    let err = store.create_element(NS, TYPE_ID, &changed).unwrap_err();

    match err {
        MetaStoreError::DuplicateElement {
            type_id,
            element_id,
        } => {
            assert_eq!(type_id, TYPE_ID);
            assert_eq!(element_id, "warehouse");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // The original object is untouched
    let element = store.get_element(NS, TYPE_ID, "warehouse").unwrap().unwrap();
    assert_eq!(element.attribute(attr::PORT).unwrap().as_u64(), Some(5432));
    assert_eq!(store.registry().len(), 1);
}

#[test]
fn test_create_then_list_includes_id() {
    let (store, _temp) = create_test_store();
    store
        .create_element(NS, TYPE_ID, &connection_element("warehouse"))
        .unwrap();

    let ids = store.list_element_ids(NS, TYPE_ID).unwrap();
    assert!(ids.contains(&"warehouse".to_string()));
}

#[test]
fn test_delete_then_get_is_absent() {
    let (store, _temp) = create_test_store();
    store
        .create_element(NS, TYPE_ID, &connection_element("warehouse"))
        .unwrap();

    store.delete_element(NS, TYPE_ID, "warehouse").unwrap();
    assert!(store.get_element(NS, TYPE_ID, "warehouse").unwrap().is_none());
    assert!(store.registry().is_empty());
}

#[test]
fn test_delete_is_idempotent() {
    let (store, _temp) = create_test_store();

    // Missing id: no-op, not an error
    store.delete_element(NS, TYPE_ID, "never-existed").unwrap();

    // Unknown type id: no-op as well
    store.delete_element(NS, "bogus-type", "whatever").unwrap();
}

#[test]
fn test_unknown_type_id_reads_empty_writes_unsupported() {
    let (store, _temp) = create_test_store();
    store
        .create_element(NS, TYPE_ID, &connection_element("warehouse"))
        .unwrap();

    assert!(store.list_elements(NS, "bogus-type").unwrap().is_empty());
    assert!(store.list_element_ids(NS, "bogus-type").unwrap().is_empty());

    let err = store
        .create_element(NS, "bogus-type", &connection_element("other"))
        .unwrap_err();
    assert!(err.is_unsupported());
}

#[test]
fn test_case_insensitive_name_lookup() {
    let (store, _temp) = create_test_store();
    store
        .create_element(NS, TYPE_ID, &connection_element("MyConn"))
        .unwrap();

    let ty = store.get_element_type(NS, TYPE_ID).unwrap().unwrap();
    let found = store.get_element_by_name(NS, &ty, "myconn").unwrap();
    assert_eq!(found.unwrap().id, "MyConn");

    let missing = store.get_element_by_name(NS, &ty, "otherconn").unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_writes_survive_registry_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(StoreDefaults::SHARED_FILE_NAME);

    {
        let registry = Arc::new(SharedObjectRegistry::load(&path).unwrap());
        let store = SharedObjectsStore::new(registry).unwrap();
        store
            .create_element(NS, TYPE_ID, &connection_element("warehouse"))
            .unwrap();
        store
            .create_element(NS, TYPE_ID, &connection_element("analytics"))
            .unwrap();
        store.delete_element(NS, TYPE_ID, "analytics").unwrap();
    }

    // A fresh registry over the same file sees the surviving object
    let registry = Arc::new(SharedObjectRegistry::load(&path).unwrap());
    let store = SharedObjectsStore::new(registry).unwrap();

    let ids = store.list_element_ids(NS, TYPE_ID).unwrap();
    assert_eq!(ids, vec!["warehouse"]);
}

#[test]
fn test_malformed_element_is_translation_error() {
    let (store, _temp) = create_test_store();
    let element = Element::new("broken", "broken").with_attribute(attr::PORT, "not-a-port");

    let err = store.create_element(NS, TYPE_ID, &element).unwrap_err();
    assert!(matches!(err, MetaStoreError::Translation { .. }));
    assert!(store.registry().is_empty());
}

#[test]
fn test_registry_mutations_visible_without_store_restart() {
    let (store, _temp) = create_test_store();
    assert!(store.list_elements(NS, TYPE_ID).unwrap().is_empty());

    store
        .registry()
        .store_object(SharedObject::Connection(ConnectionDef::new(
            "late-arrival",
            "mysql",
        )))
        .unwrap();

    // No caching: the next read sees the new object
    let ids = store.list_element_ids(NS, TYPE_ID).unwrap();
    assert_eq!(ids, vec!["late-arrival"]);
}
