//! sharedmeta - shared connection definitions behind a generic
//! metadata-store contract.
//!
//! This crate bridges two views of the same data:
//!
//! - A [`SharedObjectRegistry`] owns strongly-typed shared objects
//!   (database connection definitions) and persists them to one JSON file.
//! - The [`MetaStore`] trait is a generic namespace / element-type / element
//!   contract with no knowledge of those types.
//!
//! [`SharedObjectsStore`] adapts the former to the latter: reads project
//! registry contents into generic [`Element`]s through a codec, writes
//! decode elements back into typed objects and persist the registry. The
//! store deliberately rejects namespace and element-type mutation - it is
//! not the authority for either.
//!
//! # Example
//!
//! ```rust,ignore
//! use sharedmeta_core::{
//!     codec::attr, Element, MetaStore, SharedObjectRegistry, SharedObjectsStore, StoreDefaults,
//! };
//! use std::sync::Arc;
//!
//! fn main() -> sharedmeta_core::Result<()> {
//!     let registry = Arc::new(SharedObjectRegistry::load("shared-connections.json")?);
//!     let store = SharedObjectsStore::new(registry)?;
//!
//!     let element = Element::new("warehouse", "warehouse")
//!         .with_attribute(attr::DRIVER, "postgresql")
//!         .with_attribute(attr::HOST, "db.internal");
//!     store.create_element(StoreDefaults::NAMESPACE, StoreDefaults::CONNECTION_TYPE_ID, &element)?;
//!
//!     for id in store.list_element_ids(StoreDefaults::NAMESPACE, StoreDefaults::CONNECTION_TYPE_ID)? {
//!         println!("connection: {id}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod connection;
pub mod error;
pub mod metastore;
pub mod registry;
pub mod store;

// Re-export commonly used types
pub use codec::{ConnectionCodec, ElementCodec};
pub use config::StoreDefaults;
pub use connection::ConnectionDef;
pub use error::{MetaStoreError, Result};
pub use metastore::{Element, ElementType, MemoryMetaStore, MetaStore};
pub use registry::{ObjectKind, SharedObject, SharedObjectRegistry};
pub use store::SharedObjectsStore;
