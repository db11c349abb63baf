//! The shared-object registry.
//!
//! Owns every shared object in the process. Objects are keyed by kind and
//! name; `save` flushes the whole collection to one JSON document.

use crate::connection::ConnectionDef;
use crate::error::{MetaStoreError, Result};
use crate::registry::atomic::{atomic_read_json, atomic_write_json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// The kinds of shared object the registry can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ObjectKind {
    Connection,
}

/// A strongly-typed shared object.
#[derive(Debug, Clone, PartialEq)]
pub enum SharedObject {
    Connection(ConnectionDef),
}

impl SharedObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SharedObject::Connection(_) => ObjectKind::Connection,
        }
    }

    /// The identity the registry keys on.
    pub fn name(&self) -> &str {
        match self {
            SharedObject::Connection(conn) => &conn.name,
        }
    }

    fn key(&self) -> ObjectKey {
        ObjectKey {
            kind: self.kind(),
            name: self.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ObjectKey {
    kind: ObjectKind,
    name: String,
}

/// On-disk document, one section per object kind.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    connections: Vec<ConnectionDef>,
}

/// In-memory collection of shared objects with durable save.
///
/// Storing an object with the same kind and name as an existing one replaces
/// it. Mutations are in-memory only until [`save`](Self::save) is called.
pub struct SharedObjectRegistry {
    path: PathBuf,
    objects: RwLock<BTreeMap<ObjectKey, SharedObject>>,
}

impl SharedObjectRegistry {
    /// Load the registry from `path`.
    ///
    /// A missing file yields an empty registry; a present but malformed file
    /// is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut objects = BTreeMap::new();

        if let Some(file) = atomic_read_json::<RegistryFile>(&path)? {
            for conn in file.connections {
                let object = SharedObject::Connection(conn);
                objects.insert(object.key(), object);
            }
        }
        debug!(
            "Loaded {} shared object(s) from {}",
            objects.len(),
            path.display()
        );

        Ok(Self {
            path,
            objects: RwLock::new(objects),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.objects.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the current contents, in key order.
    pub fn values(&self) -> Result<Vec<SharedObject>> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// Insert an object, replacing any existing object with the same kind
    /// and name.
    pub fn store_object(&self, object: SharedObject) -> Result<()> {
        let mut objects = self.write()?;
        debug!("Storing shared object '{}'", object.name());
        objects.insert(object.key(), object);
        Ok(())
    }

    /// Remove an object by its kind and name. Returns false if it wasn't
    /// present.
    pub fn remove_object(&self, object: &SharedObject) -> Result<bool> {
        let mut objects = self.write()?;
        let removed = objects.remove(&object.key()).is_some();
        if removed {
            debug!("Removed shared object '{}'", object.name());
        }
        Ok(removed)
    }

    /// Persist the whole collection to the backing file atomically, keeping
    /// a backup of the previous document.
    pub fn save(&self) -> Result<()> {
        let file = {
            let objects = self.read()?;
            let mut file = RegistryFile::default();
            for object in objects.values() {
                match object {
                    SharedObject::Connection(conn) => file.connections.push(conn.clone()),
                }
            }
            file
        };

        debug!(
            "Saving {} shared object(s) to {}",
            file.connections.len(),
            self.path.display()
        );
        atomic_write_json(&self.path, &file, true)
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<ObjectKey, SharedObject>>> {
        self.objects
            .read()
            .map_err(|_| MetaStoreError::Other("Failed to acquire registry read lock".to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<ObjectKey, SharedObject>>> {
        self.objects.write().map_err(|_| {
            MetaStoreError::Other("Failed to acquire registry write lock".to_string())
        })
    }
}
