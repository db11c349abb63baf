//! Error types for the sharedmeta library.
//!
//! One enum covers the whole crate so callers can branch on failure kinds
//! instead of parsing message text.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for metadata-store operations.
#[derive(Debug, Error)]
pub enum MetaStoreError {
    /// The store does not support the requested operation.
    ///
    /// Raised by the shared-objects store for namespace and element-type
    /// mutation, and for element writes against an unknown type id.
    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    /// An element with the same id already exists under this type.
    #[error("Element with type id '{type_id}' and element id '{element_id}' already exists")]
    DuplicateElement {
        type_id: String,
        element_id: String,
    },

    /// No element with this id exists under this type.
    #[error("Element with type id '{type_id}' and element id '{element_id}' does not exist")]
    ElementNotFound {
        type_id: String,
        element_id: String,
    },

    /// A namespace with this name already exists.
    #[error("Namespace already exists: {namespace}")]
    NamespaceExists { namespace: String },

    /// No namespace with this name exists.
    #[error("Namespace not found: {namespace}")]
    NamespaceNotFound { namespace: String },

    /// An element type with this id already exists in the namespace.
    #[error("Element type already exists: {type_id}")]
    ElementTypeExists { type_id: String },

    /// No element type with this id exists in the namespace.
    #[error("Element type not found: {type_id}")]
    ElementTypeNotFound { type_id: String },

    /// The target still has dependent content and cannot be deleted.
    #[error("Dependencies exist: {message}")]
    DependenciesExist { message: String },

    /// Translation between a typed object and its generic element failed.
    #[error("Translation error: {message}")]
    Translation { message: String },

    /// Store construction failed before any operation could run.
    #[error("Store initialization failed: {message}")]
    Initialization { message: String },

    // Persistence errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for metadata-store operations.
pub type Result<T> = std::result::Result<T, MetaStoreError>;

impl From<std::io::Error> for MetaStoreError {
    fn from(err: std::io::Error) -> Self {
        MetaStoreError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for MetaStoreError {
    fn from(err: serde_json::Error) -> Self {
        MetaStoreError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl MetaStoreError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        MetaStoreError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an unsupported-operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        MetaStoreError::Unsupported {
            message: message.into(),
        }
    }

    /// Create a translation error.
    pub fn translation(message: impl Into<String>) -> Self {
        MetaStoreError::Translation {
            message: message.into(),
        }
    }

    /// True if the operation was rejected as unsupported.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, MetaStoreError::Unsupported { .. })
    }

    /// True if the failure was an id collision on create.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, MetaStoreError::DuplicateElement { .. })
    }
}
