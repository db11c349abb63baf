//! Fixed constants for the shared-objects store.

/// Defaults for the shared-objects metadata store.
///
/// The store exposes exactly one namespace and one element type; both are
/// compile-time constants rather than configurable state.
pub struct StoreDefaults;

impl StoreDefaults {
    /// The single namespace every element lives in.
    pub const NAMESPACE: &'static str = "default";

    /// Element-type id for database connection definitions.
    pub const CONNECTION_TYPE_ID: &'static str = "database-connection";

    /// Display name of the connection element type.
    pub const CONNECTION_TYPE_NAME: &'static str = "Database connection";

    /// Description of the connection element type.
    pub const CONNECTION_TYPE_DESCRIPTION: &'static str =
        "Shared database connection definitions";

    /// Filename the registry persists its contents to.
    pub const SHARED_FILE_NAME: &'static str = "shared-connections.json";
}
