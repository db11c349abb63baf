//! Basic usage example - store and list shared connections.

use sharedmeta_core::codec::attr;
use sharedmeta_core::{
    Element, MetaStore, Result, SharedObjectRegistry, SharedObjectsStore, StoreDefaults,
};
use std::sync::Arc;

fn main() -> Result<()> {
    // Get path from args or use the default filename in the current directory
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| StoreDefaults::SHARED_FILE_NAME.to_string());

    println!("Opening shared-object registry at: {}", path);
    let registry = Arc::new(SharedObjectRegistry::load(&path)?);
    let store = SharedObjectsStore::new(registry)?;

    let ns = StoreDefaults::NAMESPACE;
    let type_id = StoreDefaults::CONNECTION_TYPE_ID;

    if store.get_element(ns, type_id, "warehouse")?.is_none() {
        println!("Creating connection 'warehouse'...");
        let element = Element::new("warehouse", "warehouse")
            .with_attribute(attr::DRIVER, "postgresql")
            .with_attribute(attr::HOST, "db.internal")
            .with_attribute(attr::PORT, 5432)
            .with_attribute(attr::DATABASE, "analytics");
        store.create_element(ns, type_id, &element)?;
    }

    let elements = store.list_elements(ns, type_id)?;
    if elements.is_empty() {
        println!("No connections stored.");
    } else {
        println!("Found {} connection(s):", elements.len());
        for element in elements {
            let driver = element.attribute_str(attr::DRIVER).unwrap_or("unknown");
            println!("  - {} ({})", element.name, driver);
        }
    }

    Ok(())
}
