//! Storage factory for the shared catalog store

use crate::core::Result;
use crate::storage::{seed, EntityStore};
use parking_lot::RwLock;
use std::sync::Arc;

/// Storage wrapper for thread-safe access
pub type SharedStore = Arc<RwLock<EntityStore>>;

/// Create the store the service starts with
pub fn create_store() -> Result<EntityStore> {
    seed::seeded_store()
}

/// Create a shared store seeded with the sample catalog
pub fn create_shared_store() -> Result<SharedStore> {
    Ok(share(create_store()?))
}

/// Wrap an existing store for sharing between the schema and the HTTP layer
pub fn share(store: EntityStore) -> SharedStore {
    Arc::new(RwLock::new(store))
}
