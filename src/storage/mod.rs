//! Storage layer
//!
//! Holds the in-memory entity collections. Nothing is persisted; every process
//! starts from the sample catalog.

pub mod factory;
pub mod seed;
pub mod store;

// Re-export main storage types
pub use factory::{create_shared_store, create_store, share, SharedStore};
pub use store::EntityStore;
