//! Application State Management
//!
//! This module defines the central AppState handed to every HTTP handler. It
//! owns the shared store, the schema executor built over it, configuration and
//! metrics.

use std::sync::Arc;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::schema::{catalog_executor, Executor};
use crate::storage::{create_shared_store, share, EntityStore, SharedStore};
use crate::system::health::Uptime;
use crate::system::Metrics;

/// Central application state holding all services and components
#[derive(Clone)]
pub struct AppState {
    /// Entity store shared with the schema
    pub store: SharedStore,

    /// GraphQL executor for the catalog schema
    pub executor: Executor,

    /// Application configuration
    pub config: Arc<Config>,

    /// Request and catalog metrics
    pub metrics: Metrics,

    /// Process uptime reference
    pub uptime: Uptime,
}

impl AppState {
    /// Create an AppState over the seeded sample catalog
    pub fn new(config: Config) -> Result<Self> {
        Self::with_store(config, create_shared_store()?)
    }

    /// Create an AppState over a caller-provided store (used for fixtures)
    pub fn with_store(config: Config, store: SharedStore) -> Result<Self> {
        tracing::info!("Creating AppState");
        let executor = catalog_executor(store.clone())?;
        let metrics = Metrics::new()?;
        {
            let store = store.read();
            metrics.set_catalog_size(store.song_count(), store.author_count());
        }

        Ok(Self {
            store,
            executor,
            config: Arc::new(config),
            metrics,
            uptime: Uptime::start(),
        })
    }

    /// Create an AppState over an empty catalog
    pub fn empty(config: Config) -> Result<Self> {
        Self::with_store(config, share(EntityStore::new()))
    }

    /// Refresh catalog size gauges from the store
    pub fn record_catalog_size(&self) {
        let store = self.store.read();
        self.metrics.set_catalog_size(store.song_count(), store.author_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_seeded() {
        let state = AppState::new(Config::default()).unwrap();
        assert_eq!(state.store.read().song_count(), 5);
        assert_eq!(state.metrics.songs.get(), 5);
        assert_eq!(state.metrics.authors.get(), 3);
    }

    #[test]
    fn test_clones_share_the_store() {
        let state = AppState::empty(Config::default()).unwrap();
        let clone = state.clone();
        clone.store.write().insert_author(crate::core::types::NewAuthor {
            name: "A".to_string(),
            email: "a@example.com".to_string(),
            home_town: "B".to_string(),
        });
        assert_eq!(state.store.read().author_count(), 1);

        state.record_catalog_size();
        assert_eq!(state.metrics.authors.get(), 1);
    }
}
