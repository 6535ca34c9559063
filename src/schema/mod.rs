//! # Schema Module
//!
//! The typed query resolution layer:
//! - [`registry`] - data-driven type registry (types, fields, arguments, resolvers)
//! - [`catalog`] - the Song/Author catalog declared as a registry
//! - [`query`] / [`mutation`] - resolver functions over the entity store
//! - [`engine`] - builds an executable GraphQL schema from a registry

pub mod catalog;
pub mod engine;
pub mod mutation;
pub mod query;
pub mod registry;

use crate::core::Result;
use crate::storage::SharedStore;

pub use catalog::catalog_registry;
pub use engine::{build_schema, Executor};
pub use registry::{Record, Registry};

/// Executor for the catalog schema bound to `store`
pub fn catalog_executor(store: SharedStore) -> Result<Executor> {
    Executor::from_registry(&catalog_registry(), store)
}
