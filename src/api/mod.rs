//! # API Module
//!
//! HTTP interface of the catalog.
//!
//! ## Endpoints Overview
//!
//! - `POST /graphql` - Execute a GraphQL request or batch
//! - `GET /graphql` - Query-string execution, or the GraphiQL IDE for browsers
//!   when enabled. Mutations over GET are answered with 405.
//! - `GET /health` - Health check
//! - `GET /info` - Service info and capabilities
//! - `GET /metrics` - Prometheus metrics, when enabled

pub mod handlers;
pub mod server;

// Re-export commonly used items
pub use server::{create_app, graphql_router, start_server};
