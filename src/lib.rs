//! Songbook - A GraphQL catalog of songs and their authors
//!
//! Songbook serves a small in-memory catalog over GraphQL. Songs and authors
//! can be queried individually or as lists, navigated through their
//! relations (`Song.author`, `Author.songs`) and extended through the
//! `addSong` and `addAuthor` mutations.
#![warn(missing_docs)]

// Core foundational modules
pub mod core;

// Main functional modules
pub mod storage;
pub mod schema;
pub mod api;
pub mod system;

// Re-export commonly used items for convenience
pub use core::{Config, Error, Result};

use core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize tracing from the logging configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };

    result.map_err(|e| Error::config(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!("Initializing {} v{}", NAME, VERSION);
    Ok(())
}
