//! Core system types and foundations
//!
//! This module contains the entity records, error handling and configuration
//! shared by every other layer.

pub mod types;
pub mod error;
pub mod config;
pub mod app_state;

// Re-export commonly used items
pub use types::{Author, AuthorId, NewAuthor, NewSong, Song, SongId};
pub use error::{Error, Result};
pub use config::Config;
pub use app_state::AppState;
