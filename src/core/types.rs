//! Entity records held by the catalog
//!
//! Field names serialize in camelCase so records render the same way the
//! GraphQL schema exposes them.

use serde::{Deserialize, Serialize};

/// Identifier of a song, unique within the songs collection
pub type SongId = i32;

/// Identifier of an author, unique within the authors collection
pub type AuthorId = i32;

/// A song written by an author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Assigned identifier
    pub id: SongId,
    /// Song title
    pub title: String,
    /// Release year
    pub release: i32,
    /// Album the song appears on
    pub album: String,
    /// Genre label
    pub genre: String,
    /// Author reference; not required to resolve
    pub author_id: AuthorId,
}

/// An author of songs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Assigned identifier
    pub id: AuthorId,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Home town
    pub home_town: String,
}

/// Input for creating a song; the id is assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSong {
    /// Song title
    pub title: String,
    /// Release year
    pub release: i32,
    /// Album the song appears on
    pub album: String,
    /// Genre label
    pub genre: String,
    /// Author reference, not checked against the authors collection
    pub author_id: AuthorId,
}

/// Input for creating an author; the id is assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuthor {
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Home town
    pub home_town: String,
}

impl NewSong {
    /// Attach an id, producing the stored record
    pub fn with_id(self, id: SongId) -> Song {
        Song {
            id,
            title: self.title,
            release: self.release,
            album: self.album,
            genre: self.genre,
            author_id: self.author_id,
        }
    }
}

impl NewAuthor {
    /// Attach an id, producing the stored record
    pub fn with_id(self, id: AuthorId) -> Author {
        Author {
            id,
            name: self.name,
            email: self.email,
            home_town: self.home_town,
        }
    }
}
