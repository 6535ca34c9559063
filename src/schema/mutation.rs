//! Mutation Resolver - entity creation
//!
//! Ids come from the store ("length + 1"). Argument presence and shape are
//! checked by schema validation before these run; `from_arguments` only
//! re-reads what validation already guaranteed.

use crate::core::error::Result;
use crate::core::types::{Author, NewAuthor, NewSong, Song};
use crate::schema::registry::Arguments;
use crate::storage::EntityStore;

/// Append a song; `author_id` is taken verbatim without an existence check
pub fn add_song(store: &mut EntityStore, input: NewSong) -> Song {
    let song = store.insert_song(input);
    tracing::info!(id = song.id, author_id = song.author_id, "song created");
    song
}

/// Append an author
pub fn add_author(store: &mut EntityStore, input: NewAuthor) -> Author {
    let author = store.insert_author(input);
    tracing::info!(id = author.id, "author created");
    author
}

impl NewSong {
    /// Read `addSong` arguments
    pub fn from_arguments(args: &Arguments) -> Result<Self> {
        Ok(Self {
            title: args.required_string("title")?,
            release: args.required_int("release")?,
            album: args.required_string("album")?,
            genre: args.required_string("genre")?,
            author_id: args.required_int("authorId")?,
        })
    }
}

impl NewAuthor {
    /// Read `addAuthor` arguments
    pub fn from_arguments(args: &Arguments) -> Result<Self> {
        Ok(Self {
            name: args.required_string("name")?,
            email: args.required_string("email")?,
            home_town: args.required_string("homeTown")?,
        })
    }
}
