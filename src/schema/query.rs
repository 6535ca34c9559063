//! Query Resolver - root reads and relation traversal
//!
//! Every lookup is a linear scan over the store. Relations are recomputed per
//! parent with no memoisation, so `authors { songs }` costs authors × songs.
//! A miss is never an error: singular lookups yield `None`, plural ones an
//! empty list.

use crate::core::types::{Author, AuthorId, Song, SongId};
use crate::storage::EntityStore;

/// First song with the given id; `None` when no id was supplied
pub fn song(store: &EntityStore, id: Option<SongId>) -> Option<Song> {
    let id = id?;
    let found = store.find_song(id).cloned();
    tracing::trace!(id, found = found.is_some(), "song lookup");
    found
}

/// All songs in insertion order
pub fn songs(store: &EntityStore) -> Vec<Song> {
    store.songs().to_vec()
}

/// First author with the given id; `None` when no id was supplied
pub fn author(store: &EntityStore, id: Option<AuthorId>) -> Option<Author> {
    let id = id?;
    let found = store.find_author(id).cloned();
    tracing::trace!(id, found = found.is_some(), "author lookup");
    found
}

/// All authors in insertion order
pub fn authors(store: &EntityStore) -> Vec<Author> {
    store.authors().to_vec()
}

/// Author referenced by a song; dangling references yield `None`
pub fn author_of(store: &EntityStore, song: &Song) -> Option<Author> {
    let author = store.find_author(song.author_id).cloned();
    if author.is_none() {
        tracing::debug!(song = song.id, author_id = song.author_id, "dangling author reference");
    }
    author
}

/// Songs written by an author, in insertion order
pub fn songs_of(store: &EntityStore, author: &Author) -> Vec<Song> {
    store.songs_by_author(author.id).cloned().collect()
}
