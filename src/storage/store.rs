//! Entity Store - append-only in-memory collections of songs and authors
//!
//! Both collections keep insertion order and never shrink. Ids are dense
//! (`1..=len`), which is what makes "length + 1" a safe id for the next record.

use crate::core::error::{Error, Result};
use crate::core::types::{Author, AuthorId, NewAuthor, NewSong, Song, SongId};

/// In-memory catalog of songs and authors
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    songs: Vec<Song>,
    authors: Vec<Author>,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from fixture records.
    ///
    /// Ids in each collection must be exactly `1..=n` in insertion order.
    pub fn from_records(songs: Vec<Song>, authors: Vec<Author>) -> Result<Self> {
        check_dense("song", songs.iter().map(|s| s.id))?;
        check_dense("author", authors.iter().map(|a| a.id))?;
        Ok(Self { songs, authors })
    }

    /// All songs in insertion order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// All authors in insertion order
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Number of stored songs
    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    /// Number of stored authors
    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    /// Append a song, assigning `songs.len() + 1` as its id
    pub fn insert_song(&mut self, song: NewSong) -> Song {
        let song = song.with_id(next_id(self.songs.len()));
        self.songs.push(song.clone());
        song
    }

    /// Append an author, assigning `authors.len() + 1` as its id
    pub fn insert_author(&mut self, author: NewAuthor) -> Author {
        let author = author.with_id(next_id(self.authors.len()));
        self.authors.push(author.clone());
        author
    }
}

fn next_id(len: usize) -> i32 {
    // Ids are GraphQL Int (i32); the catalog never gets near that size.
    i32::try_from(len + 1).unwrap_or(i32::MAX)
}

fn check_dense(kind: &str, ids: impl Iterator<Item = i32>) -> Result<()> {
    for (position, id) in ids.enumerate() {
        let expected = next_id(position);
        if id != expected {
            return Err(Error::invalid_input(format!(
                "{} at position {} has id {} (expected {})",
                kind, position, id, expected
            )));
        }
    }
    Ok(())
}

/// Look up helpers used by the resolvers
impl EntityStore {
    /// First song with the given id
    pub fn find_song(&self, id: SongId) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == id)
    }

    /// First author with the given id
    pub fn find_author(&self, id: AuthorId) -> Option<&Author> {
        self.authors.iter().find(|author| author.id == id)
    }

    /// Songs referencing the given author, in insertion order
    pub fn songs_by_author(&self, author_id: AuthorId) -> impl Iterator<Item = &Song> + '_ {
        self.songs.iter().filter(move |song| song.author_id == author_id)
    }
}
