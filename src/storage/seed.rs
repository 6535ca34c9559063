//! Sample catalog loaded at startup

use crate::core::types::{Author, Song};
use crate::core::Result;
use crate::storage::EntityStore;

/// Authors present when the service starts
pub fn sample_authors() -> Vec<Author> {
    [
        ("C. Tangana", "c.tangana@gmail.com", "Madrid, Spain"),
        ("Arctic Monkeys", "arctic@gmail.com", "Sheffield, UK"),
        ("Metallica", "metallica@gmail.com", "Lost Angeles, USA"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, email, home_town), id)| Author {
        id,
        name: name.to_string(),
        email: email.to_string(),
        home_town: home_town.to_string(),
    })
    .collect()
}

/// Songs present when the service starts
pub fn sample_songs() -> Vec<Song> {
    [
        ("Tu Me Dejaste De Querer", 2021, "El Madrileno", "flamenco", 1),
        ("Do I Wanna Know?", 2013, "AM", "rock", 2),
        ("R U Mine?", 2013, "AM", "rock", 2),
        ("Nothing else matters", 1991, "Metallica", "rock", 3),
        ("Master Of Puppets", 1986, "Master of Puppets", "rock", 3),
    ]
    .into_iter()
    .zip(1..)
    .map(|((title, release, album, genre, author_id), id)| Song {
        id,
        title: title.to_string(),
        release,
        album: album.to_string(),
        genre: genre.to_string(),
        author_id,
    })
    .collect()
}

/// Store populated with the sample catalog
pub fn seeded_store() -> Result<EntityStore> {
    seed_store(sample_songs(), sample_authors())
}

/// Store populated with fixture records, which must carry dense ids
pub fn seed_store(songs: Vec<Song>, authors: Vec<Author>) -> Result<EntityStore> {
    tracing::debug!("Seeding store with {} songs and {} authors", songs.len(), authors.len());
    EntityStore::from_records(songs, authors)
}
