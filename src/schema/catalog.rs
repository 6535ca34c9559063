//! The catalog schema: Song, Author, and the Query/Mutation roots

use crate::core::error::Error;
use crate::core::types::{NewAuthor, NewSong};
use crate::schema::mutation;
use crate::schema::query;
use crate::schema::registry::{
    ArgumentDef, FieldDef, Record, Registry, Resolved, Resolver, ScalarKind, TypeDef,
};

/// Name of the song object type
pub const SONG: &str = "Song";
/// Name of the author object type
pub const AUTHOR: &str = "Author";

/// Registry describing the whole catalog API
pub fn catalog_registry() -> Registry {
    Registry::new(query_root())
        .mutation(mutation_root())
        .entity(song_type())
        .entity(author_type())
}

fn song_type() -> TypeDef {
    TypeDef::new(SONG)
        .description("This represents a song written by an author")
        .field(FieldDef::scalar("id", ScalarKind::Int))
        .field(FieldDef::scalar("title", ScalarKind::String))
        .field(FieldDef::scalar("release", ScalarKind::Int))
        .field(FieldDef::scalar("album", ScalarKind::String))
        .field(FieldDef::scalar("genre", ScalarKind::String))
        .field(FieldDef::scalar("authorId", ScalarKind::Int))
        .field(FieldDef::object(
            "author",
            AUTHOR,
            Resolver::read(|store, parent, _| {
                let song = parent
                    .and_then(Record::as_song)
                    .ok_or_else(|| Error::internal("Song.author resolved without a song"))?;
                Ok(Resolved::optional(query::author_of(store, song)))
            }),
        ))
}

fn author_type() -> TypeDef {
    TypeDef::new(AUTHOR)
        .description("This represents an author of a song")
        .field(FieldDef::scalar("id", ScalarKind::Int))
        .field(FieldDef::scalar("name", ScalarKind::String))
        .field(FieldDef::scalar("email", ScalarKind::String))
        .field(FieldDef::scalar("homeTown", ScalarKind::String))
        .field(FieldDef::list(
            "songs",
            SONG,
            Resolver::read(|store, parent, _| {
                let author = parent
                    .and_then(Record::as_author)
                    .ok_or_else(|| Error::internal("Author.songs resolved without an author"))?;
                Ok(Resolved::list(query::songs_of(store, author)))
            }),
        ))
}

fn query_root() -> TypeDef {
    TypeDef::new("Query")
        .description("Root Query")
        .field(
            FieldDef::object(
                "song",
                SONG,
                Resolver::read(|store, _, args| {
                    Ok(Resolved::optional(query::song(store, args.int("id")?)))
                }),
            )
            .description("A song")
            .argument(ArgumentDef::optional("id", ScalarKind::Int)),
        )
        .field(
            FieldDef::list(
                "songs",
                SONG,
                Resolver::read(|store, _, _| Ok(Resolved::list(query::songs(store)))),
            )
            .description("List of all songs"),
        )
        .field(
            FieldDef::list(
                "authors",
                AUTHOR,
                Resolver::read(|store, _, _| Ok(Resolved::list(query::authors(store)))),
            )
            .description("List of All Authors"),
        )
        .field(
            FieldDef::object(
                "author",
                AUTHOR,
                Resolver::read(|store, _, args| {
                    Ok(Resolved::optional(query::author(store, args.int("id")?)))
                }),
            )
            .description("A Single Author")
            .argument(ArgumentDef::optional("id", ScalarKind::Int)),
        )
}

fn mutation_root() -> TypeDef {
    TypeDef::new("Mutation")
        .description("Root Mutation")
        .field(
            FieldDef::object(
                "addSong",
                SONG,
                Resolver::write(|store, args| {
                    let input = NewSong::from_arguments(args)?;
                    Ok(Resolved::Record(mutation::add_song(store, input).into()))
                }),
            )
            .nullable(false)
            .description("Add a new song")
            .argument(ArgumentDef::required("title", ScalarKind::String))
            .argument(ArgumentDef::required("release", ScalarKind::Int))
            .argument(ArgumentDef::required("album", ScalarKind::String))
            .argument(ArgumentDef::required("genre", ScalarKind::String))
            .argument(ArgumentDef::required("authorId", ScalarKind::Int)),
        )
        .field(
            FieldDef::object(
                "addAuthor",
                AUTHOR,
                Resolver::write(|store, args| {
                    let input = NewAuthor::from_arguments(args)?;
                    Ok(Resolved::Record(mutation::add_author(store, input).into()))
                }),
            )
            .nullable(false)
            .description("Add an author")
            .argument(ArgumentDef::required("name", ScalarKind::String))
            .argument(ArgumentDef::required("email", ScalarKind::String))
            .argument(ArgumentDef::required("homeTown", ScalarKind::String)),
        )
}
