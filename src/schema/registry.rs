//! Type Registry - data-driven description of the GraphQL schema
//!
//! Every object type is a [`TypeDef`] holding a list of [`FieldDef`]s. A field
//! carries its name, type, nullability, arguments, description and a
//! [`Resolver`]. The registry knows nothing about query execution; the engine
//! in [`super::engine`] turns it into an executable schema.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_graphql::Value;

use crate::core::error::{Error, Result};
use crate::core::types::{Author, Song};
use crate::storage::EntityStore;

/// Scalar kinds the catalog uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// GraphQL `Int` (32-bit)
    Int,
    /// GraphQL `String`
    String,
}

/// Output type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A scalar value
    Scalar(ScalarKind),
    /// A single object of the named type
    Object(&'static str),
    /// A list of objects of the named type; items are never null
    List(&'static str),
}

/// An argument accepted by a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentDef {
    /// Argument name
    pub name: &'static str,
    /// Scalar kind of the argument
    pub kind: ScalarKind,
    /// Whether the argument is non-nullable
    pub required: bool,
}

impl ArgumentDef {
    /// A non-nullable argument
    pub const fn required(name: &'static str, kind: ScalarKind) -> Self {
        Self { name, kind, required: true }
    }

    /// A nullable argument that may be omitted
    pub const fn optional(name: &'static str, kind: ScalarKind) -> Self {
        Self { name, kind, required: false }
    }
}

/// An entity value flowing between resolvers as a parent object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// A song
    Song(Song),
    /// An author
    Author(Author),
}

impl Record {
    /// Name of the GraphQL type this record resolves as
    pub fn type_name(&self) -> &'static str {
        match self {
            Record::Song(_) => "Song",
            Record::Author(_) => "Author",
        }
    }

    /// Stored scalar field by its GraphQL name
    pub fn scalar(&self, field: &str) -> Option<Value> {
        match self {
            Record::Song(song) => match field {
                "id" => Some(Value::from(song.id)),
                "title" => Some(Value::from(song.title.as_str())),
                "release" => Some(Value::from(song.release)),
                "album" => Some(Value::from(song.album.as_str())),
                "genre" => Some(Value::from(song.genre.as_str())),
                "authorId" => Some(Value::from(song.author_id)),
                _ => None,
            },
            Record::Author(author) => match field {
                "id" => Some(Value::from(author.id)),
                "name" => Some(Value::from(author.name.as_str())),
                "email" => Some(Value::from(author.email.as_str())),
                "homeTown" => Some(Value::from(author.home_town.as_str())),
                _ => None,
            },
        }
    }

    /// The song inside, if this is one
    pub fn as_song(&self) -> Option<&Song> {
        match self {
            Record::Song(song) => Some(song),
            Record::Author(_) => None,
        }
    }

    /// The author inside, if this is one
    pub fn as_author(&self) -> Option<&Author> {
        match self {
            Record::Author(author) => Some(author),
            Record::Song(_) => None,
        }
    }
}

impl From<Song> for Record {
    fn from(song: Song) -> Self {
        Record::Song(song)
    }
}

impl From<Author> for Record {
    fn from(author: Author) -> Self {
        Record::Author(author)
    }
}

/// What a resolver produced for its field
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// GraphQL `null`
    Null,
    /// A scalar value
    Scalar(Value),
    /// A single entity
    Record(Record),
    /// An ordered list of entities
    Records(Vec<Record>),
}

impl Resolved {
    /// `Record` for `Some`, `Null` for `None`
    pub fn optional<T: Into<Record>>(value: Option<T>) -> Self {
        value.map_or(Resolved::Null, |v| Resolved::Record(v.into()))
    }

    /// `Records` from any sequence of entities
    pub fn list<T: Into<Record>>(values: impl IntoIterator<Item = T>) -> Self {
        Resolved::Records(values.into_iter().map(Into::into).collect())
    }
}

/// Field arguments as received by a resolver
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(BTreeMap<String, Value>);

impl Arguments {
    /// Build from name/value pairs
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Raw value of an argument, if supplied
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Integer argument; absent or explicit null yields `None`
    pub fn int(&self, name: &str) -> Result<Option<i32>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| Error::resolver(format!("argument `{}` is not a 32-bit integer", name))),
            Some(other) => Err(Error::resolver(format!(
                "argument `{}` expected Int, found {}",
                name, other
            ))),
        }
    }

    /// Integer argument that must be present
    pub fn required_int(&self, name: &str) -> Result<i32> {
        self.int(name)?
            .ok_or_else(|| Error::resolver(format!("missing required argument `{}`", name)))
    }

    /// String argument that must be present
    pub fn required_string(&self, name: &str) -> Result<String> {
        match self.0.get(name) {
            Some(Value::String(s)) => Ok(s.clone()),
            None | Some(Value::Null) => {
                Err(Error::resolver(format!("missing required argument `{}`", name)))
            }
            Some(other) => Err(Error::resolver(format!(
                "argument `{}` expected String, found {}",
                name, other
            ))),
        }
    }
}

/// Resolver reading the store
pub type ReadFn = dyn Fn(&EntityStore, Option<&Record>, &Arguments) -> Result<Resolved> + Send + Sync;

/// Resolver appending to the store
pub type WriteFn = dyn Fn(&mut EntityStore, &Arguments) -> Result<Resolved> + Send + Sync;

/// How a field obtains its value
#[derive(Clone)]
pub enum Resolver {
    /// Runs under a shared read lock; receives the parent record for nested fields
    Read(Arc<ReadFn>),
    /// Runs under the exclusive write lock
    Write(Arc<WriteFn>),
}

impl Resolver {
    /// Wrap a read resolver
    pub fn read<F>(f: F) -> Self
    where
        F: Fn(&EntityStore, Option<&Record>, &Arguments) -> Result<Resolved> + Send + Sync + 'static,
    {
        Resolver::Read(Arc::new(f))
    }

    /// Wrap a write resolver
    pub fn write<F>(f: F) -> Self
    where
        F: Fn(&mut EntityStore, &Arguments) -> Result<Resolved> + Send + Sync + 'static,
    {
        Resolver::Write(Arc::new(f))
    }

    /// Whether the resolver mutates the store
    pub fn is_write(&self) -> bool {
        matches!(self, Resolver::Write(_))
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolver::Read(_) => f.write_str("Resolver::Read"),
            Resolver::Write(_) => f.write_str("Resolver::Write"),
        }
    }
}

/// One field of an object type
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name as exposed to clients
    pub name: &'static str,
    /// Output type
    pub ty: FieldType,
    /// Whether the field may resolve to null
    pub nullable: bool,
    /// Introspection description
    pub description: Option<&'static str>,
    /// Accepted arguments
    pub args: Vec<ArgumentDef>,
    /// Value producer
    pub resolver: Resolver,
}

impl FieldDef {
    /// A non-null scalar projected straight from the parent record
    pub fn scalar(name: &'static str, kind: ScalarKind) -> Self {
        Self {
            name,
            ty: FieldType::Scalar(kind),
            nullable: false,
            description: None,
            args: Vec::new(),
            resolver: Resolver::read(move |_, parent, _| {
                parent
                    .and_then(|record| record.scalar(name))
                    .map(Resolved::Scalar)
                    .ok_or_else(|| Error::resolver(format!("field `{}` has no stored value", name)))
            }),
        }
    }

    /// A nullable single-object field
    pub fn object(name: &'static str, type_name: &'static str, resolver: Resolver) -> Self {
        Self {
            name,
            ty: FieldType::Object(type_name),
            nullable: true,
            description: None,
            args: Vec::new(),
            resolver,
        }
    }

    /// A non-null list field
    pub fn list(name: &'static str, type_name: &'static str, resolver: Resolver) -> Self {
        Self {
            name,
            ty: FieldType::List(type_name),
            nullable: false,
            description: None,
            args: Vec::new(),
            resolver,
        }
    }

    /// Set the result nullability
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Attach an introspection description
    pub fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Add an argument
    pub fn argument(mut self, arg: ArgumentDef) -> Self {
        self.args.push(arg);
        self
    }
}

/// An object type: an entity, the query root or the mutation root
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Type name
    pub name: &'static str,
    /// Introspection description
    pub description: Option<&'static str>,
    /// Fields in declaration order
    pub fields: Vec<FieldDef>,
}

impl TypeDef {
    /// Start an object type with no fields
    pub fn new(name: &'static str) -> Self {
        Self { name, description: None, fields: Vec::new() }
    }

    /// Attach an introspection description
    pub fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Add a field
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Field by name
    pub fn find_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Complete schema description
#[derive(Debug, Clone)]
pub struct Registry {
    /// Root query type
    pub query: TypeDef,
    /// Root mutation type, if any
    pub mutation: Option<TypeDef>,
    /// Entity object types
    pub entities: Vec<TypeDef>,
}

impl Registry {
    /// Registry with a query root and nothing else
    pub fn new(query: TypeDef) -> Self {
        Self { query, mutation: None, entities: Vec::new() }
    }

    /// Set the mutation root
    pub fn mutation(mut self, mutation: TypeDef) -> Self {
        self.mutation = Some(mutation);
        self
    }

    /// Register an entity type
    pub fn entity(mut self, entity: TypeDef) -> Self {
        self.entities.push(entity);
        self
    }

    /// Entity type by name
    pub fn find_entity(&self, name: &str) -> Option<&TypeDef> {
        self.entities.iter().find(|t| t.name == name)
    }

    /// All object types, roots first
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        std::iter::once(&self.query)
            .chain(self.mutation.iter())
            .chain(self.entities.iter())
    }

    /// Check names are unique, object references resolve, and writes only sit on the mutation root
    pub fn validate(&self) -> Result<()> {
        let mut type_names = HashSet::new();
        for ty in self.types() {
            if !type_names.insert(ty.name) {
                return Err(Error::schema(format!("duplicate type `{}`", ty.name)));
            }

            let mut field_names = HashSet::new();
            for field in &ty.fields {
                if !field_names.insert(field.name) {
                    return Err(Error::schema(format!(
                        "duplicate field `{}.{}`",
                        ty.name, field.name
                    )));
                }

                if let FieldType::Object(target) | FieldType::List(target) = field.ty {
                    if self.find_entity(target).is_none() {
                        return Err(Error::schema(format!(
                            "field `{}.{}` references unknown type `{}`",
                            ty.name, field.name, target
                        )));
                    }
                }

                let on_mutation_root = self.mutation.as_ref().map(|m| m.name) == Some(ty.name);
                if field.resolver.is_write() && !on_mutation_root {
                    return Err(Error::schema(format!(
                        "field `{}.{}` writes to the store outside the mutation root",
                        ty.name, field.name
                    )));
                }
            }
        }
        Ok(())
    }
}
