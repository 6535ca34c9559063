//! Dispatch engine - turns a [`Registry`] into an executable GraphQL schema
//!
//! Each registered field becomes an `async_graphql::dynamic::Field` whose
//! resolver closure looks up the shared store from the schema data, takes the
//! matching lock, and runs the registry resolver. Parsing, validation of
//! argument shape and result assembly are left to async-graphql.

use std::sync::Arc;

use async_graphql::dynamic::{
    Field, FieldFuture, FieldValue, InputValue, Object, ResolverContext, Schema, TypeRef,
};
use async_graphql::{BatchRequest, BatchResponse, Executor as _, Request, Response};
use tokio::sync::Mutex;

use crate::core::error::{Error, Result};
use crate::schema::registry::{
    ArgumentDef, Arguments, FieldDef, FieldType, Record, Registry, Resolved, Resolver, ScalarKind,
    TypeDef,
};
use crate::storage::SharedStore;

/// Build the executable schema for a registry, bound to a store
pub fn build_schema(registry: &Registry, store: SharedStore) -> Result<Schema> {
    registry.validate()?;

    let mutation_name = registry.mutation.as_ref().map(|m| m.name);
    let mut builder = Schema::build(registry.query.name, mutation_name, None);

    for ty in registry.types() {
        tracing::trace!("adding type: {}", ty.name);
        builder = builder.register(build_object(ty));
    }

    builder
        .data(store)
        .finish()
        .map_err(|e| Error::schema(format!("there was an error generating schema: {:?}", e)))
}

fn build_object(ty: &TypeDef) -> Object {
    let mut object = Object::new(ty.name);
    if let Some(description) = ty.description {
        object = object.description(description);
    }
    for field in &ty.fields {
        object = object.field(build_field(field));
    }
    object
}

fn build_field(def: &FieldDef) -> Field {
    let resolver = def.resolver.clone();
    let mut field = Field::new(def.name, type_ref(def.ty, def.nullable), move |ctx| {
        let resolver = resolver.clone();
        FieldFuture::new(async move {
            let resolved = resolve(&ctx, &resolver)?;
            Ok(into_field_value(resolved))
        })
    });

    if let Some(description) = def.description {
        field = field.description(description);
    }
    for arg in &def.args {
        field = field.argument(input_value(arg));
    }
    field
}

fn resolve(ctx: &ResolverContext<'_>, resolver: &Resolver) -> Result<Resolved> {
    let store = ctx
        .data::<SharedStore>()
        .map_err(|e| Error::internal(format!("store missing from schema data: {:?}", e)))?;
    let args = Arguments::from_pairs(
        ctx.args
            .as_index_map()
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone())),
    );

    match resolver {
        Resolver::Read(read) => {
            let parent = ctx.parent_value.downcast_ref::<Record>();
            let guard = store.read();
            read(&guard, parent, &args)
        }
        Resolver::Write(write) => {
            let mut guard = store.write();
            write(&mut guard, &args)
        }
    }
}

fn into_field_value<'a>(resolved: Resolved) -> Option<FieldValue<'a>> {
    match resolved {
        Resolved::Null => None,
        Resolved::Scalar(value) => Some(FieldValue::value(value)),
        Resolved::Record(record) => Some(FieldValue::owned_any(record)),
        Resolved::Records(records) => {
            Some(FieldValue::list(records.into_iter().map(FieldValue::owned_any)))
        }
    }
}

fn scalar_name(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Int => TypeRef::INT,
        ScalarKind::String => TypeRef::STRING,
    }
}

fn type_ref(ty: FieldType, nullable: bool) -> TypeRef {
    match (ty, nullable) {
        (FieldType::Scalar(kind), true) => TypeRef::named(scalar_name(kind)),
        (FieldType::Scalar(kind), false) => TypeRef::named_nn(scalar_name(kind)),
        (FieldType::Object(name), true) => TypeRef::named(name),
        (FieldType::Object(name), false) => TypeRef::named_nn(name),
        (FieldType::List(name), true) => TypeRef::named_nn_list(name),
        (FieldType::List(name), false) => TypeRef::named_nn_list_nn(name),
    }
}

fn input_value(arg: &ArgumentDef) -> InputValue {
    let ty = if arg.required {
        TypeRef::named_nn(scalar_name(arg.kind))
    } else {
        TypeRef::named(scalar_name(arg.kind))
    };
    InputValue::new(arg.name, ty)
}

/// Executes requests one at a time against a schema.
///
/// Holding the gate for the whole request keeps a read-then-mutate sequence
/// from interleaving with another request.
#[derive(Clone)]
pub struct Executor {
    schema: Schema,
    gate: Arc<Mutex<()>>,
}

impl Executor {
    /// Wrap a built schema
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            gate: Arc::new(Mutex::new(())),
        }
    }

    /// Build the schema for `registry` and wrap it
    pub fn from_registry(registry: &Registry, store: SharedStore) -> Result<Self> {
        Ok(Self::new(build_schema(registry, store)?))
    }

    /// The underlying schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Schema definition language for the registry
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }

    /// Execute a single request
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        let _turn = self.gate.lock().await;
        self.schema.execute(request).await
    }

    /// Execute a batch, each request in order
    pub async fn execute_batch(&self, batch: BatchRequest) -> BatchResponse {
        let _turn = self.gate.lock().await;
        self.schema.execute_batch(batch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::catalog::catalog_registry;
    use crate::storage::{create_shared_store, share, EntityStore};
    use serde_json::json;

    fn executor() -> Executor {
        Executor::from_registry(&catalog_registry(), create_shared_store().unwrap()).unwrap()
    }

    async fn run(executor: &Executor, query: &str) -> serde_json::Value {
        let response = executor.execute(query).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap()
    }

    #[tokio::test]
    async fn test_single_song() {
        let data = run(&executor(), "{ song(id: 2) { id title release album genre authorId } }").await;
        assert_eq!(
            data,
            json!({ "song": {
                "id": 2, "title": "Do I Wanna Know?", "release": 2013,
                "album": "AM", "genre": "rock", "authorId": 2
            }})
        );
    }

    #[tokio::test]
    async fn test_missing_and_absent_ids_are_null() {
        let executor = executor();
        let data = run(&executor, "{ song(id: 99) { id } author(id: 0) { id } }").await;
        assert_eq!(data, json!({ "song": null, "author": null }));

        let data = run(&executor, "{ song { id } }").await;
        assert_eq!(data, json!({ "song": null }));
    }

    #[tokio::test]
    async fn test_nested_relations() {
        let data = run(&executor(), "{ author(id: 2) { name songs { title author { name } } } }").await;
        assert_eq!(
            data,
            json!({ "author": {
                "name": "Arctic Monkeys",
                "songs": [
                    { "title": "Do I Wanna Know?", "author": { "name": "Arctic Monkeys" } },
                    { "title": "R U Mine?", "author": { "name": "Arctic Monkeys" } }
                ]
            }})
        );
    }

    #[tokio::test]
    async fn test_mutation_then_query() {
        let executor = executor();
        let data = run(
            &executor,
            r#"mutation { addAuthor(name: "Bad Bunny", email: "bb@example.com", homeTown: "Vega Baja, PR") { id } }"#,
        )
        .await;
        assert_eq!(data, json!({ "addAuthor": { "id": 4 } }));

        let data = run(&executor, "{ author(id: 4) { name songs { id } } }").await;
        assert_eq!(data, json!({ "author": { "name": "Bad Bunny", "songs": [] } }));
    }

    #[tokio::test]
    async fn test_missing_argument_fails_validation() {
        let store = create_shared_store().unwrap();
        let executor = Executor::from_registry(&catalog_registry(), store.clone()).unwrap();
        let response = executor
            .execute(r#"mutation { addAuthor(name: "No Email", homeTown: "X") { id } }"#)
            .await;
        assert!(!response.errors.is_empty());
        assert_eq!(store.read().author_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let executor = Executor::from_registry(&catalog_registry(), share(EntityStore::new())).unwrap();
        let data = run(&executor, "{ songs { id } authors { id } }").await;
        assert_eq!(data, json!({ "songs": [], "authors": [] }));
    }

    #[tokio::test]
    async fn test_batch_executes_in_order() {
        let executor = executor();
        let batch = BatchRequest::Batch(vec![
            Request::new(r#"mutation { addAuthor(name: "A", email: "a@a", homeTown: "T") { id } }"#),
            Request::new("{ authors { id } }"),
        ]);

        let responses = match executor.execute_batch(batch).await {
            BatchResponse::Batch(responses) => responses,
            BatchResponse::Single(_) => panic!("expected a batch response"),
        };
        assert_eq!(responses.len(), 2);

        let added = responses[0].data.clone().into_json().unwrap();
        assert_eq!(added, json!({ "addAuthor": { "id": 4 } }));
        let listed = responses[1].data.clone().into_json().unwrap();
        assert_eq!(listed["authors"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn test_sdl_carries_descriptions() {
        let sdl = executor().sdl();
        assert!(sdl.contains("This represents a song written by an author"));
        assert!(sdl.contains("addSong("));
        assert!(sdl.contains("authorId: Int!"));
        assert!(sdl.contains("songs: [Song!]!"));
    }

    #[test]
    fn test_invalid_registry_is_schema_error() {
        let registry = Registry::new(TypeDef::new("Query").field(FieldDef::object(
            "ghost",
            "Ghost",
            Resolver::read(|_, _, _| Ok(Resolved::Null)),
        )));
        let result = build_schema(&registry, create_shared_store().unwrap());
        assert!(matches!(result, Err(Error::Schema(_))));
    }
}
