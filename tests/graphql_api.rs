//! End-to-end tests against the HTTP router

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{ACCEPT, ALLOW, CONTENT_TYPE},
        Request, StatusCode,
    },
    Router,
};
use serde_json::{json, Value};
use songbook::{
    api::{create_app, graphql_router},
    core::AppState,
    Config,
};
use tower::ServiceExt;

fn app() -> (AppState, Router) {
    let state = AppState::new(Config::default()).unwrap();
    (state.clone(), create_app(state))
}

async fn post_graphql(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    get_accepting(app, uri, "*/*").await
}

async fn get_accepting(app: &Router, uri: &str, accept: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(uri)
        .header(ACCEPT, accept)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_query_song_over_http() {
    let (_, app) = app();
    let (status, body) = post_graphql(
        &app,
        json!({ "query": "{ song(id: 4) { title author { name homeTown } } }" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["song"],
        json!({
            "title": "Nothing else matters",
            "author": { "name": "Metallica", "homeTown": "Lost Angeles, USA" }
        })
    );
}

#[tokio::test]
async fn test_author_songs_in_store_order() {
    let (_, app) = app();
    let (_, body) = post_graphql(
        &app,
        json!({ "query": "{ authors { id songs { title } } }" }),
    )
    .await;

    assert_eq!(
        body["data"]["authors"],
        json!([
            { "id": 1, "songs": [{ "title": "Tu Me Dejaste De Querer" }] },
            { "id": 2, "songs": [{ "title": "Do I Wanna Know?" }, { "title": "R U Mine?" }] },
            { "id": 3, "songs": [{ "title": "Nothing else matters" }, { "title": "Master Of Puppets" }] },
        ])
    );
}

#[tokio::test]
async fn test_add_song_then_query_it() {
    let (state, app) = app();
    let (_, body) = post_graphql(
        &app,
        json!({
            "query": "mutation($title: String!) { addSong(title: $title, release: 2022, album: \"Motomami\", genre: \"pop\", authorId: 1) { id title } }",
            "variables": { "title": "Saoko" }
        }),
    )
    .await;
    assert_eq!(body["data"]["addSong"], json!({ "id": 6, "title": "Saoko" }));

    let (_, body) = post_graphql(&app, json!({ "query": "{ song(id: 6) { album author { name } } }" })).await;
    assert_eq!(
        body["data"]["song"],
        json!({ "album": "Motomami", "author": { "name": "C. Tangana" } })
    );

    assert_eq!(state.store.read().song_count(), 6);
    assert_eq!(state.metrics.songs.get(), 6);
}

#[tokio::test]
async fn test_add_author_assigns_next_id() {
    let (_, app) = app();
    let (_, body) = post_graphql(
        &app,
        json!({ "query": "mutation { addAuthor(name: \"Rosalia\", email: \"rosalia@gmail.com\", homeTown: \"Barcelona, Spain\") { id name songs { id } } }" }),
    )
    .await;

    assert_eq!(
        body["data"]["addAuthor"],
        json!({ "id": 4, "name": "Rosalia", "songs": [] })
    );
}

#[tokio::test]
async fn test_missing_argument_is_rejected() {
    let (state, app) = app();
    let (_, body) = post_graphql(
        &app,
        json!({ "query": "mutation { addSong(title: \"x\", release: 1, album: \"y\", genre: \"z\") { id } }" }),
    )
    .await;

    assert!(body["errors"].as_array().is_some_and(|errors| !errors.is_empty()));
    assert_eq!(state.store.read().song_count(), 5);
    assert_eq!(state.metrics.request_errors.get(), 1);
}

#[tokio::test]
async fn test_unknown_id_is_null() {
    let (_, app) = app();
    let (_, body) = post_graphql(&app, json!({ "query": "{ song(id: 99) { id } author(id: 0) { id } }" })).await;

    assert_eq!(body["data"], json!({ "song": null, "author": null }));
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_batch_requests_run_in_order() {
    let (_, app) = app();
    let (_, body) = post_graphql(
        &app,
        json!([
            { "query": "mutation { addAuthor(name: \"A\", email: \"a@a\", homeTown: \"T\") { id } }" },
            { "query": "{ authors { id } }" }
        ]),
    )
    .await;

    assert_eq!(body[0]["data"]["addAuthor"]["id"], json!(4));
    assert_eq!(body[1]["data"]["authors"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn test_graphiql_for_browsers() {
    let (_, app) = app();
    let (status, body) =
        get_accepting(&app, "/graphql", "text/html,application/xhtml+xml,*/*;q=0.8").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("graphiql"));
    assert!(body.contains("/graphql"));
}

#[tokio::test]
async fn test_get_query_without_graphiql() {
    let mut config = Config::default();
    config.server.graphiql = false;
    let app = create_app(AppState::new(config).unwrap());

    let (status, body) = get(&app, "/graphql?query=%7B%20songs%20%7B%20id%20%7D%20%7D").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["data"]["songs"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_health_and_info() {
    let (_, app) = app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["version"], songbook::VERSION);

    let (status, body) = get(&app, "/info").await;
    assert_eq!(status, StatusCode::OK);
    let info: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(info["name"], songbook::NAME);
    assert_eq!(info["endpoint"], "/graphql");
}

#[tokio::test]
async fn test_metrics_exposition() {
    let (_, app) = app();
    post_graphql(&app, json!({ "query": "{ songs { id } }" })).await;

    let (status, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("songbook_graphql_requests_total 1"));
    assert!(body.contains("songbook_songs 5"));
    assert!(body.contains("songbook_authors 3"));
}

#[tokio::test]
async fn test_metrics_route_disabled() {
    let mut config = Config::default();
    config.metrics.enable_prometheus = false;
    let app = create_app(AppState::new(config).unwrap());

    let (status, _) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_json_get_runs_query_with_graphiql_enabled() {
    let (_, app) = app();
    let (status, body) = get_accepting(
        &app,
        "/graphql?query=%7B%20songs%20%7B%20id%20%7D%20%7D",
        "application/json",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["data"]["songs"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_get_mutation_is_rejected() {
    for graphiql in [true, false] {
        let mut config = Config::default();
        config.server.graphiql = graphiql;
        let state = AppState::new(config).unwrap();
        let app = create_app(state.clone());

        let request = Request::builder()
            .uri("/graphql?query=mutation%20%7B%20addAuthor(name%3A%20%22A%22%2C%20email%3A%20%22a%40a%22%2C%20homeTown%3A%20%22T%22)%20%7B%20id%20%7D%20%7D")
            .header(ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "POST");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["errors"][0]["message"],
            "Can only perform a mutation operation from a POST request."
        );
        assert_eq!(state.store.read().author_count(), 3);
    }
}

#[tokio::test]
async fn test_get_without_query_is_bad_request() {
    let (_, app) = app();
    let (status, body) = get_accepting(&app, "/graphql", "application/json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["errors"][0]["message"], "Must provide query string.");
}

#[tokio::test]
async fn test_graphql_router_at_custom_path() {
    let state = AppState::new(Config::default()).unwrap();
    let app = graphql_router(state, "/api/catalog");

    let request = Request::builder()
        .method("POST")
        .uri("/api/catalog")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": "{ author(id: 2) { name } }" }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"]["author"]["name"], "Arctic Monkeys");

    let (status, _) = get(&app, "/api/catalog").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
