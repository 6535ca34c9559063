//! HTTP server implementation for the songbook API

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use std::future::Future;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::core::{AppState, Result};

/// Creates the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let server = &state.config.server;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    let mut router = Router::new()
        .route(
            &server.graphql_path,
            get(handlers::graphql_get).post(handlers::graphql_handler),
        )
        // System routes
        .route("/health", get(handlers::health_check))
        .route("/info", get(handlers::system_info));

    if state.config.metrics.enable_prometheus {
        router = router.route(&state.config.metrics.path, get(handlers::metrics));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Router exposing only the GraphQL endpoint at `path`, for embedding
pub fn graphql_router(state: AppState, path: &str) -> Router {
    Router::new()
        .route(path, post(handlers::graphql_handler))
        .with_state(state)
}

/// Start the HTTP server and serve until `shutdown` resolves
pub async fn start_server<F>(state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config.server.http_addr;
    let url = state.config.endpoint_url();
    tracing::info!("Starting songbook API server on {}", addr);

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server running on {}", url);
    tracing::info!("Health check available at http://{}/health", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
