//! HTTP request handlers for the songbook API

use async_graphql::http::{parse_query_string, GraphiQLSource};
use async_graphql::parser::{parse_query, types::OperationType};
use async_graphql::{Request, ServerError};
use async_graphql_axum::{GraphQLBatchRequest, GraphQLResponse};
use axum::{
    extract::{RawQuery, State},
    http::{
        header::{ACCEPT, ALLOW, CONTENT_TYPE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Json, Response},
};
use serde::Serialize;

use crate::core::AppState;
use crate::system::health::HealthStatus;
use crate::system::Timer;

/// System information and capabilities
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    /// Service name
    pub name: String,
    /// Service version
    pub version: String,
    /// GraphQL endpoint path
    pub endpoint: String,
    /// List of supported capabilities
    pub capabilities: Vec<String>,
    /// List of supported protocols
    pub protocols: Vec<String>,
}

/// Execute a GraphQL request (or batch) posted to the catalog
pub async fn graphql_handler(
    State(state): State<AppState>,
    request: GraphQLBatchRequest,
) -> GraphQLResponse {
    let timer = Timer::start();
    let response = state.executor.execute_batch(request.into_inner()).await;

    record_request(&state, &timer, response.is_ok());
    response.into()
}

/// GET on the GraphQL endpoint.
///
/// Browsers get the GraphiQL IDE when it is enabled; everything else runs the
/// request carried in the query string. Mutations are only accepted over POST.
pub async fn graphql_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if state.config.server.graphiql && prefers_html(&headers) {
        return graphiql_page(&state.config.server.graphql_path).into_response();
    }

    let request = match parse_query_string(query.as_deref().unwrap_or_default()) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!("Rejecting GET request: {}", e);
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };
    if request.query.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Must provide query string.");
    }

    if is_mutation(&request) {
        let mut response = error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "Can only perform a mutation operation from a POST request.",
        );
        response
            .headers_mut()
            .insert(ALLOW, HeaderValue::from_static("POST"));
        return response;
    }

    let timer = Timer::start();
    let response = state.executor.execute(request).await;

    record_request(&state, &timer, response.is_ok());
    GraphQLResponse::from(response).into_response()
}

fn record_request(state: &AppState, timer: &Timer, ok: bool) {
    if !ok {
        tracing::debug!("GraphQL request answered with errors");
    }
    state.metrics.observe_request(timer.elapsed(), !ok);
    state.record_catalog_size();
}

fn graphiql_page(endpoint: &str) -> Html<String> {
    Html(GraphiQLSource::build().endpoint(endpoint).finish())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = async_graphql::Response::from_errors(vec![ServerError::new(message, None)]);
    (status, GraphQLResponse::from(body)).into_response()
}

/// Whether the `Accept` header ranks HTML ahead of JSON
fn prefers_html(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(ACCEPT).and_then(|value| value.to_str().ok()) else {
        return false;
    };
    let position = |media: &str| {
        accept
            .split(',')
            .position(|part| part.trim().starts_with(media))
    };

    match (position("text/html"), position("application/json")) {
        (Some(html), Some(json)) => html < json,
        (Some(_), None) => true,
        _ => false,
    }
}

/// Whether the operation the request would run is a mutation.
///
/// Unparsable documents and ambiguous selections fall through to the executor,
/// which reports them as GraphQL errors.
fn is_mutation(request: &Request) -> bool {
    let Ok(document) = parse_query(&request.query) else {
        return false;
    };

    let selected = match request.operation_name.as_deref() {
        Some(name) => document
            .operations
            .iter()
            .find(|(op_name, _)| op_name.map(|n| n.as_str()) == Some(name)),
        None => {
            let mut operations = document.operations.iter();
            match (operations.next(), operations.next()) {
                (Some(only), None) => Some(only),
                _ => None,
            }
        }
    };

    selected.is_some_and(|(_, operation)| operation.node.ty == OperationType::Mutation)
}

/// Health check
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::healthy(state.uptime.elapsed()))
}

/// Service information
pub async fn system_info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        name: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        endpoint: state.config.server.graphql_path.clone(),
        capabilities: vec![
            "graphql-query".to_string(),
            "graphql-mutation".to_string(),
            "introspection".to_string(),
        ],
        protocols: vec!["HTTP/1.1".to_string()],
    })
}

/// Prometheus exposition
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let body = state.metrics.render().map_err(|e| {
        tracing::error!("Failed to render metrics: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(([(CONTENT_TYPE, "text/plain; version=0.0.4")], body))
}
