use super::app_error::AppError;
use super::health::{__path_liveness, liveness};
use super::state::HttpServerState;
use crate::analysis::{AnalysisResult, analyze_bytes};
use crate::config;
use crate::importers::get_parser_from_name;
use anyhow::Result;
use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::{StatusCode, header};
use axum::routing::{get, post};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace;
use tower_http::{ServiceBuilderExt, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::Level;
use utoipa::{IntoParams, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "TabInsight", description = "TabInsight API"),
        (name = "Analysis", description = "Tabular data analysis"),
        (name = "Health", description = "Health checks"),
    ),
    paths(frontpage, analyze, liveness),
)]
struct ApiDoc;

/// Routes and middleware, without binding a socket.
pub fn build_router(state: HttpServerState, body_limit: usize, timeout_seconds: u64) -> Router {
    let max_body_layer = DefaultBodyLimit::max(body_limit);

    // List of headers that shouldn't be logged
    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();

    // Middleware creation
    let middleware = ServiceBuilder::new()
        .sensitive_request_headers(sensitive_headers.clone())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .sensitive_response_headers(sensitive_headers)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(timeout_seconds),
        ))
        .compression()
        .into_inner();

    Router::new()
        .route("/", get(frontpage))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .route("/health/live", get(liveness))
        .route("/api/v1/analyze", post(analyze).layer(max_body_layer))
        .layer(middleware)
        .with_state(state)
}

pub async fn run_http_server(state: HttpServerState, address: SocketAddr) -> Result<()> {
    let config = config::get()?;
    let app = build_router(
        state,
        config.parse_http_body_limit()?,
        config.http_server_timeout_seconds,
    );

    // Run our application
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("HTTP server listening on {}", address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Wait for the CTRL+C signal
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown CTRL+C signal handler: {}", error);
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "TabInsight",
    responses(
        (status = 200, description = "TabInsight Frontpage", body = String)
    )
)]
async fn frontpage(State(state): State<HttpServerState>) -> Result<Json<String>, AppError> {
    let name: String = (*state.name).clone();
    Ok(Json(name))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyzeQuery {
    /// Input format: csv, tsv or ssv. Server default when absent.
    pub format: Option<String>,
}

/// Analyze a dataset.
///
/// The raw body is parsed with the requested format, then classified and
/// summarized into charts and insights.
#[utoipa::path(
    post,
    path = "/api/v1/analyze",
    tag = "Analysis",
    params(AnalyzeQuery),
    request_body(content = String, description = "Raw tabular data", content_type = "text/csv"),
    responses(
        (status = 200, description = "Summary, charts and insights", body = serde_json::Value),
        (status = 400, description = "Bad Request", body = AppError),
    )
)]
async fn analyze(
    State(state): State<HttpServerState>,
    Query(query): Query<AnalyzeQuery>,
    bytes: Bytes,
) -> Result<Json<AnalysisResult>, AppError> {
    let format = query
        .format
        .as_deref()
        .unwrap_or(state.default_input_format.as_str());
    let parser = get_parser_from_name(format).map_err(AppError::bad_request)?;

    let result = analyze_bytes(parser.as_ref(), &bytes, &state.options)
        .await
        .map_err(AppError::bad_request)?;
    tracing::debug!(
        format,
        bytes = bytes.len(),
        charts = result.charts.len(),
        insights = result.insights.len(),
        "Analyzed request body"
    );
    Ok(Json(result))
}
