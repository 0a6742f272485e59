//! HTTP server implementation

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::Json;
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::BoxError;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::api::types::ApiResponse;
use crate::config::ServerConfig;
use crate::Result;

/// Router with request limits, tracing, compression and optional CORS applied
pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    let app = with_request_limits(
        routes::app_router(state),
        Duration::from_secs(config.request_timeout_secs),
        config.max_concurrent_requests,
    );

    let mut app = app
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if config.enable_cors {
        info!("CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Bound each route's in-flight requests and their running time.
fn with_request_limits(router: Router, timeout: Duration, max_concurrent: usize) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(ConcurrencyLimitLayer::new(max_concurrent.max(1)))
            .layer(TimeoutLayer::new(timeout)),
    )
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<ApiResponse<()>>) {
    if err.is::<Elapsed>() {
        tracing::warn!("Request timed out");
        return (
            StatusCode::REQUEST_TIMEOUT,
            Json(ApiResponse::error("Request timed out")),
        );
    }

    tracing::error!("Unhandled middleware error: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error("Internal server error")),
    )
}

/// Start the API server
pub async fn serve_api(state: AppState, config: &ServerConfig) -> Result<()> {
    info!("Starting resume API server...");
    if !state.rag.semantic_enabled() {
        info!("Semantic search disabled; queries use keyword matching");
    }

    let app = build_app(state, config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /api/v1/health          - Health check");
    info!("  GET  /api/v1/profile         - Full resume profile");
    info!("  GET  /api/v1/projects        - Projects");
    info!("  GET  /api/v1/experiences     - Work experience");
    info!("  GET  /api/v1/skills          - Skills");
    info!("  GET  /api/v1/education       - Education");
    info!("  GET  /api/v1/certificates    - Certificates");
    info!("  POST /api/v1/query-resume    - Ask a question about the resume");
    info!("  POST /api/v1/sync-vector-db  - Re-index the resume");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
