use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};

const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Wrap `routes` with API docs and the shared middleware stack.
///
/// - `/api-docs/openapi.json`, `/redoc` and `/rapidoc` serve `T`'s document
/// - unknown paths fall back to a JSON 404
/// - request tracing, security headers and response compression apply to
///   every route; `cors` is installed only when given
///
/// `routes` must already have its state applied.
pub fn create_router<T>(routes: Router, cors: Option<CorsLayer>) -> Router
where
    T: OpenApi + 'static,
{
    let doc = T::openapi();
    let served = doc.clone();

    let mut router = Router::new()
        .route(
            OPENAPI_JSON,
            get(move || {
                let doc = served.clone();
                async move { Json(doc) }
            }),
        )
        .merge(Redoc::with_url("/redoc", doc))
        .merge(RapiDoc::new(OPENAPI_JSON).path("/rapidoc"))
        .merge(routes)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    if let Some(cors) = cors {
        info!("CORS enabled");
        router = router.layer(cors);
    }

    router.layer(CompressionLayer::new())
}

/// Serve `router` until SIGINT/SIGTERM, drain in-flight requests, then run
/// `cleanup` bounded by [`ServerConfig::shutdown_timeout`].
///
/// `cleanup` starts only after the last request has completed, so it may
/// close handles the handlers use.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(server_config.address()).await?;
    info!(address = %listener.local_addr()?, "Server listening");

    let coordinator = ShutdownCoordinator::new();
    let signals = coordinator.clone();
    tokio::spawn(async move { signals.listen_for_signals().await });

    serve_with_cleanup(
        listener,
        router,
        async move { coordinator.wait().await },
        server_config.shutdown_timeout,
        cleanup,
    )
    .await
}

async fn serve_with_cleanup<S, F>(
    listener: TcpListener,
    router: Router,
    shutdown: S,
    timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
    F: Future<Output = ()>,
{
    let served = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server error"));

    info!(timeout_secs = timeout.as_secs(), "Requests drained, running cleanup");
    match tokio::time::timeout(timeout, cleanup).await {
        Ok(()) => info!("Cleanup finished"),
        Err(_) => warn!(timeout_secs = timeout.as_secs(), "Cleanup timed out"),
    }

    served
}
