//! HTTP host for the users server.
//!
//! Owns the listener and every cross-cutting layer. Feature modules hand
//! over a plain `Router` with their routes plus the utoipa document that
//! describes them.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::header,
    middleware::from_fn,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    /// Create a new ApiIngress instance with the given configuration
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Wrap the module routes with `/health`, the docs endpoints and the
    /// global middleware stack.
    pub fn build_router(
        &self,
        module_router: Router,
        openapi: utoipa::openapi::OpenApi,
    ) -> Result<Router> {
        let cfg = &self.config;
        let mut router = module_router.route("/health", get(web::health_check));

        if cfg.enable_docs {
            // Serialized once; every request clones the ready value.
            let doc = Arc::new(
                serde_json::to_value(&openapi).context("failed to serialize OpenAPI document")?,
            );
            tracing::info!(
                paths = openapi.paths.paths.len(),
                "Serving OpenAPI document at /openapi.json"
            );

            router = router
                .route(
                    "/openapi.json",
                    get(move || {
                        let doc = doc.clone();
                        async move {
                            ([(header::CACHE_CONTROL, "no-store")], Json((*doc).clone()))
                                .into_response()
                        }
                    }),
                )
                .route("/docs", get(web::serve_docs))
                .route("/docs/{*path}", get(web::serve_docs));
        }

        // Each `layer` call wraps everything added before it, so the stack
        // below reads innermost first. Request order, outermost first:
        // SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions
        // -> CatchPanic -> Timeout -> CORS -> Compression -> BodyLimit -> DefaultBodyLimit
        // Extractors such as `Bytes` carry their own 2 MiB cap; align it with ours.
        router = router.layer(DefaultBodyLimit::max(cfg.body_limit_bytes));
        router = router.layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes));
        router = router.layer(CompressionLayer::new());
        if cfg.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            cfg.request_timeout_secs,
        )));
        router = router.layer(CatchPanicLayer::custom(web::panic_response));

        let x_request_id = request_id::header();
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));
        router = router.layer(request_id::create_trace_layer());
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        Ok(router)
    }

    /// Bind `addr` and serve until `cancel` fires.
    pub async fn serve(router: Router, addr: SocketAddr, cancel: CancellationToken) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        Self::serve_on(listener, router, cancel).await
    }

    /// Serve on an already bound listener until `cancel` fires; in-flight
    /// requests are allowed to finish.
    pub async fn serve_on(
        listener: TcpListener,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<()> {
        let local = listener.local_addr()?;
        tracing::info!("HTTP server bound on {}", local);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
