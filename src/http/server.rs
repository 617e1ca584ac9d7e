//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, timeout, metrics)
//! - Build the upstream client once, shared by every request
//! - Serve on a listener until shutdown is signalled

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{GroupConfig, RelayConfig};
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_span, set_request_id_layer};
use crate::observability::metrics;
use crate::security::cors_layer;
use crate::upstream::{RobloxClient, UpstreamResult};

/// Application state injected into handlers.
///
/// Immutable after startup; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<RobloxClient>,
    pub groups: GroupConfig,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> UpstreamResult<Self> {
        let client = RobloxClient::new(config.upstream.clone(), &config.timeouts)?;

        let state = AppState {
            client: Arc::new(client),
            groups: config.groups,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Outermost first: request ID, trace span, response request ID, CORS,
    /// request timeout. CORS sits outside the timeout so timed-out requests
    /// still carry cross-origin headers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/lookup", get(handlers::lookup))
            .route("/get_user_id", get(handlers::get_user_id))
            .route("/avatar/{user_id}", get(handlers::avatar))
            .route("/health", get(handlers::health))
            .route_layer(middleware::from_fn(metrics::track_metrics))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(cors_layer())
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once `shutdown` fires and in-flight requests have drained.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
